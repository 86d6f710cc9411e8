// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Discover the resources needed to compute IAP audiences.

use crate::audience::{matches_keyword, project_number_from_name};
use crate::error::{Error, Result};
use google_cloud_compute_v1::client::BackendServices;
use google_cloud_gax::paginator::ItemPaginator;
use google_cloud_resourcemanager_v3::client::Projects;

/// The fields of a Compute Engine backend service used by the probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendServiceRef {
    pub id: String,
    pub name: String,
}

impl BackendServiceRef {
    pub fn new<I, N>(id: I, name: N) -> Self
    where
        I: Into<String>,
        N: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Lists the global backend services in a project.
#[async_trait::async_trait]
pub trait BackendServiceSource: std::fmt::Debug + Send + Sync {
    async fn list_backend_services(&self, project_id: &str) -> Result<Vec<BackendServiceRef>>;
}

/// Resolves a project ID to its project number.
#[async_trait::async_trait]
pub trait ProjectNumberSource: std::fmt::Debug + Send + Sync {
    async fn project_number(&self, project_id: &str) -> Result<String>;
}

/// The IDs of the backend services whose name contains `filter`.
pub fn matching_backend_service_ids(services: &[BackendServiceRef], filter: &str) -> Vec<String> {
    services
        .iter()
        .filter(|s| matches_keyword(&s.name, filter))
        .map(|s| s.id.clone())
        .collect()
}

/// Lists backend services with the Compute Engine API.
#[derive(Clone, Debug)]
pub struct ComputeBackendServices {
    client: BackendServices,
}

impl ComputeBackendServices {
    /// Creates a client using Application Default Credentials.
    pub async fn new() -> Result<Self> {
        let client = BackendServices::builder()
            .build()
            .await
            .map_err(|e| Error::ClientBuilder {
                client: "Compute Engine BackendServices",
                source: e.into(),
            })?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: BackendServices) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl BackendServiceSource for ComputeBackendServices {
    async fn list_backend_services(&self, project_id: &str) -> Result<Vec<BackendServiceRef>> {
        tracing::info!("listing backend services in project {project_id}");
        let mut items = self.client.list().set_project(project_id).by_item();
        let mut services = Vec::new();
        while let Some(item) = items.next().await.transpose().map_err(|source| {
            Error::ListBackendServices {
                project_id: project_id.to_string(),
                source,
            }
        })? {
            match (item.id, item.name) {
                (Some(id), Some(name)) => services.push(BackendServiceRef::new(id.to_string(), name)),
                (id, name) => {
                    tracing::debug!("skipping backend service with id={id:?}, name={name:?}")
                }
            }
        }
        Ok(services)
    }
}

/// Resolves project numbers with the Resource Manager API.
#[derive(Clone, Debug)]
pub struct ResourceManagerProjects {
    client: Projects,
}

impl ResourceManagerProjects {
    /// Creates a client using Application Default Credentials.
    pub async fn new() -> Result<Self> {
        let client = Projects::builder()
            .build()
            .await
            .map_err(|e| Error::ClientBuilder {
                client: "Resource Manager Projects",
                source: e.into(),
            })?;
        Ok(Self::from_client(client))
    }

    pub fn from_client(client: Projects) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl ProjectNumberSource for ResourceManagerProjects {
    async fn project_number(&self, project_id: &str) -> Result<String> {
        let project = self
            .client
            .get_project()
            .set_name(format!("projects/{project_id}"))
            .send()
            .await
            .map_err(|source| Error::GetProject {
                project_id: project_id.to_string(),
                source,
            })?;
        tracing::debug!("{project:?}");
        project_number_from_name(&project.name)
    }
}
