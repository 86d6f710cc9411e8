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

//! Run the IAP checks.

use crate::audience::expected_audiences;
use crate::discovery::{BackendServiceSource, ProjectNumberSource, matching_backend_service_ids};
use crate::error::{Error, Result};
use crate::request::Requester;
use crate::target::{Service, Target};
use crate::token::{Censored, IdTokenSource};
use tokio::sync::OnceCell;
use tracing::Instrument;

/// The result of a successful check.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub service: Service,
    /// The audience used to mint the ID token.
    pub audience: String,
    /// The response body, `None` if the endpoint could not be reached.
    pub body: Option<String>,
}

/// Checks IAP-protected endpoints in a single project and namespace.
#[derive(Debug)]
pub struct Probe<B, P, T> {
    project_id: String,
    namespace: String,
    backend_services: B,
    projects: P,
    tokens: T,
    requester: Requester,
    project_number: OnceCell<String>,
}

impl<B, P, T> Probe<B, P, T>
where
    B: BackendServiceSource,
    P: ProjectNumberSource,
    T: IdTokenSource,
{
    pub fn new<I, N>(
        project_id: I,
        namespace: N,
        backend_services: B,
        projects: P,
        tokens: T,
        requester: Requester,
    ) -> Self
    where
        I: Into<String>,
        N: Into<String>,
    {
        Self {
            project_id: project_id.into(),
            namespace: namespace.into(),
            backend_services,
            projects,
            tokens,
            requester,
            project_number: OnceCell::new(),
        }
    }

    /// The audiences of the backend services serving `target`.
    ///
    /// Empty if no backend service name contains the target's filter.
    pub async fn audiences(&self, target: &Target) -> Result<Vec<String>> {
        let filter = target.service.backend_filter(&self.namespace);
        let services = self
            .backend_services
            .list_backend_services(&self.project_id)
            .await?;
        let ids = matching_backend_service_ids(&services, &filter);
        tracing::info!("GCP Backend Services IDs for {filter}: {ids:?}");
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let project_number = self.project_number().await?;
        let audiences = expected_audiences(project_number, &ids);
        tracing::info!("Expected Audiences: {audiences:?}");
        Ok(audiences)
    }

    /// Checks a single endpoint.
    pub async fn check(&self, target: &Target) -> Result<Outcome> {
        let audience = self.audience(target).await?;
        let token = self.tokens.id_token(&audience).await?;
        tracing::debug!("token is {:?}", Censored(&token));
        let body = self.requester.send(&target.url, &token).await?;
        Ok(Outcome {
            service: target.service,
            audience,
            body,
        })
    }

    /// Checks each target in order, a failure does not stop the run.
    pub async fn run(&self, targets: &[Target]) -> Vec<Result<Outcome>> {
        let mut results = Vec::with_capacity(targets.len());
        for target in targets {
            let span = tracing::info_span!("check", service = %target.service);
            let result = self.check(target).instrument(span).await;
            if let Err(e) = &result {
                tracing::error!("{} check failed: {e}", target.service);
            }
            results.push(result);
        }
        results
    }

    async fn audience(&self, target: &Target) -> Result<String> {
        let mut audiences = self.audiences(target).await?.into_iter();
        match audiences.next() {
            Some(a) => Ok(a),
            None if !target.client_id.is_empty() => {
                tracing::warn!(
                    "no backend service found for {}, using the OAuth client ID as audience",
                    target.service
                );
                Ok(target.client_id.clone())
            }
            None => Err(Error::NoBackendService {
                filter: target.service.backend_filter(&self.namespace),
            }),
        }
    }

    async fn project_number(&self) -> Result<&str> {
        let number = self
            .project_number
            .get_or_try_init(|| self.projects.project_number(&self.project_id))
            .await?;
        Ok(number.as_str())
    }
}
