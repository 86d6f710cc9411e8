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

//! The IAP-protected services checked by the probe.

/// One of the services deployed behind IAP.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Service {
    Frontend,
    Jupyter,
    RayDashboard,
}

impl Service {
    /// The services in the order they are checked.
    pub const ALL: [Service; 3] = [Service::Jupyter, Service::Frontend, Service::RayDashboard];

    /// The keyword identifying the service in backend service names.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Jupyter => "jupyter",
            Self::RayDashboard => "ray-dashboard",
        }
    }

    /// The substring searched for in the backend service names.
    ///
    /// Backend services created for a deployment are named after the
    /// namespace and the service, for example `k8s-be-ns1-jupyter-8a3b`.
    pub fn backend_filter(&self, namespace: &str) -> String {
        format!("{namespace}-{}", self.keyword())
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A protected endpoint and the OAuth client guarding it.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub service: Service,
    pub url: String,
    pub client_id: String,
}

impl Target {
    pub fn new<U, C>(service: Service, url: U, client_id: C) -> Self
    where
        U: Into<String>,
        C: Into<String>,
    {
        Self {
            service,
            url: url.into(),
            client_id: client_id.into(),
        }
    }
}
