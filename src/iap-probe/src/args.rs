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

use iap_probe::request::parse_method;
use iap_probe::{Service, Target};
use anyhow::bail;
use clap::Parser;
use humantime::parse_duration;
use reqwest::Method;
use std::time::Duration;

/// Configuration for a probe run.
///
/// The positional arguments keep the order used by the deployment scripts.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = crate::DESCRIPTION)]
pub struct Args {
    /// URL of the frontend service.
    pub frontend_url: String,

    /// OAuth client ID for the frontend service.
    pub frontend_client_id: String,

    /// URL of the Jupyter service.
    pub jupyter_url: String,

    /// OAuth client ID for the Jupyter service.
    pub jupyter_client_id: String,

    /// URL of the Ray dashboard.
    pub ray_dashboard_url: String,

    /// OAuth client ID for the Ray dashboard.
    pub ray_dashboard_client_id: String,

    /// The Google Cloud project ID.
    pub project_id: String,

    /// Namespace for the backend services.
    ///
    /// Only backend services whose name contains `{namespace}-{service}`
    /// are used to build the audience.
    pub namespace: String,

    /// The timeout for each request to the protected endpoints.
    #[arg(long, value_parser = parse_duration, default_value = "90s")]
    pub timeout: Duration,

    /// The HTTP method used for the requests.
    #[arg(long, value_parser = parse_method, default_value = "GET")]
    pub method: Method,

    /// Only check these services. By default all services are checked.
    #[arg(long, value_enum)]
    pub only: Vec<Service>,
}

impl Args {
    /// Validates the arguments after parsing.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.project_id.trim().is_empty() {
            bail!("the project id must be non-empty")
        }
        if self.namespace.trim().is_empty() {
            bail!("the namespace must be non-empty")
        }
        if self.timeout.is_zero() {
            bail!("invalid timeout, must be greater than zero")
        }
        for target in self.targets() {
            let url = match url::Url::parse(&target.url) {
                Ok(u) => u,
                Err(e) => bail!("invalid URL for {}: {:?}: {e}", target.service, target.url),
            };
            if !matches!(url.scheme(), "http" | "https") {
                bail!(
                    "invalid URL for {}: {:?}, the scheme must be http or https",
                    target.service,
                    target.url
                )
            }
        }
        Ok(())
    }

    /// The endpoints to check, in the order they are checked.
    pub fn targets(&self) -> Vec<Target> {
        Service::ALL
            .into_iter()
            .filter(|s| self.only.is_empty() || self.only.contains(s))
            .map(|s| match s {
                Service::Frontend => Target::new(s, &self.frontend_url, &self.frontend_client_id),
                Service::Jupyter => Target::new(s, &self.jupyter_url, &self.jupyter_client_id),
                Service::RayDashboard => {
                    Target::new(s, &self.ray_dashboard_url, &self.ray_dashboard_client_id)
                }
            })
            .collect()
    }
}
