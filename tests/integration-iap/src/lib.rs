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

//! Run the IAP probe against a live deployment.
//!
//! The deployment is described by environment variables:
//!
//! - `GOOGLE_CLOUD_PROJECT`: the project hosting the deployment.
//! - `IAP_NAMESPACE`: the namespace used in the backend service names.
//! - `IAP_FRONTEND_URL`, `IAP_JUPYTER_URL`, `IAP_RAY_DASHBOARD_URL`: the
//!   protected endpoints.
//! - `IAP_FRONTEND_CLIENT_ID`, `IAP_JUPYTER_CLIENT_ID`,
//!   `IAP_RAY_DASHBOARD_CLIENT_ID`: optional, the OAuth client IDs.

use anyhow::Context;
use iap_probe::discovery::{ComputeBackendServices, ResourceManagerProjects};
use iap_probe::request::{DEFAULT_TIMEOUT, Requester};
use iap_probe::token::DefaultIdTokens;
use iap_probe::{Probe, Service, Target};

pub type DefaultProbe = Probe<ComputeBackendServices, ResourceManagerProjects, DefaultIdTokens>;

fn env(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}

pub fn targets() -> anyhow::Result<Vec<Target>> {
    Service::ALL
        .into_iter()
        .map(|service| {
            let prefix = format!("IAP_{}", service.keyword().replace('-', "_").to_uppercase());
            let url = env(&format!("{prefix}_URL"))?;
            let client_id = std::env::var(format!("{prefix}_CLIENT_ID")).unwrap_or_default();
            Ok(Target::new(service, url, client_id))
        })
        .collect()
}

pub async fn probe() -> anyhow::Result<DefaultProbe> {
    let project_id = env("GOOGLE_CLOUD_PROJECT")?;
    let namespace = env("IAP_NAMESPACE")?;
    Ok(Probe::new(
        project_id,
        namespace,
        ComputeBackendServices::new().await?,
        ResourceManagerProjects::new().await?,
        DefaultIdTokens::new(),
        Requester::new(reqwest::Method::GET, DEFAULT_TIMEOUT)?,
    ))
}

/// Each service in the deployment has at least one backend service.
pub async fn discover_audiences() -> anyhow::Result<()> {
    let probe = probe().await?;
    for target in targets()? {
        let audiences = probe.audiences(&target).await?;
        tracing::info!("{}: {audiences:?}", target.service);
        anyhow::ensure!(
            !audiences.is_empty(),
            "no backend service found for {}",
            target.service
        );
        for a in &audiences {
            anyhow::ensure!(
                a.starts_with("/projects/") && a.contains("/global/backendServices/"),
                "unexpected audience format {a}"
            );
        }
    }
    Ok(())
}

/// Every endpoint accepts the ID token.
pub async fn check_all() -> anyhow::Result<()> {
    let probe = probe().await?;
    let targets = targets()?;
    let results = probe.run(&targets).await;
    for (target, result) in targets.iter().zip(results) {
        let outcome = result.with_context(|| format!("checking {}", target.service))?;
        anyhow::ensure!(
            outcome.body.is_some(),
            "{} was not reachable at {}",
            target.service,
            target.url
        );
    }
    Ok(())
}
