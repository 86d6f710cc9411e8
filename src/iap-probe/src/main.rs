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

mod args;
mod report;

use args::Args;
use clap::Parser;
use iap_probe::discovery::{ComputeBackendServices, ResourceManagerProjects};
use iap_probe::request::Requester;
use iap_probe::token::DefaultIdTokens;
use iap_probe::Probe;
use report::report;

const DESCRIPTION: &str = concat!(
    "Checks the frontend, Jupyter, and Ray dashboard services of a deployment",
    " protected by Identity-Aware Proxy. For each service, it finds the backend",
    " services named `{namespace}-{service}`, fetches an ID token for the",
    " matching IAP audience using Application Default Credentials, and sends a",
    " request with the token. The check succeeds on `200 OK`.",
    " A `403 Forbidden` means the credentials lack permission to access the",
    " application."
);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    enable_tracing();

    let args = Args::parse();
    args.validate()?;
    tracing::info!("Configuration: {args:?}");

    let probe = Probe::new(
        &args.project_id,
        &args.namespace,
        ComputeBackendServices::new().await?,
        ResourceManagerProjects::new().await?,
        DefaultIdTokens::new(),
        Requester::new(args.method.clone(), args.timeout)?,
    );

    let targets = args.targets();
    let results = probe.run(&targets).await;
    report(&targets, results)?;
    tracing::info!("DONE");
    Ok(())
}

fn enable_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_level(true)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
