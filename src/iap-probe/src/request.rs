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

//! Send authenticated requests to the protected endpoints.

use crate::error::{Error, Result};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use std::time::Duration;

/// The default timeout for requests to the protected endpoints.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Issues requests with an ID token as the bearer credential.
#[derive(Clone, Debug)]
pub struct Requester {
    client: reqwest::Client,
    method: Method,
}

impl Requester {
    pub fn new(method: Method, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::HttpClient)?;
        Ok(Self { client, method })
    }

    /// Sends the request and classifies the response.
    ///
    /// Returns the body on `200 OK`. Transport failures are logged and
    /// return `Ok(None)`: an unreachable endpoint does not fail the check.
    pub async fn send(&self, url: &str, token: &str) -> Result<Option<String>> {
        tracing::info!("{} {url}", self.method);
        let response = match self
            .client
            .request(self.method.clone(), url)
            .bearer_auth(token)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::error!("request to {url} failed: {e}");
                return Ok(None);
            }
        };
        let status = response.status();
        let headers = response.headers().clone();
        let body = match response.text().await {
            Ok(b) => {
                tracing::debug!("response from {url}: {status} {b}");
                Some(b)
            }
            Err(e) => {
                tracing::error!("cannot read response body from {url}: {e}");
                None
            }
        };
        classify(status, headers, body)
    }
}

/// Maps a response to the outcome of a check.
///
/// `body` is `None` when the body could not be read. That only matters for
/// `200 OK`, any other status is a failure whether or not the body arrived.
fn classify(status: StatusCode, headers: HeaderMap, body: Option<String>) -> Result<Option<String>> {
    match status {
        StatusCode::OK => Ok(body),
        StatusCode::FORBIDDEN => Err(Error::PermissionDenied),
        _ => Err(Error::BadResponse {
            status,
            headers,
            body: body.unwrap_or_default(),
        }),
    }
}

/// Parses an HTTP method name, as used on the command line.
pub fn parse_method(value: &str) -> std::result::Result<Method, String> {
    Method::from_bytes(value.to_ascii_uppercase().as_bytes())
        .map_err(|e| format!("invalid HTTP method {value:?}: {e}"))
}
