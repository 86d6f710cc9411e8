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

//! Obtain OIDC ID tokens for IAP audiences.

use crate::error::{Error, Result};
use google_cloud_auth::credentials::idtoken::{Builder, IDTokenCredentials};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Returns an ID token whose `aud` claim is `audience`.
#[async_trait::async_trait]
pub trait IdTokenSource: std::fmt::Debug + Send + Sync {
    async fn id_token(&self, audience: &str) -> Result<String>;
}

/// ID tokens minted from Application Default Credentials.
///
/// Each audience gets its own credentials, which cache and refresh the
/// token until the process exits.
#[derive(Default)]
pub struct DefaultIdTokens {
    credentials: Mutex<HashMap<String, IDTokenCredentials>>,
}

impl DefaultIdTokens {
    pub fn new() -> Self {
        Self::default()
    }

    async fn credentials(&self, audience: &str) -> Result<IDTokenCredentials> {
        let mut guard = self.credentials.lock().await;
        if let Some(c) = guard.get(audience) {
            return Ok(c.clone());
        }
        let credentials = Builder::new(audience)
            .build()
            .map_err(|e| Error::Credentials {
                audience: audience.to_string(),
                source: e.into(),
            })?;
        guard.insert(audience.to_string(), credentials.clone());
        Ok(credentials)
    }
}

impl std::fmt::Debug for DefaultIdTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultIdTokens")
            .field("credentials", &"[censored]")
            .finish()
    }
}

#[async_trait::async_trait]
impl IdTokenSource for DefaultIdTokens {
    async fn id_token(&self, audience: &str) -> Result<String> {
        let credentials = self.credentials(audience).await?;
        let token = credentials
            .id_token()
            .await
            .map_err(|e| Error::IdToken {
                audience: audience.to_string(),
                source: e.into(),
            })?;
        tracing::info!("fetched ID token for {audience} ({} bytes)", token.len());
        Ok(token)
    }
}

/// Wraps a token so it can be formatted without leaking it.
pub struct Censored<'a>(pub &'a str);

impl std::fmt::Debug for Censored<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keep the JWT header, it helps debugging and carries no secret.
        match self.0.split_once('.') {
            Some((header, _)) => write!(f, "{header}.[censored]"),
            None => f.write_str("[censored]"),
        }
    }
}
