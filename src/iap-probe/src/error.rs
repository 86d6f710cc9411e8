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

//! The error type for IAP probes.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;

/// A boxed error, used where the source type comes from a client builder.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A `Result` alias where the `Err` case is [Error].
pub type Result<T> = std::result::Result<T, Error>;

/// The failures reported by a probe.
///
/// Transport errors while talking to the protected endpoint are not part of
/// this type. Those are logged and the probe yields no response body.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A Google Cloud client could not be initialized.
    #[error("cannot create the {client} client")]
    ClientBuilder {
        client: &'static str,
        #[source]
        source: BoxError,
    },

    /// The Compute Engine `BackendServices.List` RPC failed.
    #[error("cannot list backend services in project {project_id}")]
    ListBackendServices {
        project_id: String,
        #[source]
        source: google_cloud_gax::error::Error,
    },

    /// The Resource Manager `Projects.GetProject` RPC failed.
    #[error("cannot get project {project_id}")]
    GetProject {
        project_id: String,
        #[source]
        source: google_cloud_gax::error::Error,
    },

    /// Resource Manager returned a name that is not `projects/{number}`.
    #[error("unexpected project name {0:?}, expected `projects/{{number}}`")]
    ProjectName(String),

    /// No backend service matched and there is no client ID to fall back on.
    #[error("no backend service name contains {filter:?} and no client ID is configured")]
    NoBackendService { filter: String },

    /// The ID token credentials could not be created.
    #[error("cannot create ID token credentials for audience {audience}")]
    Credentials {
        audience: String,
        #[source]
        source: BoxError,
    },

    /// The ID token could not be fetched.
    #[error("cannot fetch an ID token for audience {audience}")]
    IdToken {
        audience: String,
        #[source]
        source: BoxError,
    },

    /// The HTTP client could not be created.
    #[error("cannot create the HTTP client")]
    HttpClient(#[source] reqwest::Error),

    /// The endpoint rejected the identity with `403 Forbidden`.
    #[error(
        "Service account does not have permission to access the IAP-protected application."
    )]
    PermissionDenied,

    /// The endpoint returned something other than `200 OK` or `403 Forbidden`.
    #[error("Bad response from application: {status} / {headers:?} / {body:?}")]
    BadResponse {
        status: StatusCode,
        headers: HeaderMap,
        body: String,
    },
}
