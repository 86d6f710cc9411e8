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

//! Smoke test for services deployed behind Identity-Aware Proxy (IAP).
//!
//! The probe discovers the backend services of a deployment, builds the
//! audience IAP expects for each of them, mints an OIDC ID token for that
//! audience, and sends a request to the protected endpoint with the token as
//! the bearer credential. A `200 OK` response means the caller's identity is
//! accepted, a `403 Forbidden` means the caller lacks permission.

pub mod audience;
pub mod discovery;
pub mod error;
pub mod probe;
pub mod request;
pub mod target;
pub mod token;

pub use error::{Error, Result};
pub use probe::{Outcome, Probe};
pub use target::{Service, Target};
