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

//! Build the audiences accepted by IAP.
//!
//! IAP expects ID tokens whose `aud` claim names the backend service behind
//! the load balancer: `/projects/{project_number}/global/backendServices/{id}`.
//! The project must be identified by its number, not its ID, so resolving an
//! audience takes a Resource Manager lookup in addition to the Compute Engine
//! discovery.

use crate::error::{Error, Result};

/// Returns true if `keyword` appears in `name`, ignoring case.
pub fn matches_keyword(name: &str, keyword: &str) -> bool {
    name.to_lowercase().contains(&keyword.to_lowercase())
}

/// Extracts the project number from a Resource Manager project name.
///
/// Resource Manager always returns names in the `projects/{number}` form,
/// even when the request used the project ID.
pub fn project_number_from_name(name: &str) -> Result<String> {
    match name.split('/').collect::<Vec<_>>().as_slice() {
        ["projects", number] if !number.is_empty() && number.bytes().all(|b| b.is_ascii_digit()) => {
            Ok(number.to_string())
        }
        _ => Err(Error::ProjectName(name.to_string())),
    }
}

/// The audience for a single global backend service.
pub fn backend_service_audience(project_number: &str, service_id: &str) -> String {
    format!("/projects/{project_number}/global/backendServices/{service_id}")
}

/// The audiences for each backend service, in discovery order.
pub fn expected_audiences<S>(project_number: &str, service_ids: &[S]) -> Vec<String>
where
    S: AsRef<str>,
{
    service_ids
        .iter()
        .map(|id| backend_service_audience(project_number, id.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("k8s1-ns1-jupyter-80", "ns1-jupyter", true)]
    #[test_case("K8S1-NS1-JUPYTER-80", "ns1-jupyter", true)]
    #[test_case("k8s1-ns1-jupyter-80", "NS1-Jupyter", true)]
    #[test_case("k8s1-ns2-jupyter-80", "ns1-jupyter", false)]
    #[test_case("k8s1-ns1-frontend-80", "ns1-jupyter", false)]
    fn keyword(name: &str, keyword: &str, want: bool) {
        assert_eq!(matches_keyword(name, keyword), want, "{name} {keyword}");
    }

    #[test]
    fn project_number() -> anyhow::Result<()> {
        assert_eq!(project_number_from_name("projects/123456789")?, "123456789");
        Ok(())
    }

    #[test_case("")]
    #[test_case("projects/")]
    #[test_case("projects/my-project")]
    #[test_case("folders/123")]
    #[test_case("projects/123/locations/global")]
    fn bad_project_name(input: &str) {
        let got = project_number_from_name(input);
        assert!(matches!(got, Err(Error::ProjectName(ref n)) if n == input), "{got:?}");
    }

    #[test]
    fn audience() {
        assert_eq!(
            backend_service_audience("123", "456"),
            "/projects/123/global/backendServices/456"
        );
    }

    #[test]
    fn audiences_keep_order() {
        let got = expected_audiences("123", &["9", "7"]);
        assert_eq!(
            got,
            vec![
                "/projects/123/global/backendServices/9",
                "/projects/123/global/backendServices/7",
            ]
        );
        assert!(expected_audiences::<&str>("123", &[]).is_empty());
    }
}
