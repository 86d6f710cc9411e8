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

use anyhow::bail;
use iap_probe::{Outcome, Result, Target};

/// Prints the response bodies and fails if any check failed.
///
/// An endpoint that could not be reached is only a warning, a rejected or
/// unexpected response is a failure.
pub fn report(targets: &[Target], results: Vec<Result<Outcome>>) -> anyhow::Result<()> {
    let mut failures = 0;
    for (target, result) in targets.iter().zip(results) {
        match result {
            Ok(outcome) => match outcome.body {
                Some(body) => println!("{body}"),
                None => tracing::warn!("{} was not reachable at {}", target.service, target.url),
            },
            Err(e) => {
                tracing::error!("{} at {}: {e:?}", target.service, target.url);
                failures += 1;
            }
        }
    }
    if failures != 0 {
        bail!("{failures} of {} IAP checks failed", targets.len());
    }
    Ok(())
}
