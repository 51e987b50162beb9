//! Displayed weather state.
//!
//! Every fetch takes a [`RequestToken`] before it starts; results are applied
//! only if no newer request has been issued since, so responses arriving out of
//! order never overwrite fresher data.

use serde::{Deserialize, Serialize};

use crate::{error::WeatherError, model::WeatherReport};

/// What happens to the displayed report when a fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Displayed report becomes absent.
    #[default]
    Clear,
    /// Last successful report stays on screen.
    KeepLastGood,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Clear => "clear",
            FailurePolicy::KeepLastGood => "keep-last-good",
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

#[derive(Debug)]
pub enum Applied {
    Updated,
    /// A newer request was issued; the result was dropped.
    Stale,
    Failed(WeatherError),
}

#[derive(Debug, Default)]
pub struct WeatherSession {
    policy: FailurePolicy,
    latest: u64,
    report: Option<WeatherReport>,
}

impl WeatherSession {
    pub fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    pub fn begin_request(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn apply(
        &mut self,
        token: RequestToken,
        result: Result<WeatherReport, WeatherError>,
    ) -> Applied {
        if token.0 != self.latest {
            tracing::debug!(
                token = token.0,
                latest = self.latest,
                "discarding stale weather result"
            );
            return Applied::Stale;
        }

        match result {
            Ok(report) => {
                self.report = Some(report);
                Applied::Updated
            }
            Err(err) => {
                tracing::warn!(error = %err, policy = ?self.policy, "weather fetch failed");
                if self.policy == FailurePolicy::Clear {
                    self.report = None;
                }
                Applied::Failed(err)
            }
        }
    }
}
