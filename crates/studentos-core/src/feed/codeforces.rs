//! Codeforces public API -- upcoming contests and user profiles.

use std::time::Duration;

use chrono::DateTime;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::FeedError;
use crate::model::{Contest, Platform};

pub const DEFAULT_BASE_URL: &str = "https://codeforces.com/api/";
const CONTEST_URL: &str = "https://codeforces.com/contest/";
const USER_AGENT: &str = "studentos";
const SERVICE: &str = "Codeforces";

/// Every Codeforces response is wrapped in `{status, comment?, result?}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: String,
    #[serde(default)]
    comment: Option<String>,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContest {
    id: u64,
    name: String,
    phase: String,
    duration_seconds: u64,
    #[serde(default)]
    start_time_seconds: Option<i64>,
    #[serde(default)]
    relative_time_seconds: Option<i64>,
}

/// Public profile of a Codeforces handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeforcesProfile {
    pub handle: String,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub max_rating: Option<i32>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub max_rank: Option<String>,
}

impl RawContest {
    /// Only contests that have not started yet.
    fn into_upcoming(self) -> Option<Contest> {
        if self.phase != "BEFORE" || self.relative_time_seconds.map_or(true, |s| s >= 0) {
            return None;
        }
        let start_time = DateTime::from_timestamp(self.start_time_seconds?, 0)?;
        Some(Contest {
            id: format!("cf-{}", self.id),
            name: self.name,
            platform: Platform::Codeforces,
            start_time,
            duration: (self.duration_seconds as f64 / 60.0).round() as u32,
            registered: false,
            participated: false,
            rank: None,
            problems_solved: None,
            url: Some(format!("{CONTEST_URL}{}", self.id)),
        })
    }
}

pub struct CodeforcesClient {
    client: Client,
    base_url: Url,
}

impl CodeforcesClient {
    /// Client for the public API.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, FeedError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Client against another API root (a mirror or a test server).
    ///
    /// # Errors
    /// Returns an error if `base_url` is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder().timeout(timeout).user_agent(USER_AGENT).build()?;
        Ok(Self { client, base_url })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, query: &[(&str, &str)]) -> Result<T, FeedError> {
        let url = self.base_url.join(method)?;
        debug!(%url, "calling Codeforces API");
        // failures come back as JSON with a non-2xx status, so the body is read either way
        let envelope: Envelope<T> = self.client.get(url).query(query).send().await?.json().await?;
        if envelope.status != "OK" {
            return Err(FeedError::Api {
                service: SERVICE,
                comment: envelope
                    .comment
                    .unwrap_or_else(|| format!("status {}", envelope.status)),
            });
        }
        envelope.result.ok_or_else(|| FeedError::NotFound(method.to_string()))
    }

    /// Contests that have not started, in API order, at most `limit`.
    ///
    /// # Errors
    /// Transport failures and non-OK API answers.
    pub async fn upcoming_contests(&self, limit: usize) -> Result<Vec<Contest>, FeedError> {
        let raw: Vec<RawContest> = self.call("contest.list", &[("gym", "false")]).await?;
        Ok(raw
            .into_iter()
            .filter_map(RawContest::into_upcoming)
            .take(limit)
            .collect())
    }

    /// Profile for `handle`.
    ///
    /// # Errors
    /// Transport failures, non-OK API answers, or an empty result.
    pub async fn user_info(&self, handle: &str) -> Result<CodeforcesProfile, FeedError> {
        let users: Vec<CodeforcesProfile> = self.call("user.info", &[("handles", handle)]).await?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| FeedError::NotFound(handle.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn raw(phase: &str, relative: i64) -> RawContest {
        RawContest {
            id: 1936,
            name: "Codeforces Round 930".into(),
            phase: phase.into(),
            duration_seconds: 7290,
            start_time_seconds: Some(1_709_467_200),
            relative_time_seconds: Some(relative),
        }
    }

    #[test]
    fn maps_upcoming_contest() {
        let contest = raw("BEFORE", -3600).into_upcoming().unwrap();
        assert_eq!(contest.id, "cf-1936");
        assert_eq!(contest.duration, 122);
        assert_eq!(contest.start_time, Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap());
        assert_eq!(contest.url.as_deref(), Some("https://codeforces.com/contest/1936"));
        assert_eq!(contest.platform, Platform::Codeforces);
    }

    #[test]
    fn skips_started_or_finished() {
        assert!(raw("CODING", -10).into_upcoming().is_none());
        assert!(raw("FINISHED", 5000).into_upcoming().is_none());
        assert!(raw("BEFORE", 0).into_upcoming().is_none());
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = CodeforcesClient::with_base_url("http://127.0.0.1:1/api", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url.join("user.info").unwrap().path(), "/api/user.info");
    }
}
