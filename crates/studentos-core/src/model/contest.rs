use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::codec::deserialize_flexible_datetime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Codeforces,
    Codechef,
    Atcoder,
    Leetcode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: String,
    pub name: String,
    pub platform: Platform,
    /// Coerced on load: RFC 3339 text, a bare date, or epoch milliseconds.
    #[serde(deserialize_with = "deserialize_flexible_datetime")]
    pub start_time: DateTime<Utc>,
    /// Length in minutes.
    pub duration: u32,
    #[serde(default)]
    pub registered: bool,
    #[serde(default)]
    pub participated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problems_solved: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestDraft {
    pub name: String,
    pub platform: Platform,
    pub start_time: DateTime<Utc>,
    pub duration: u32,
    #[serde(default)]
    pub registered: bool,
    #[serde(default)]
    pub participated: bool,
    #[serde(default)]
    pub url: Option<String>,
}

impl ContestDraft {
    pub fn new(name: impl Into<String>, platform: Platform, start_time: DateTime<Utc>, duration: u32) -> Self {
        Self {
            name: name.into(),
            platform,
            start_time,
            duration,
            registered: false,
            participated: false,
            url: None,
        }
    }

    pub(crate) fn into_contest(self, id: String) -> Contest {
        Contest {
            id,
            name: self.name,
            platform: self.platform,
            start_time: self.start_time,
            duration: self.duration,
            registered: self.registered,
            participated: self.participated,
            rank: None,
            problems_solved: None,
            url: self.url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn start_time_accepts_epoch_millis() {
        let json = r#"{"id":"cf-1","name":"Div 2","platform":"codeforces",
            "startTime":1709467200000,"duration":120}"#;
        let contest: Contest = serde_json::from_str(json).unwrap();
        assert_eq!(contest.start_time, Utc.with_ymd_and_hms(2024, 3, 3, 12, 0, 0).unwrap());
        assert!(!contest.participated);
    }

    #[test]
    fn start_time_accepts_rfc3339_with_offset() {
        let json = r#"{"id":"cc-1","name":"Starters","platform":"codechef",
            "startTime":"2024-03-06T20:00:00+05:30","duration":120}"#;
        let contest: Contest = serde_json::from_str(json).unwrap();
        assert_eq!(contest.start_time, Utc.with_ymd_and_hms(2024, 3, 6, 14, 30, 0).unwrap());
    }
}
