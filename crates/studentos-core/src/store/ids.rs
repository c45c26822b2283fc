use chrono::{DateTime, Utc};

/// Millisecond-timestamp IDs, strictly increasing within a process.
///
/// Two requests in the same millisecond get consecutive values instead of
/// colliding.
#[derive(Debug, Default)]
pub(crate) struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Never hand out an ID at or below any numeric ID already stored.
    pub fn observe<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        for id in ids {
            if let Ok(n) = id.parse::<i64>() {
                self.last = self.last.max(n);
            }
        }
    }

    pub fn next(&mut self, now: &DateTime<Utc>) -> String {
        self.last = now.timestamp_millis().max(self.last + 1);
        self.last.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn same_millisecond_bumps() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next(&now), "1700000000000");
        assert_eq!(ids.next(&now), "1700000000001");
    }

    #[test]
    fn observed_ids_are_skipped() {
        let now = Utc.timestamp_millis_opt(1_000).unwrap();
        let mut ids = IdGenerator::default();
        ids.observe(["5000", "cf-1234", "42"]);
        assert_eq!(ids.next(&now), "5001");
    }
}
