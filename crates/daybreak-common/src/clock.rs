use chrono::{DateTime, Utc};

/// UTC time source. Injected so invocations are testable at fixed hours.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current hour as the zero-padded two-digit tag value (`"00"`..`"23"`).
    fn hour_tag(&self) -> String {
        self.now().format("%H").to_string()
    }

    /// Millisecond epoch, used for log identifiers and archive keys.
    fn epoch_ms(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant, for tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(ts: DateTime<Utc>) -> Self {
        Self(ts)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn hour_tag_is_zero_padded() {
        let clock = FixedClock::at(Utc.with_ymd_and_hms(2024, 5, 1, 3, 15, 0).unwrap());
        assert_eq!(clock.hour_tag(), "03");

        let clock = FixedClock::at(Utc.with_ymd_and_hms(2024, 5, 1, 23, 0, 0).unwrap());
        assert_eq!(clock.hour_tag(), "23");
    }

    #[test]
    fn epoch_ms_matches_instant() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 3, 15, 0).unwrap();
        assert_eq!(FixedClock::at(ts).epoch_ms(), ts.timestamp_millis());
    }
}
