//! Record timestamps.
//!
//! Stores keep timestamps to the microsecond, so every timestamp is cut to
//! that precision before it is handed out or written.

use chrono::{DateTime, SubsecRound, Utc};

/// Fractional-second digits kept on record timestamps.
pub const PRECISION: u16 = 6;

/// The current time at record precision.
pub fn now() -> DateTime<Utc> {
    truncate(Utc::now())
}

/// Drops digits below record precision.
pub fn truncate(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(PRECISION)
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn test_truncate_keeps_microseconds() {
        let ts = DateTime::parse_from_rfc3339("2024-05-01T09:00:00.123456789Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(truncate(ts).nanosecond(), 123_456_000);
        assert_eq!(truncate(truncate(ts)), truncate(ts));
        assert_eq!(now().nanosecond() % 1_000, 0);
    }
}
