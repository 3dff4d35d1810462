//! Timestamp utilities

use chrono::{DateTime, Local, NaiveDateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current wall-clock time in the server's local timezone, without offset.
///
/// Packed profile dates carry no timezone; they are compared against this.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Whole seconds elapsed since `since`, clamped at zero
pub fn seconds_since(since: DateTime<Utc>) -> u64 {
    now().signed_duration_since(since).num_seconds().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // After 2000-01-01 00:00:00 UTC
        assert!(timestamp.timestamp() > 946_684_800);
    }

    #[test]
    fn test_local_now_is_recent() {
        let local = local_now();
        assert!(local.and_utc().timestamp() > 946_684_800);
    }

    #[test]
    fn test_seconds_since_past() {
        let start = now() - Duration::seconds(90);
        let elapsed = seconds_since(start);
        assert!((90..=91).contains(&elapsed));
    }

    #[test]
    fn test_seconds_since_future_clamps_to_zero() {
        let start = now() + Duration::seconds(3600);
        assert_eq!(seconds_since(start), 0);
    }
}
