//! ISO-8601 parsing for request date fields
//!
//! Clients send dates as strings. RFC 3339 (`2024-02-20T10:00:00Z`), naive
//! datetimes without an offset (`2024-02-20T10:00:00`), and bare dates
//! (`2024-02-20`, read as midnight) are accepted; values without an offset
//! are interpreted as UTC. Anything else is `InvalidInput`.

use crate::errors::{ClinicError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Parse an ISO-8601 datetime string into UTC
pub fn parse_iso_datetime(field: &str, value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    Err(ClinicError::invalid_input(format!(
        "{field} must be an ISO-8601 datetime (e.g. 2024-02-20T10:00:00Z)"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn accepts_rfc3339() {
        let dt = parse_iso_datetime("appointment_date", "2024-02-20T10:00:00Z").unwrap();
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn accepts_naive_datetime_as_utc() {
        let dt = parse_iso_datetime("appointment_date", "2024-02-20T10:00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-02-20T10:00:00+00:00");
    }

    #[test]
    fn rejects_garbage_with_field_name() {
        let err = parse_iso_datetime("test_date", "next tuesday").unwrap_err();
        assert!(matches!(err, ClinicError::InvalidInput { .. }));
        assert!(err.to_string().contains("test_date"));
    }

    #[test]
    fn accepts_bare_date_as_midnight_utc() {
        let dt = parse_iso_datetime("test_date", "2024-02-20").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-02-20T00:00:00+00:00");
    }
}
