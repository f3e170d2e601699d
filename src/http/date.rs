//! HTTP-date handling for `Last-Modified` and `If-Modified-Since`

use chrono::{DateTime, Timelike, Utc};
use std::time::SystemTime;

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(HTTP_DATE_FORMAT).to_string()
}

/// Parse an HTTP-date, accepting only dates in UTC
///
/// Dates with a non-zero offset are rejected rather than converted, so a
/// conditional request carrying one is served in full.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc2822(value.trim()).ok()?;
    if parsed.offset().local_minus_utc() != 0 {
        return None;
    }
    Some(parsed.with_timezone(&Utc))
}

/// Modification time at the one-second resolution HTTP-dates carry
pub fn truncate_to_seconds(time: SystemTime) -> DateTime<Utc> {
    let time = DateTime::<Utc>::from(time);
    time.with_nanosecond(0).unwrap_or(time)
}

/// Whether a resource modified at `modified` is unchanged since `if_modified_since`
pub fn not_modified_since(modified: SystemTime, if_modified_since: &str) -> bool {
    parse_http_date(if_modified_since)
        .is_some_and(|since| truncate_to_seconds(modified) <= since)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // Sun, 06 Nov 1994 08:49:37 GMT
    const EPOCH_SECS: u64 = 784_111_777;

    fn sample_time() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(EPOCH_SECS)
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(
            format_http_date(sample_time()),
            "Sun, 06 Nov 1994 08:49:37 GMT"
        );
    }

    #[test]
    fn test_parse_round_trip() {
        let parsed = parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT").unwrap();
        assert_eq!(parsed, DateTime::<Utc>::from(sample_time()));
    }

    #[test]
    fn test_parse_rejects_offsets_and_garbage() {
        assert!(parse_http_date("Sun, 06 Nov 1994 10:49:37 +0200").is_none());
        assert!(parse_http_date("yesterday").is_none());
        assert!(parse_http_date("").is_none());
    }

    #[test]
    fn test_not_modified_since_ignores_subsecond_mtime() {
        let modified = sample_time() + Duration::from_millis(750);
        assert!(not_modified_since(modified, "Sun, 06 Nov 1994 08:49:37 GMT"));
        assert!(not_modified_since(modified, "Sun, 06 Nov 1994 09:00:00 GMT"));
        assert!(!not_modified_since(modified, "Sun, 06 Nov 1994 08:49:36 GMT"));
        assert!(!not_modified_since(modified, "not a date"));
    }
}
