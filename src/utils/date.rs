//! Publication date parsing and formatting.
//!
//! Frontmatter dates come in whatever shape the author typed; everything is
//! normalized to a UTC timestamp and rendered back in the RFC 2822 form
//! feed readers expect.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date-only layouts, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

/// Date-time layouts without an offset, read as UTC.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Parse a frontmatter date.
///
/// Accepts RFC 3339, RFC 2822, the layouts in [`DATETIME_FORMATS`] (UTC)
/// and [`DATE_FORMATS`] (midnight UTC).
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Format as RFC 2822 with a `GMT` zone: `Fri, 08 Jul 2022 00:00:00 GMT`.
pub fn to_rfc2822(dt: &DateTime<Utc>) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_parse_date_only() {
        assert_eq!(parse_date("2022-07-08"), Some(utc(2022, 7, 8, 0, 0, 0)));
        assert_eq!(parse_date("2022/07/08"), Some(utc(2022, 7, 8, 0, 0, 0)));
    }

    #[test]
    fn test_parse_month_name_layouts() {
        let expected = Some(utc(2022, 7, 8, 0, 0, 0));
        assert_eq!(parse_date("Jul 08 2022"), expected);
        assert_eq!(parse_date("Jul 08, 2022"), expected);
        assert_eq!(parse_date("July 08 2022"), expected);
        assert_eq!(parse_date("July 8, 2022"), expected);
        assert_eq!(parse_date("08 Jul 2022"), expected);
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        assert_eq!(
            parse_date("2024-01-01T10:00:00+02:00"),
            Some(utc(2024, 1, 1, 8, 0, 0))
        );
        assert_eq!(
            parse_date("2024-01-01T00:00:00Z"),
            Some(utc(2024, 1, 1, 0, 0, 0))
        );
    }

    #[test]
    fn test_parse_rfc2822() {
        assert_eq!(
            parse_date("Fri, 08 Jul 2022 12:30:00 GMT"),
            Some(utc(2022, 7, 8, 12, 30, 0))
        );
    }

    #[test]
    fn test_parse_naive_datetime() {
        assert_eq!(
            parse_date("2023-03-04T05:06:07"),
            Some(utc(2023, 3, 4, 5, 6, 7))
        );
        assert_eq!(
            parse_date(" 2023-03-04 05:06:07 "),
            Some(utc(2023, 3, 4, 5, 6, 7))
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2023-02-30"), None);
        assert_eq!(parse_date("2023-13-01"), None);
    }

    #[test]
    fn test_to_rfc2822() {
        assert_eq!(
            to_rfc2822(&utc(2022, 7, 8, 0, 0, 0)),
            "Fri, 08 Jul 2022 00:00:00 GMT"
        );
        assert_eq!(
            to_rfc2822(&utc(2024, 2, 29, 23, 59, 59)),
            "Thu, 29 Feb 2024 23:59:59 GMT"
        );
    }

    #[test]
    fn test_rfc2822_roundtrips_through_parser() {
        let dt = utc(2021, 12, 31, 18, 45, 0);
        assert_eq!(parse_date(&to_rfc2822(&dt)), Some(dt));
    }
}
