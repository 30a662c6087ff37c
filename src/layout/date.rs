//! Date formatting for label content.
//!
//! | Input | Grammar | Output |
//! |-------|---------|--------|
//! | drink `date_time` | `July 06 2025 12:40 PM` | `Jul 06, 2025` + `12:40 PM` |
//! | pantry `date` | `2025-07-06` | `Jul 6, 2025` |
//! | shopping stamp | local time | `Jul 06, 2025 at 12:40 PM` |
//!
//! Nothing here fails a job. Unparsable input comes back as `None` or
//! verbatim and the caller prints a marker or the raw text.

use chrono::NaiveDateTime;
use tracing::warn;

const ORDER_TIME_FORMAT: &str = "%B %d %Y %I:%M %p";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Short date and clock time of a drink order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTime {
    pub date: String,
    pub time: String,
}

/// Parse `"<Month> <DD> <YYYY> <hh>:<mm> <AM|PM>"`.
///
/// ```
/// use labelpress::layout::parse_order_time;
///
/// let t = parse_order_time("July 06 2025 12:40 PM").unwrap();
/// assert_eq!(t.date, "Jul 06, 2025");
/// assert_eq!(t.time, "12:40 PM");
/// ```
pub fn parse_order_time(raw: &str) -> Option<OrderTime> {
    match NaiveDateTime::parse_from_str(raw.trim(), ORDER_TIME_FORMAT) {
        Ok(dt) => Some(OrderTime {
            date: dt.format("%b %d, %Y").to_string(),
            time: dt.format("%I:%M %p").to_string(),
        }),
        Err(e) => {
            warn!(input = raw, error = %e, "date formatting error");
            None
        }
    }
}

/// Reformat an ISO `YYYY-MM-DD` date as `Mon D, YYYY`.
///
/// Only input of exactly that shape with a month in 1..=12 is rewritten;
/// anything else is returned as given.
///
/// ```
/// use labelpress::layout::format_iso_date;
///
/// assert_eq!(format_iso_date("2025-07-06"), "Jul 6, 2025");
/// assert_eq!(format_iso_date("next week"), "next week");
/// ```
pub fn format_iso_date(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() != 10 || chars[4] != '-' || chars[7] != '-' {
        return raw.to_string();
    }

    let year: String = chars[0..4].iter().collect();
    let month: String = chars[5..7].iter().collect();
    let day: String = chars[8..10].iter().collect();

    match (month.parse::<usize>(), day.parse::<u32>()) {
        (Ok(m @ 1..=12), Ok(d)) => format!("{} {}, {}", MONTHS[m - 1], d, year),
        _ => raw.to_string(),
    }
}

/// `Generated:` stamp on shopping lists.
pub fn generated_stamp(at: NaiveDateTime) -> String {
    at.format("%b %d, %Y at %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_order_time_morning() {
        let t = parse_order_time("January 15 2024 09:05 AM").unwrap();
        assert_eq!(t.date, "Jan 15, 2024");
        assert_eq!(t.time, "09:05 AM");
    }

    #[test]
    fn test_order_time_rejects_other_shapes() {
        assert!(parse_order_time("2025-07-06 12:40").is_none());
        assert!(parse_order_time("July 06 2025").is_none());
        assert!(parse_order_time("").is_none());
    }

    #[test]
    fn test_iso_date_drops_leading_zero_day() {
        assert_eq!(format_iso_date("2024-12-01"), "Dec 1, 2024");
        assert_eq!(format_iso_date("2024-02-29"), "Feb 29, 2024");
    }

    #[test]
    fn test_iso_date_bad_month_verbatim() {
        assert_eq!(format_iso_date("2024-13-01"), "2024-13-01");
        assert_eq!(format_iso_date("2024-00-01"), "2024-00-01");
        assert_eq!(format_iso_date("2024-1a-01"), "2024-1a-01");
    }

    #[test]
    fn test_iso_date_wrong_shape_verbatim() {
        assert_eq!(format_iso_date("2024/12/01"), "2024/12/01");
        assert_eq!(format_iso_date("24-12-01"), "24-12-01");
        assert_eq!(format_iso_date(""), "");
    }

    #[test]
    fn test_generated_stamp() {
        let at = NaiveDate::from_ymd_opt(2025, 7, 6)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        assert_eq!(generated_stamp(at), "Jul 06, 2025 at 02:05 PM");
    }
}
