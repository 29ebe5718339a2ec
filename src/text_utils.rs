use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::PostError;

const CET_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f %z CET";
const CEST_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f %z CEST";
const OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

// Anything at or below this is treated as a broken date, not a real post
const MIN_EPOCH_MILLIS: i64 = 1000;

/// Parses the `date` value of a post header.
///
/// The layout is chosen by the suffix of the value, first match wins:
/// `Z` is RFC 3339, `CET` and `CEST` use the `2006-01-02 15:04:05 +0100 CET`
/// layout and everything else must carry a `+01:00` style offset.
/// There is no fallback between layouts.
pub fn parse_post_date(buf: &str) -> Result<DateTime<FixedOffset>, PostError> {
    lazy_static! {
        static ref UTC_LAYOUT: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?Z$").unwrap();
        static ref CET_LAYOUT: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}(\.\d+)? [+-]\d{4} CET$").unwrap();
        static ref CEST_LAYOUT: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}(\.\d+)? [+-]\d{4} CEST$").unwrap();
        static ref OFFSET_LAYOUT: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?[+-]\d{2}:\d{2}$").unwrap();
    }

    // chrono is lenient about separators and offset widths, the layout is checked first
    let (layout, format): (&Regex, Option<&str>) = if buf.ends_with('Z') {
        (&*UTC_LAYOUT, None)
    } else if buf.ends_with("CET") {
        (&*CET_LAYOUT, Some(CET_FORMAT))
    } else if buf.ends_with("CEST") {
        (&*CEST_LAYOUT, Some(CEST_FORMAT))
    } else {
        (&*OFFSET_LAYOUT, Some(OFFSET_FORMAT))
    };

    if !layout.is_match(buf) {
        return Err(PostError::date_parse(buf, "date does not match the expected layout"));
    }

    let parsed = match format {
        None => DateTime::parse_from_rfc3339(buf),
        Some(format) => DateTime::parse_from_str(buf, format),
    };

    let date_time = parsed.map_err(|e| PostError::date_parse(buf, e))?;

    if date_time.timestamp_millis() < MIN_EPOCH_MILLIS {
        return Err(PostError::date_parse(buf, "date is too close to the epoch"));
    }

    Ok(date_time)
}

/// Formats the calendar day of the instant in its own offset, e.g. `2023-05-01`.
pub fn format_date(date_time: &DateTime<FixedOffset>) -> String {
    date_time.format("%Y-%m-%d").to_string()
}
