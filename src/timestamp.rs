//! Timestamps stamped onto records by the server, and dates shown on the
//! dashboard.

use time::{
    Date, OffsetDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::Error;

const ISO_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");
const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[month]/[day]/[year]");

/// The current UTC time as an RFC 3339 string, e.g. "2025-03-14T09:26:53.589Z".
pub fn now_rfc3339() -> Result<String, Error> {
    format_rfc3339(OffsetDateTime::now_utc())
}

/// Format `date_time` as an RFC 3339 string.
pub fn format_rfc3339(date_time: OffsetDateTime) -> Result<String, Error> {
    date_time
        .format(&Rfc3339)
        .map_err(|error| Error::InvalidTimestamp(error.to_string()))
}

/// Parse the "YYYY-MM-DD" date at the start of `value`.
///
/// Accepts plain dates and full timestamps such as "2025-07-04T10:00:00Z".
pub fn parse_date_prefix(value: &str) -> Option<Date> {
    Date::parse(value.get(..10)?, ISO_DATE_FORMAT).ok()
}

/// Show a stored date or timestamp as MM/DD/YYYY.
///
/// Values that do not start with a date are shown as they are.
pub fn display_date(value: &str) -> String {
    parse_date_prefix(value)
        .and_then(|date| date.format(DISPLAY_DATE_FORMAT).ok())
        .unwrap_or_else(|| value.to_owned())
}
