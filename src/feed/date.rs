//! RFC-822 date normalization for `pubDate` and `lastBuildDate`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use super::types::FeedError;

/// Output format. Always rendered in UTC with the named `GMT` zone.
const RFC822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Zoned formats tried after RFC 2822 and RFC 3339.
const ZONED_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S %z", "%Y-%m-%d %H:%M:%S%z"];

/// Zoneless formats, interpreted as UTC.
const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A date value in any of the shapes accepted by [`normalize_date`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Free-form text, parsed on normalization.
    Text(String),
    /// Seconds since the unix epoch.
    Timestamp(i64),
    /// An already-structured instant.
    Instant(DateTime<Utc>),
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

impl From<&String> for DateInput {
    fn from(value: &String) -> Self {
        DateInput::Text(value.clone())
    }
}

impl From<i64> for DateInput {
    fn from(value: i64) -> Self {
        DateInput::Timestamp(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(value: DateTime<Tz>) -> Self {
        DateInput::Instant(value.with_timezone(&Utc))
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::Instant(value.and_utc())
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Instant(value.and_time(NaiveTime::MIN).and_utc())
    }
}

/// Converts a date into the RFC-822 form RSS requires, e.g.
/// `Tue, 14 Nov 2023 22:13:20 GMT`.
///
/// Strings are accepted as a unix timestamp (all digits), RFC 2822
/// (including obsolete zone names such as `GMT`), RFC 3339, or the
/// `YYYY-MM-DD[ HH:MM[:SS]]` family. Values without a zone are taken as UTC.
/// Feeding the output back in yields the same output.
///
/// # Errors
///
/// Returns [`FeedError::InvalidDate`] if the value cannot be read as an
/// instant, or if the instant falls outside years 0000 to 9999, which the
/// four-digit year field cannot represent.
///
/// # Examples
///
/// ```
/// use rssgen::feed::normalize_date;
///
/// let date = normalize_date("2023-11-14T23:13:20+01:00").unwrap();
/// assert_eq!(date, "Tue, 14 Nov 2023 22:13:20 GMT");
/// ```
pub fn normalize_date(input: impl Into<DateInput>) -> Result<String, FeedError> {
    let instant = match input.into() {
        DateInput::Instant(dt) => dt,
        DateInput::Timestamp(ts) => from_timestamp(ts, &ts.to_string())?,
        DateInput::Text(text) => parse_text(&text)?,
    };
    if !(0..=9999).contains(&instant.year()) {
        return Err(invalid(&instant.to_rfc3339()));
    }
    Ok(instant.format(RFC822_FORMAT).to_string())
}

fn from_timestamp(ts: i64, input: &str) -> Result<DateTime<Utc>, FeedError> {
    DateTime::from_timestamp(ts, 0).ok_or_else(|| invalid(input))
}

fn parse_text(text: &str) -> Result<DateTime<Utc>, FeedError> {
    let s = text.trim();
    if s.is_empty() {
        return Err(invalid(text));
    }

    if is_integer(s) {
        let ts: i64 = s.parse().map_err(|_| invalid(text))?;
        return from_timestamp(ts, text);
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(invalid(text))
}

fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn invalid(input: &str) -> FeedError {
    FeedError::InvalidDate {
        input: input.to_string(),
    }
}
