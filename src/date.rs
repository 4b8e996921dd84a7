//! `Date` header lookup and lenient date parsing
//!
//! Only the wall-clock time of day as written in the header is kept; no
//! timezone conversion happens.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use mailparse::MailHeaderMap;
use regex::Regex;
use tracing::debug;

// RFC 5322 field name followed by a colon
static HEADER_LINE_REGEX: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"^[!-9;-~]+:").unwrap());

// "+01:00", "-5", "GMT+01:00", "UTC-0330"
static OFFSET_REGEX: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^(?i:gmt|utc|ut)?([+-])(\d{1,2}):?(\d{2})?$").unwrap()
});

const DATE_PARTS: [&str; 6] = [
    "%d %B %Y",
    "%B %d %Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%B-%Y",
];

const TIME_PARTS: [&str; 4] = ["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// Every `<date> <time> [<offset>]` combination, plus ISO and ctime layouts
static DATETIME_FORMATS: std::sync::LazyLock<Vec<String>> = std::sync::LazyLock::new(|| {
    let mut formats = vec![
        "%Y-%m-%dT%H:%M:%S%z".to_string(),
        "%Y-%m-%dT%H:%M:%S".to_string(),
        "%B %d %H:%M:%S %Y".to_string(),
    ];
    for date in DATE_PARTS {
        for time in TIME_PARTS {
            formats.push(format!("{date} {time} %z"));
            formats.push(format!("{date} {time}"));
        }
    }
    formats
});

/// Extract the `HH:MM` time of day from the `Date` header of a raw message
///
/// Returns `None` when the header block cannot be read, when there is no
/// `Date` header, or when its value is not a recognizable date.
#[must_use]
pub fn sent_time(raw: &str) -> Option<String> {
    let date = date_header(raw)?;
    let time = parse_time_of_day(&date);
    if time.is_none() {
        debug!(date = %date, "Unparseable Date header");
    }
    time.map(|t| t.format("%H:%M").to_string())
}

/// Value of the first `Date` header, if any
///
/// A leading mbox `From ` line is skipped. If the next line is not a
/// `Name: value` header the message has no header block at all.
#[must_use]
pub fn date_header(raw: &str) -> Option<String> {
    let block = if raw.starts_with("From ") {
        raw.find('\n').map_or("", |i| &raw[i + 1..])
    } else {
        raw
    };
    if !HEADER_LINE_REGEX.is_match(block) {
        return None;
    }

    let (headers, _) = mailparse::parse_headers(block.as_bytes()).ok()?;
    headers
        .get_first_value("Date")
        .filter(|v| !v.trim().is_empty())
}

/// Parse a free-form date string and keep its time of day
#[must_use]
pub fn parse_time_of_day(date_str: &str) -> Option<NaiveTime> {
    parse_datetime(date_str).map(|dt| dt.time())
}

/// Parse a date string in any of the common email formats
///
/// The result is the local date-time as written, offsets are dropped.
#[must_use]
pub fn parse_datetime(date_str: &str) -> Option<NaiveDateTime> {
    let trimmed = date_str.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.naive_local());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_local());
    }

    let candidate =
        collapse_whitespace(&strip_comments(&strip_day_of_week(trimmed)).replace(',', " "));
    if let Some(dt) = parse_with_formats(&candidate) {
        return Some(dt);
    }

    parse_with_formats(&normalize_zone(&candidate))
}

fn parse_with_formats(candidate: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FORMATS.iter() {
        if let Ok(dt) = DateTime::parse_from_str(candidate, fmt) {
            return Some(dt.naive_local());
        }
        if let Ok(ndt) = NaiveDateTime::parse_from_str(candidate, fmt) {
            return Some(ndt);
        }
    }

    // A bare date carries no time, which reads as midnight
    DATE_PARTS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(candidate, fmt).ok())
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Drop a leading day-of-week such as `Tue, ` or `Tuesday `
fn strip_day_of_week(s: &str) -> String {
    const DAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

    let first = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .next()
        .unwrap_or_default();
    let lower = first.to_lowercase();
    let is_day = lower.len() >= 3
        && DAYS.iter().any(|d| lower.starts_with(d))
        && lower.chars().all(|c| c.is_ascii_alphabetic());

    if is_day {
        s[first.len()..]
            .trim_start_matches(|c: char| c == ',' || c.is_whitespace())
            .to_string()
    } else {
        s.to_string()
    }
}

/// Remove parenthesized comments such as `(PST)`
fn strip_comments(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut depth = 0usize;
    for c in s.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => result.push(c),
            _ => {}
        }
    }
    result
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rewrite a trailing zone into a `+hhmm` offset
///
/// Handles abbreviations (`EST`), prefixed or colon offsets (`GMT+01:00`,
/// `+5`) and an unsigned four-digit offset directly after the time
/// (`19:26:58 0000`).
fn normalize_zone(s: &str) -> String {
    const ZONES: [(&str, &str); 11] = [
        ("UT", "+0000"),
        ("UTC", "+0000"),
        ("GMT", "+0000"),
        ("EST", "-0500"),
        ("EDT", "-0400"),
        ("CST", "-0600"),
        ("CDT", "-0500"),
        ("MST", "-0700"),
        ("MDT", "-0600"),
        ("PST", "-0800"),
        ("PDT", "-0700"),
    ];

    let Some((head, last)) = s.rsplit_once(' ') else {
        return s.to_string();
    };

    if let Some((_, offset)) = ZONES.iter().find(|(name, _)| last.eq_ignore_ascii_case(name)) {
        return format!("{head} {offset}");
    }

    if let Some(caps) = OFFSET_REGEX.captures(last) {
        let hours: u32 = caps[2].parse().unwrap_or_default();
        let minutes = caps.get(3).map_or("00", |m| m.as_str());
        return format!("{head} {}{hours:02}{minutes}", &caps[1]);
    }

    let follows_time = head
        .rsplit(' ')
        .next()
        .is_some_and(|token| token.contains(':'));
    if follows_time && last.len() == 4 && last.chars().all(|c| c.is_ascii_digit()) {
        return format!("{head} +{last}");
    }

    s.to_string()
}
