use chrono::NaiveTime;
use spam_features::date::{date_header, parse_datetime, parse_time_of_day, sent_time};

fn hm(h: u32, m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(h, m, 0)
}

// --- Header lookup ---

#[test]
fn test_date_header_found() {
    let raw = "From: a@example.com\nDate: Tue, 1 Jan 2020 13:45:00 +0000\n\nbody";
    assert_eq!(
        date_header(raw).as_deref(),
        Some("Tue, 1 Jan 2020 13:45:00 +0000")
    );
}

#[test]
fn test_date_header_case_insensitive() {
    let raw = "date: Wed, 01 Jan 2020 08:05:00 +0100\n\nbody";
    assert_eq!(sent_time(raw).as_deref(), Some("08:05"));
}

#[test]
fn test_date_header_missing() {
    assert!(date_header("Subject: hi\n\nbody").is_none());
    assert!(sent_time("Subject: hi\n\nbody").is_none());
    assert!(sent_time("").is_none());
}

#[test]
fn test_date_header_in_body_is_ignored() {
    let raw = "Subject: hi\n\nDate: Wed, 01 Jan 2020 08:05:00 +0000";
    assert!(sent_time(raw).is_none());
}

#[test]
fn test_date_header_needs_header_block() {
    let raw = "Hello there\nDate: Wed, 01 Jan 2020 08:05:00 +0000\n\nbody";
    assert!(date_header(raw).is_none());
    assert!(sent_time(raw).is_none());
}

#[test]
fn test_date_header_after_mbox_from_line() {
    let raw = "From alice@example.com Wed Jan  1 08:05:00 2020\nDate: Wed, 01 Jan 2020 08:05:00 +0000\n\nbody";
    assert_eq!(sent_time(raw).as_deref(), Some("08:05"));
}

// --- Lenient parsing ---

#[test]
fn test_parse_rfc2822() {
    assert_eq!(parse_time_of_day("Wed, 01 Jan 2020 13:45:00 +0000"), hm(13, 45));
}

#[test]
fn test_parse_wrong_weekday() {
    // 1 Jan 2020 was a Wednesday
    assert_eq!(parse_time_of_day("Tue, 1 Jan 2020 13:45:00 +0000"), hm(13, 45));
}

#[test]
fn test_parse_keeps_local_time() {
    assert_eq!(
        parse_time_of_day("Mon, 6 Jul 2020 9:03:00 -0700 (PDT)"),
        hm(9, 3)
    );
}

#[test]
fn test_parse_named_timezone() {
    assert_eq!(parse_time_of_day("14 Apr 2020 10:30:00 EST"), hm(10, 30));
}

#[test]
fn test_parse_rfc3339() {
    assert_eq!(parse_time_of_day("2020-01-01T23:59:00Z"), hm(23, 59));
}

#[test]
fn test_parse_without_seconds_or_zone() {
    assert_eq!(parse_time_of_day("Tuesday, 14 Apr 2020 10:30"), hm(10, 30));
}

#[test]
fn test_parse_date_only_is_midnight() {
    let dt = parse_datetime("1 Jan 2020").unwrap();
    assert_eq!(dt.time(), NaiveTime::MIN);
    assert_eq!(sent_time("Date: 1 Jan 2020\n\n").as_deref(), Some("00:00"));
}

#[test]
fn test_parse_garbage() {
    assert!(parse_time_of_day("not-a-date").is_none());
    assert!(parse_time_of_day("").is_none());
    assert!(parse_time_of_day("   ").is_none());
    assert!(sent_time("Date: not-a-date\n\nbody").is_none());
}

#[test]
fn test_parse_twelve_hour_clock() {
    assert_eq!(parse_time_of_day("January 1, 2020 1:45 PM"), hm(13, 45));
    assert_eq!(parse_time_of_day("1 Jan 2020 12:05 AM"), hm(0, 5));
    assert_eq!(
        sent_time("Date: January 1, 2020 1:45 PM\n\nbody").as_deref(),
        Some("13:45")
    );
}

#[test]
fn test_parse_month_first_with_comma() {
    assert_eq!(parse_time_of_day("Jan 1, 2020 13:45"), hm(13, 45));
}

#[test]
fn test_parse_slash_separated_date() {
    assert_eq!(parse_time_of_day("2020/01/01 13:45"), hm(13, 45));
    assert_eq!(parse_time_of_day("01/31/2020 07:00:00"), hm(7, 0));
}

#[test]
fn test_parse_unsigned_offset() {
    assert_eq!(parse_time_of_day("Tue, 20 Aug 2002 19:26:58 0000"), hm(19, 26));
}

#[test]
fn test_parse_prefixed_colon_offset() {
    assert_eq!(
        parse_time_of_day("Wed, 1 Jan 2020 13:45:00 GMT+01:00"),
        hm(13, 45)
    );
    assert_eq!(parse_time_of_day("1 Jan 2020 13:45 +5"), hm(13, 45));
}
