//! Console, JSON and PDF renderers.

mod common;

use std::fs;

use common::{date, fixed_timestamp, range, scenario_a_report};
use hotel_reports::error::exit_code;
use hotel_reports::fetcher::parse_envelope;
use hotel_reports::models::RawMetrics;
use hotel_reports::normalize::normalize;
use hotel_reports::render::{console, json, pdf};
use hotel_reports::{Report, ReportError};
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

#[test]
fn console_lists_every_day_and_totals() {
    let text = console::render(&scenario_a_report());

    assert!(text.contains("DAILY REPORTS: 2024-01-01 to 2024-01-03"));
    assert!(text.contains("DAILY GMV (Total Book Price)"));
    assert!(text.contains("2024-01-01: $1,250.00"));
    assert!(text.contains("2024-01-02: $0.00"));
    assert!(text.contains("TOTAL GMV: $1,250.00"));
    assert!(text.contains("DAILY GROSS REVENUE"));
    assert!(text.contains("TOTAL GROSS REVENUE: $1,100.00"));
    assert!(text.contains("2024-01-01: 5 bookings"));
    assert!(text.contains("2024-01-03: 0 bookings"));
    assert!(text.contains("TOTAL BOOKINGS: 5"));
}

#[test]
fn console_blocks_follow_metric_order() {
    let text = console::render(&scenario_a_report());
    let gmv = text.find("DAILY GMV").unwrap();
    let gross = text.find("DAILY GROSS REVENUE").unwrap();
    let bookings = text.find("DAILY BOOKING COUNT").unwrap();
    assert!(gmv < gross && gross < bookings);
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[test]
fn json_has_the_documented_shape() {
    let value: serde_json::Value =
        serde_json::from_str(&json::to_string(&scenario_a_report()).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "daily_gmv": {"2024-01-01": 1250.0, "2024-01-02": 0.0, "2024-01-03": 0.0},
            "daily_gross_revenue": {"2024-01-01": 1100.0, "2024-01-02": 0.0, "2024-01-03": 0.0},
            "daily_booking_count": {"2024-01-01": 5, "2024-01-02": 0, "2024-01-03": 0}
        })
    );
}

#[test]
fn json_round_trip_preserves_series() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    let report = scenario_a_report();

    json::write(&report, &path).unwrap();
    let read_back = json::read(&path).unwrap();

    assert_eq!(&read_back, report.series());
    assert_eq!(read_back.daily_booking_count.get(date(2024, 1, 1)), Some(5));
}

#[test]
fn json_write_to_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("report.json");
    let err = json::write(&scenario_a_report(), &path).unwrap_err();
    assert!(matches!(err, hotel_reports::ReportError::Io { .. }), "{:?}", err);
    assert!(!path.exists());
}

// ---------------------------------------------------------------------------
// PDF
// ---------------------------------------------------------------------------

#[test]
fn pdf_is_written_as_a_complete_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");

    pdf::write(&scenario_a_report(), &path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(64)..]).into_owned();
    assert!(tail.contains("%%EOF"));

    // Only the final file remains; the temporary one was renamed.
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn summary_rows_format_money_and_counts() {
    let rows = pdf::summary_rows(&scenario_a_report());
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows[0],
        [
            "Daily Gmv".to_string(),
            "$1,250.00".to_string(),
            "$416.67".to_string(),
            "$1,250.00".to_string(),
            "$0.00".to_string(),
            "1".to_string(),
        ]
    );
    assert_eq!(rows[1][0], "Daily Gross Revenue");
    assert_eq!(rows[1][1], "$1,100.00");
    assert_eq!(
        rows[2],
        [
            "Daily Booking Count".to_string(),
            "5".to_string(),
            "1.7".to_string(),
            "5".to_string(),
            "0".to_string(),
            "1".to_string(),
        ]
    );
}

#[test]
fn pdf_of_huge_amounts_fails_cleanly() {
    let raw = parse_envelope(
        r#"{"Success": true, "Data": {"2024-01-01": {"no_of_booking": 1, "total_book_price": 1.7e308, "gross": 5}}}"#,
    )
    .unwrap();
    let range = range("2024-01-01", "2024-01-02");
    let report = Report::new(7, range, normalize(&range, &raw), fixed_timestamp());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    let err = pdf::write(&report, &path).unwrap_err();

    match &err {
        ReportError::Render(msg) => assert!(msg.contains("Daily GMV"), "{}", msg),
        other => panic!("expected Render, got {:?}", other),
    }
    assert_eq!(err.exit_code(), exit_code::RENDER);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn pdf_for_a_long_range_still_renders() {
    let range = range("2024-01-01", "2024-06-30");
    let raw: RawMetrics = range
        .iter()
        .map(|day| (hotel_reports::range::date_key(day), common::record(3, 12_345.0, 11_000.0)))
        .collect();
    let report = Report::new(7, range, normalize(&range, &raw), fixed_timestamp());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    pdf::write(&report, &path).unwrap();
    assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));
}
