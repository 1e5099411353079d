//! Live smoke test against the real reporting API.
//!
//! Needs `HOTEL_REPORTS_API_KEY` and `HOTEL_REPORTS_SPACE_ID` (and optionally
//! `HOTEL_REPORTS_BASE_URL`). Run with:
//! ```sh
//! cargo test --test smoke_test -- --ignored --nocapture
//! ```

use hotel_reports::config::{API_KEY_ENV, BASE_URL_ENV};
use hotel_reports::render::{console, json, pdf};
use hotel_reports::{DateRange, Metric, ReportGenerator};

fn section(name: &str) {
    eprintln!("\n{}", "=".repeat(60));
    eprintln!("  {}", name);
    eprintln!("{}", "=".repeat(60));
}

fn check(label: &str, condition: bool, detail: &str) {
    let status = if condition { "PASS" } else { "FAIL" };
    eprintln!("  [{}] {} -- {}", status, label, detail);
    assert!(condition, "{}", label);
}

#[test]
#[ignore]
fn smoke_test() {
    let api_key = std::env::var(API_KEY_ENV).expect("HOTEL_REPORTS_API_KEY not set");
    let space_id: u64 = std::env::var("HOTEL_REPORTS_SPACE_ID")
        .expect("HOTEL_REPORTS_SPACE_ID not set")
        .parse()
        .expect("HOTEL_REPORTS_SPACE_ID must be a number");

    let mut builder = ReportGenerator::builder().api_key(api_key);
    if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
        builder = builder.base_url(base_url);
    }
    let generator = builder.build().unwrap();
    eprintln!("{}", generator);

    section("Fetch");
    let today = chrono::Local::now().date_naive();
    let range = DateRange::new(today - chrono::Days::new(13), today).unwrap();
    let report = generator.generate(space_id, range).unwrap();
    check(
        "one entry per day",
        report.series().daily_gmv.len() == range.len(),
        &format!("{} days", range.len()),
    );

    section("Summaries");
    for metric in Metric::ALL {
        let s = report.summaries().get(metric);
        check(
            metric.display_name(),
            s.days_with_data <= range.len(),
            &format!("total={} avg={:.2} days_with_data={}", s.total, s.average, s.days_with_data),
        );
    }

    section("Outputs");
    let dir = tempfile::tempdir().unwrap();
    eprintln!("{}", console::render(&report));
    json::write(&report, &dir.path().join("report.json")).unwrap();
    pdf::write(&report, &dir.path().join("report.pdf")).unwrap();
    check("json written", dir.path().join("report.json").is_file(), "");
    check("pdf written", dir.path().join("report.pdf").is_file(), "");
}
