//! Zero-fill normalization of fetched records over a date range.

use tracing::debug;

use crate::models::{DailyRecord, DailyReports, RawMetrics};
use crate::range::{date_key, DateRange};

/// Merge the fetched entries with every date of `range`.
///
/// A date with no entry becomes an all-zero record; an entry missing some
/// fields gets zero for just those fields. Entries whose key is not a date of
/// the range are ignored. The result holds exactly one value per date of the
/// range in each series.
pub fn normalize(range: &DateRange, raw: &RawMetrics) -> DailyReports {
    let mut matched = 0usize;
    let records = range.iter().map(|date| match raw.get(&date_key(date)) {
        Some(entry) => {
            matched += 1;
            DailyRecord::from_raw(date, entry)
        }
        None => DailyRecord::zero(date),
    });
    let reports = DailyReports::from_records(records);

    let ignored = raw.len() - matched;
    if ignored > 0 {
        debug!(ignored, "ignored entries outside {}", range);
    }
    debug!(
        days = range.len(),
        with_entries = matched,
        "normalized daily metrics"
    );
    reports
}
