use chrono::{DateTime, Local};

use super::series::DailyReports;
use super::summary::Summaries;
use crate::range::DateRange;
use crate::stats;

// ---------------------------------------------------------------------------
// Report — Everything the renderers consume
// ---------------------------------------------------------------------------

/// A finished report for one space and date range.
///
/// Built once and handed to every renderer by shared reference; there is no
/// way to change it after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    space_id: u64,
    range: DateRange,
    generated_at: DateTime<Local>,
    series: DailyReports,
    summaries: Summaries,
}

impl Report {
    /// Build a report from normalized series, computing the summaries.
    pub fn new(
        space_id: u64,
        range: DateRange,
        series: DailyReports,
        generated_at: DateTime<Local>,
    ) -> Self {
        let summaries = Summaries {
            gmv: stats::summarize(&series.daily_gmv),
            gross_revenue: stats::summarize(&series.daily_gross_revenue),
            booking_count: stats::summarize(&series.daily_booking_count),
        };
        Self {
            space_id,
            range,
            generated_at,
            series,
            summaries,
        }
    }

    pub fn space_id(&self) -> u64 {
        self.space_id
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn generated_at(&self) -> DateTime<Local> {
        self.generated_at
    }

    pub fn series(&self) -> &DailyReports {
        &self.series
    }

    pub fn summaries(&self) -> &Summaries {
        &self.summaries
    }
}
