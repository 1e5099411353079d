use serde::{Deserialize, Serialize};

use super::series::Metric;

// ---------------------------------------------------------------------------
// MetricSummary — Aggregated statistics for one metric
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricSummary<T> {
    pub total: T,
    /// Total divided by the number of days in the range, not by the number
    /// of days with data.
    pub average: f64,
    pub maximum: T,
    pub minimum: T,
    pub days_with_data: usize,
}

// ---------------------------------------------------------------------------
// Summaries — One summary per metric
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summaries {
    pub gmv: MetricSummary<f64>,
    pub gross_revenue: MetricSummary<f64>,
    pub booking_count: MetricSummary<i64>,
}

impl Summaries {
    /// A metric's summary widened to `f64`.
    pub fn get(&self, metric: Metric) -> MetricSummary<f64> {
        match metric {
            Metric::Gmv => self.gmv,
            Metric::GrossRevenue => self.gross_revenue,
            Metric::BookingCount => MetricSummary {
                total: self.booking_count.total as f64,
                average: self.booking_count.average,
                maximum: self.booking_count.maximum as f64,
                minimum: self.booking_count.minimum as f64,
                days_with_data: self.booking_count.days_with_data,
            },
        }
    }
}
