//! Per-metric summary statistics.

use crate::models::{MetricSummary, Series};

/// Numeric types a [`Series`] can be summarized over.
pub trait MetricValue: Copy + PartialOrd + Default + std::iter::Sum<Self> {
    fn to_f64(self) -> f64;
}

impl MetricValue for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

impl MetricValue for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// Summarize one series.
///
/// The average divides by the number of dates in the series, which for a
/// normalized series is the number of days in the range and never zero.
/// Zeros take part in the maximum and minimum; only strictly positive values
/// count as days with data.
pub fn summarize<T: MetricValue>(series: &Series<T>) -> MetricSummary<T> {
    let total: T = series.values().sum();
    let days = series.len() as f64;

    let mut values = series.values();
    let first = values.next().unwrap_or_default();
    let (minimum, maximum) = values.fold((first, first), |(min, max), v| {
        (
            if v < min { v } else { min },
            if v > max { v } else { max },
        )
    });

    MetricSummary {
        total,
        average: total.to_f64() / days,
        maximum,
        minimum,
        days_with_data: series.values().filter(|v| *v > T::default()).count(),
    }
}
