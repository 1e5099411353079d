use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::record::DailyRecord;

// ---------------------------------------------------------------------------
// Metric — The three reported metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Gmv,
    GrossRevenue,
    BookingCount,
}

impl Metric {
    /// All metrics in report order.
    pub const ALL: [Metric; 3] = [Metric::Gmv, Metric::GrossRevenue, Metric::BookingCount];

    /// Key used in the JSON output file.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Gmv => "daily_gmv",
            Metric::GrossRevenue => "daily_gross_revenue",
            Metric::BookingCount => "daily_booking_count",
        }
    }

    /// Row label in the summary table.
    pub fn display_name(self) -> &'static str {
        match self {
            Metric::Gmv => "Daily Gmv",
            Metric::GrossRevenue => "Daily Gross Revenue",
            Metric::BookingCount => "Daily Booking Count",
        }
    }

    pub fn chart_title(self) -> &'static str {
        match self {
            Metric::Gmv => "Daily GMV (Total Book Price)",
            Metric::GrossRevenue => "Daily Gross Revenue",
            Metric::BookingCount => "Daily Booking Count",
        }
    }

    pub fn axis_label(self) -> &'static str {
        match self {
            Metric::Gmv | Metric::GrossRevenue => "Amount ($)",
            Metric::BookingCount => "Number of Bookings",
        }
    }

    /// GMV and revenue are money; bookings are a count.
    pub fn is_currency(self) -> bool {
        !matches!(self, Metric::BookingCount)
    }
}

// ---------------------------------------------------------------------------
// Series — One metric's value per date, ascending
// ---------------------------------------------------------------------------

/// Per-date values of one metric, ordered by date.
///
/// Serializes as a JSON object keyed by ISO date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series<T> {
    points: BTreeMap<NaiveDate, T>,
}

impl<T: Copy> Series<T> {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<T> {
        self.points.get(&date).copied()
    }

    /// `(date, value)` pairs in ascending date order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, T)> + '_ {
        self.points.iter().map(|(date, value)| (*date, *value))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.points.values().copied()
    }
}

impl<T> FromIterator<(NaiveDate, T)> for Series<T> {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, T)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// DailyReports — The three normalized series
// ---------------------------------------------------------------------------

/// The three normalized series, in the shape written to the JSON output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyReports {
    pub daily_gmv: Series<f64>,
    pub daily_gross_revenue: Series<f64>,
    pub daily_booking_count: Series<i64>,
}

impl DailyReports {
    /// Assemble the series from complete daily records.
    pub fn from_records<I: IntoIterator<Item = DailyRecord>>(records: I) -> Self {
        let mut gmv = BTreeMap::new();
        let mut gross = BTreeMap::new();
        let mut bookings = BTreeMap::new();
        for record in records {
            gmv.insert(record.date, record.gmv);
            gross.insert(record.date, record.gross_revenue);
            bookings.insert(record.date, record.booking_count);
        }
        Self {
            daily_gmv: Series { points: gmv },
            daily_gross_revenue: Series { points: gross },
            daily_booking_count: Series { points: bookings },
        }
    }

    /// A metric's values widened to `f64`, for renderers that treat all
    /// metrics alike.
    pub fn points(&self, metric: Metric) -> Vec<(NaiveDate, f64)> {
        match metric {
            Metric::Gmv => self.daily_gmv.iter().collect(),
            Metric::GrossRevenue => self.daily_gross_revenue.iter().collect(),
            Metric::BookingCount => self
                .daily_booking_count
                .iter()
                .map(|(date, count)| (date, count as f64))
                .collect(),
        }
    }
}
