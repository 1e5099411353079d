use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// RawRecord — One `Data` entry exactly as the API sent it
// ---------------------------------------------------------------------------

/// A single day's entry from the response `Data` object.
///
/// Every field is optional: a key missing from the entry is `None` and is
/// zero-filled during normalization. Numbers are accepted either as JSON
/// numbers or as numeric strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "lenient::int")]
    pub no_of_booking: Option<i64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub total_book_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::float")]
    pub gross: Option<f64>,
}

/// The `Data` object keyed by ISO date string.
pub type RawMetrics = BTreeMap<String, RawRecord>;

// ---------------------------------------------------------------------------
// DailyRecord — One fully populated day
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub booking_count: i64,
    pub gmv: f64,
    pub gross_revenue: f64,
}

impl DailyRecord {
    /// The record synthesized for a date the API returned nothing for.
    pub fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            booking_count: 0,
            gmv: 0.0,
            gross_revenue: 0.0,
        }
    }

    /// Fill a record from a raw entry, defaulting each missing field to zero
    /// independently of the others.
    pub fn from_raw(date: NaiveDate, raw: &RawRecord) -> Self {
        Self {
            date,
            booking_count: raw.no_of_booking.unwrap_or(0),
            gmv: raw.total_book_price.unwrap_or(0.0),
            gross_revenue: raw.gross.unwrap_or(0.0),
        }
    }
}

mod lenient {
    use serde::de::{self, Deserializer};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeric {
        Int(i64),
        Float(f64),
        Text(String),
    }

    pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        match Option::<Numeric>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Numeric::Int(v)) => Ok(Some(v as f64)),
            Some(Numeric::Float(v)) => Ok(Some(v)),
            Some(Numeric::Text(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("expected a number, got {:?}", s))),
        }
    }

    pub fn int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        match Option::<Numeric>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Numeric::Int(v)) => Ok(Some(v)),
            Some(Numeric::Float(v)) => integral(v)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("expected an integer, got {}", v))),
            Some(Numeric::Text(s)) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(integral))
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("expected an integer, got {:?}", s)))
            }
        }
    }

    fn integral(v: f64) -> Option<i64> {
        (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_keys_are_none() {
        let raw: RawRecord = serde_json::from_value(json!({"gross": 10.5})).unwrap();
        assert_eq!(raw.no_of_booking, None);
        assert_eq!(raw.total_book_price, None);
        assert_eq!(raw.gross, Some(10.5));
    }

    #[test]
    fn numeric_strings_are_accepted() {
        let raw: RawRecord = serde_json::from_value(json!({
            "no_of_booking": "3",
            "total_book_price": "1250.50",
            "gross": 99
        }))
        .unwrap();
        assert_eq!(raw.no_of_booking, Some(3));
        assert_eq!(raw.total_book_price, Some(1250.5));
        assert_eq!(raw.gross, Some(99.0));
    }

    #[test]
    fn integral_float_booking_count_is_accepted() {
        let raw: RawRecord = serde_json::from_value(json!({"no_of_booking": 4.0})).unwrap();
        assert_eq!(raw.no_of_booking, Some(4));
    }

    #[test]
    fn fractional_booking_count_is_rejected() {
        let result = serde_json::from_value::<RawRecord>(json!({"no_of_booking": 1.5}));
        assert!(result.is_err());
    }

    #[test]
    fn non_numeric_text_is_rejected() {
        let result = serde_json::from_value::<RawRecord>(json!({"gross": "lots"}));
        assert!(result.is_err());
    }

    #[test]
    fn null_counts_as_missing() {
        let raw: RawRecord = serde_json::from_value(json!({"gross": null})).unwrap();
        assert_eq!(raw.gross, None);
    }

    #[test]
    fn from_raw_defaults_fields_independently() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let raw = RawRecord {
            no_of_booking: Some(2),
            total_book_price: None,
            gross: Some(-5.0),
        };
        let record = DailyRecord::from_raw(date, &raw);
        assert_eq!(record.booking_count, 2);
        assert_eq!(record.gmv, 0.0);
        assert_eq!(record.gross_revenue, -5.0);
    }
}
