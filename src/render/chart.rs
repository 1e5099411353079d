//! Bar chart geometry, independent of the PDF backend.
//!
//! All coordinates are millimetres relative to the bottom-left corner of the
//! plot area, with y growing upwards.

use chrono::NaiveDate;

use super::format::grouped;
use crate::error::{ReportError, Result};
use crate::range::DATE_FORMAT;

/// Share of a bar's slot covered by the bar itself.
const BAR_FILL: f64 = 0.8;
/// Gridline count the tick step aims for.
const TARGET_TICKS: usize = 5;
/// Upper bound on gridlines, whatever the data.
const MAX_TICKS: f64 = 100.0;
/// Extra room above the tallest bar for its label.
const HEADROOM: f64 = 0.08;

/// Font size of value labels when they fit horizontally.
pub const VALUE_LABEL_PT: f64 = 6.0;
/// Value labels never shrink below this.
pub const MIN_VALUE_LABEL_PT: f64 = 2.0;

pub const PT_TO_MM: f64 = 25.4 / 72.0;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_EM: f64 = 0.55;

/// Estimated printed width in millimetres of `text` at `size_pt`.
pub fn text_width(text: &str, size_pt: f64) -> f64 {
    text.chars().count() as f64 * size_pt * AVG_GLYPH_EM * PT_TO_MM
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub value: f64,
    pub x: f64,
    pub width: f64,
    /// Lower edge; the zero line for positive values.
    pub bottom: f64,
    pub height: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateLabel {
    pub x_center: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub axis_min: f64,
    pub axis_max: f64,
    /// y of the zero line.
    pub baseline: f64,
    /// Font size shared by all value labels.
    pub value_label_pt: f64,
    /// Value labels run bottom-to-top when they are wider than a bar slot.
    pub value_labels_vertical: bool,
    pub ticks: Vec<Tick>,
    pub bars: Vec<Bar>,
    pub date_labels: Vec<DateLabel>,
}

impl ChartLayout {
    /// Lay out one bar per point in a `width` × `height` plot area.
    ///
    /// `integer` keeps the tick step at one or more, for counts.
    /// `date_label_width` is the printed width of one date label and decides
    /// how many dates are skipped between labels.
    ///
    /// Fails with [`ReportError::Render`] on non-finite values or values too
    /// far apart to share one axis.
    pub fn compute(
        points: &[(NaiveDate, f64)],
        width: f64,
        height: f64,
        integer: bool,
        date_label_width: f64,
    ) -> Result<Self> {
        if let Some((date, value)) = points.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ReportError::Render(format!(
                "cannot plot non-finite value {} on {}",
                value, date
            )));
        }

        let lo = points.iter().map(|(_, v)| *v).fold(0.0_f64, f64::min);
        let hi = points.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
        let (lo, hi) = if hi - lo <= f64::EPSILON {
            (lo, lo + 1.0)
        } else {
            let pad = (hi - lo) * HEADROOM;
            (if lo < 0.0 { lo - pad } else { lo }, if hi > 0.0 { hi + pad } else { hi })
        };
        let out_of_range = || {
            ReportError::Render(format!(
                "values between {} and {} are too far apart to plot",
                lo, hi
            ))
        };
        if !(hi - lo).is_finite() {
            return Err(out_of_range());
        }

        let mut step = nice_step(hi - lo, TARGET_TICKS);
        if integer {
            step = step.max(1.0);
        }
        let axis_min = (lo / step).floor() * step;
        let axis_max = (hi / step).ceil() * step;
        let span = axis_max - axis_min;
        let tick_count = (span / step).round();
        if !span.is_finite() || span <= 0.0 || !(1.0..=MAX_TICKS).contains(&tick_count) {
            return Err(out_of_range());
        }
        let to_y = |v: f64| (v - axis_min) / span * height;

        let tick_decimals = if step < 1.0 { 2 } else { 0 };
        let ticks = (0..=tick_count as usize)
            .map(|i| {
                let value = axis_min + i as f64 * step;
                Tick {
                    value,
                    y: to_y(value),
                    label: grouped(value, tick_decimals),
                }
            })
            .collect();

        let baseline = to_y(0.0);
        let slot = if points.is_empty() {
            width
        } else {
            width / points.len() as f64
        };

        let labels: Vec<Option<String>> = points
            .iter()
            .map(|(_, value)| (*value != 0.0).then(|| grouped(*value, 0)))
            .collect();
        let widest = labels
            .iter()
            .flatten()
            .map(|label| text_width(label, VALUE_LABEL_PT))
            .fold(0.0_f64, f64::max);
        let value_labels_vertical = widest > slot;
        let value_label_pt = if value_labels_vertical {
            // Line height has to fit the slot once the text is turned.
            (slot / PT_TO_MM).clamp(MIN_VALUE_LABEL_PT, VALUE_LABEL_PT)
        } else {
            VALUE_LABEL_PT
        };

        let bars = points
            .iter()
            .zip(labels)
            .enumerate()
            .map(|(i, ((date, value), label))| {
                let top = to_y(*value);
                Bar {
                    date: *date,
                    value: *value,
                    x: i as f64 * slot + slot * (1.0 - BAR_FILL) / 2.0,
                    width: slot * BAR_FILL,
                    bottom: baseline.min(top),
                    height: (top - baseline).abs(),
                    label,
                }
            })
            .collect();

        let interval = label_interval(slot, date_label_width);
        let date_labels = points
            .iter()
            .enumerate()
            .step_by(interval)
            .map(|(i, (date, _))| DateLabel {
                x_center: (i as f64 + 0.5) * slot,
                text: date.format(DATE_FORMAT).to_string(),
            })
            .collect();

        Ok(Self {
            width,
            height,
            axis_min,
            axis_max,
            baseline,
            value_label_pt,
            value_labels_vertical,
            ticks,
            bars,
            date_labels,
        })
    }
}

/// A 1, 2 or 5 × 10ⁿ step splitting `span` into about `target` parts.
pub fn nice_step(span: f64, target: usize) -> f64 {
    let raw = span / target.max(1) as f64;
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Label every n-th date so that labels of `label_width` never touch.
fn label_interval(slot: f64, label_width: f64) -> usize {
    if slot <= 0.0 {
        return 1;
    }
    ((label_width * 1.2) / slot).ceil().max(1.0) as usize
}
