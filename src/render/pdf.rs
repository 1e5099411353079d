//! PDF report: cover page, summary table and one bar chart per metric.
//!
//! Drawn directly with `printpdf` using the built-in Helvetica fonts, so no
//! font files are needed at runtime. Text widths are estimated from an
//! average glyph width, which is close enough for centring labels.

use std::path::Path;

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb, TextMatrix,
};
use tracing::debug;

use super::chart::{text_width, ChartLayout, PT_TO_MM};
use super::format::{count, currency};
use crate::error::{ReportError, Result};
use crate::models::{Metric, Report};
use crate::output::write_atomic;

const A4_SHORT: f64 = 210.0;
const A4_LONG: f64 = 297.0;
const LAYER: &str = "Layer 1";

// Chart pages are landscape; plot area in page coordinates.
const PLOT_LEFT: f64 = 35.0;
const PLOT_BOTTOM: f64 = 40.0;
const PLOT_WIDTH: f64 = 245.0;
const PLOT_HEIGHT: f64 = 135.0;

const DATE_LABEL_PT: f64 = 6.0;
const TICK_LABEL_PT: f64 = 8.0;

/// Column headers of the summary table.
pub const SUMMARY_HEADERS: [&str; 6] = ["Metric", "Total", "Average", "Max", "Min", "Days with Data"];
const SUMMARY_COLUMNS_MM: [f64; 6] = [50.0, 28.0, 28.0, 28.0, 28.0, 18.0];
const SUMMARY_ROW_MM: f64 = 10.0;

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        None,
    ))
}

fn render_err(context: &str, err: impl std::fmt::Display) -> ReportError {
    ReportError::Render(format!("{}: {}", context, err))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Thin drawing helpers over a printpdf layer.
struct Canvas<'a> {
    layer: PdfLayerReference,
    fonts: &'a Fonts,
}

impl Canvas<'_> {
    fn text(&self, text: &str, size: f64, x: f64, y: f64, bold: bool, color: Color) {
        let font = if bold { &self.fonts.bold } else { &self.fonts.regular };
        self.layer.set_fill_color(color);
        self.layer.use_text(text, size, Mm(x), Mm(y), font);
    }

    fn text_centered(&self, text: &str, size: f64, x_center: f64, y: f64, bold: bool, color: Color) {
        let x = x_center - text_width(text, size) / 2.0;
        self.text(text, size, x, y, bold, color);
    }

    fn text_right(&self, text: &str, size: f64, x_right: f64, y: f64, color: Color) {
        let x = x_right - text_width(text, size);
        self.text(text, size, x, y, false, color);
    }

    /// Text running bottom-to-top, centred on `x_center`, starting at `y`.
    fn text_vertical(&self, text: &str, size: f64, x_center: f64, y: f64, color: Color) {
        // Glyphs of turned text extend to the left of their baseline.
        let x = x_center + size * PT_TO_MM * 0.35;
        self.layer.set_fill_color(color);
        self.layer.begin_text_section();
        self.layer.set_font(&self.fonts.regular, size);
        // printpdf 0.3 has no combined translate+rotate matrix: rotate the text
        // space by 90°, then `Td` (which runs in rotated space) to reach (x, y).
        self.layer.set_text_matrix(TextMatrix::Rotate(90.0));
        self.layer.set_text_cursor(Mm(y), Mm(-x));
        self.layer.write_text(text, &self.fonts.regular);
        self.layer.end_text_section();
    }

    fn line(&self, from: (f64, f64), to: (f64, f64), thickness: f64, color: Color) {
        self.layer.set_outline_color(color);
        self.layer.set_outline_thickness(thickness);
        self.layer.add_shape(Line {
            points: vec![
                (Point::new(Mm(from.0), Mm(from.1)), false),
                (Point::new(Mm(to.0), Mm(to.1)), false),
            ],
            is_closed: false,
            has_fill: false,
            has_stroke: true,
            is_clipping_path: false,
        });
    }

    fn rect(&self, x: f64, y: f64, w: f64, h: f64, fill: Color, stroke: Option<Color>) {
        self.layer.set_fill_color(fill);
        if let Some(stroke) = &stroke {
            self.layer.set_outline_color(stroke.clone());
            self.layer.set_outline_thickness(0.5);
        }
        self.layer.add_shape(Line {
            points: vec![
                (Point::new(Mm(x), Mm(y)), false),
                (Point::new(Mm(x + w), Mm(y)), false),
                (Point::new(Mm(x + w), Mm(y + h)), false),
                (Point::new(Mm(x), Mm(y + h)), false),
            ],
            is_closed: true,
            has_fill: true,
            has_stroke: stroke.is_some(),
            is_clipping_path: false,
        });
    }
}

/// Render the report and write it to `path` atomically.
pub fn write(report: &Report, path: &Path) -> Result<()> {
    let doc = build(report)?;
    write_atomic(path, |out| {
        doc.save(out)
            .map_err(|e| render_err("failed to write PDF document", e))
    })
}

/// Assemble the whole document in memory.
pub fn build(report: &Report) -> Result<PdfDocumentReference> {
    let title = format!("Daily Reports - Space {}", report.space_id());
    let (doc, cover_page, cover_layer) =
        PdfDocument::new(title, Mm(A4_SHORT), Mm(A4_LONG), LAYER.to_string());

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| render_err("failed to load Helvetica", e))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| render_err("failed to load Helvetica-Bold", e))?,
    };

    draw_cover(
        &Canvas {
            layer: doc.get_page(cover_page).get_layer(cover_layer),
            fonts: &fonts,
        },
        report,
    );

    let (page, layer) = doc.add_page(Mm(A4_SHORT), Mm(A4_LONG), LAYER);
    draw_summary(
        &Canvas {
            layer: doc.get_page(page).get_layer(layer),
            fonts: &fonts,
        },
        report,
    );

    for metric in Metric::ALL {
        let (page, layer) = doc.add_page(Mm(A4_LONG), Mm(A4_SHORT), LAYER);
        draw_chart(
            &Canvas {
                layer: doc.get_page(page).get_layer(layer),
                fonts: &fonts,
            },
            report,
            metric,
        )?;
    }

    Ok(doc)
}

fn draw_cover(canvas: &Canvas<'_>, report: &Report) {
    let black = rgb(0, 0, 0);
    canvas.text_centered("Daily Reports Summary", 24.0, A4_SHORT / 2.0, 250.0, true, black.clone());

    let generated = report.generated_at().format("%Y-%m-%d %H:%M:%S").to_string();
    let rows = [
        ("Space ID:", report.space_id().to_string()),
        ("Period:", report.range().to_string()),
        ("Generated:", generated),
    ];
    let mut y = 225.0;
    for (label, value) in rows {
        canvas.text(label, 12.0, 30.0, y, true, black.clone());
        canvas.text(&value, 12.0, 30.0 + text_width(label, 12.0) + 3.0, y, false, black.clone());
        y -= 12.0;
    }
}

/// Formatted summary table rows, one per metric, matching [`SUMMARY_HEADERS`].
pub fn summary_rows(report: &Report) -> Vec<[String; 6]> {
    let summaries = report.summaries();
    Metric::ALL
        .iter()
        .map(|metric| {
            let name = metric.display_name().to_string();
            match metric {
                Metric::BookingCount => {
                    let s = summaries.booking_count;
                    [
                        name,
                        count(s.total),
                        format!("{:.1}", s.average),
                        count(s.maximum),
                        count(s.minimum),
                        s.days_with_data.to_string(),
                    ]
                }
                Metric::Gmv | Metric::GrossRevenue => {
                    let s = summaries.get(*metric);
                    [
                        name,
                        currency(s.total),
                        currency(s.average),
                        currency(s.maximum),
                        currency(s.minimum),
                        s.days_with_data.to_string(),
                    ]
                }
            }
        })
        .collect()
}

fn draw_summary(canvas: &Canvas<'_>, report: &Report) {
    let black = rgb(0, 0, 0);
    let table_width: f64 = SUMMARY_COLUMNS_MM.iter().sum();
    let left = (A4_SHORT - table_width) / 2.0;
    let top = 250.0;

    canvas.text("Summary Statistics", 16.0, left, top + 10.0, true, black.clone());

    let header = SUMMARY_HEADERS.map(str::to_string);
    let rows = summary_rows(report);
    let all_rows = std::iter::once((&header, true)).chain(rows.iter().map(|r| (r, false)));

    for (i, (cells, is_header)) in all_rows.enumerate() {
        let y = top - (i as f64 + 1.0) * SUMMARY_ROW_MM;
        let (fill, text_color, size) = if is_header {
            (rgb(128, 128, 128), rgb(245, 245, 245), 9.0)
        } else {
            (rgb(245, 245, 220), black.clone(), 9.0)
        };
        let mut x = left;
        for (cell, width) in cells.iter().zip(SUMMARY_COLUMNS_MM) {
            canvas.rect(x, y, width, SUMMARY_ROW_MM, fill.clone(), Some(black.clone()));
            canvas.text_centered(cell, size, x + width / 2.0, y + 3.5, is_header, text_color.clone());
            x += width;
        }
    }
}

fn draw_chart(canvas: &Canvas<'_>, report: &Report, metric: Metric) -> Result<()> {
    let points = report.series().points(metric);
    let date_label_width = text_width("0000-00-00", DATE_LABEL_PT);
    let layout = ChartLayout::compute(
        &points,
        PLOT_WIDTH,
        PLOT_HEIGHT,
        !metric.is_currency(),
        date_label_width,
    )
    .map_err(|e| match e {
        ReportError::Render(msg) => ReportError::Render(format!("{}: {}", metric.chart_title(), msg)),
        other => other,
    })?;
    debug!(
        metric = metric.key(),
        bars = layout.bars.len(),
        date_labels = layout.date_labels.len(),
        "laid out chart"
    );

    let black = rgb(0, 0, 0);
    let grey = rgb(90, 90, 90);
    let grid = rgb(220, 220, 220);
    let bar_fill = rgb(135, 206, 235);
    let bar_edge = rgb(0, 0, 128);
    let page_center = A4_LONG / 2.0;

    canvas.text_centered(metric.chart_title(), 16.0, page_center, 192.0, true, black.clone());
    canvas.text(metric.axis_label(), 10.0, PLOT_LEFT - 20.0, PLOT_BOTTOM + PLOT_HEIGHT + 6.0, false, grey.clone());
    canvas.text_centered("Date", 10.0, PLOT_LEFT + PLOT_WIDTH / 2.0, 14.0, false, grey.clone());

    for tick in &layout.ticks {
        let y = PLOT_BOTTOM + tick.y;
        canvas.line((PLOT_LEFT, y), (PLOT_LEFT + PLOT_WIDTH, y), 0.3, grid.clone());
        canvas.text_right(&tick.label, TICK_LABEL_PT, PLOT_LEFT - 2.0, y - 1.0, grey.clone());
    }

    for bar in &layout.bars {
        if bar.height > 0.0 {
            canvas.rect(
                PLOT_LEFT + bar.x,
                PLOT_BOTTOM + bar.bottom,
                bar.width,
                bar.height,
                bar_fill.clone(),
                Some(bar_edge.clone()),
            );
        }
        if let Some(label) = &bar.label {
            let center = PLOT_LEFT + bar.x + bar.width / 2.0;
            let size = layout.value_label_pt;
            if layout.value_labels_vertical {
                let y = if bar.value >= 0.0 {
                    PLOT_BOTTOM + bar.bottom + bar.height + 1.0
                } else {
                    PLOT_BOTTOM + bar.bottom - 1.0 - text_width(label, size)
                };
                canvas.text_vertical(label, size, center, y, black.clone());
            } else {
                let y = if bar.value >= 0.0 {
                    PLOT_BOTTOM + bar.bottom + bar.height + 1.0
                } else {
                    PLOT_BOTTOM + bar.bottom - 3.0
                };
                canvas.text_centered(label, size, center, y, false, black.clone());
            }
        }
    }

    let baseline = PLOT_BOTTOM + layout.baseline;
    canvas.line((PLOT_LEFT, baseline), (PLOT_LEFT + PLOT_WIDTH, baseline), 0.6, black.clone());
    canvas.line((PLOT_LEFT, PLOT_BOTTOM), (PLOT_LEFT, PLOT_BOTTOM + PLOT_HEIGHT), 0.6, black.clone());

    for label in &layout.date_labels {
        canvas.text_centered(
            &label.text,
            DATE_LABEL_PT,
            PLOT_LEFT + label.x_center,
            PLOT_BOTTOM - 6.0,
            false,
            grey.clone(),
        );
    }

    Ok(())
}
