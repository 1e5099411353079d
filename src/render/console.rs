//! Plain-text report for the terminal.

use std::io::{self, Write};

use super::format::{count, currency};
use crate::models::{Metric, Report};

const BANNER_WIDTH: usize = 60;
const RULE_WIDTH: usize = 40;

fn block_title(metric: Metric) -> &'static str {
    match metric {
        Metric::Gmv => "DAILY GMV (Total Book Price)",
        Metric::GrossRevenue => "DAILY GROSS REVENUE",
        Metric::BookingCount => "DAILY BOOKING COUNT",
    }
}

fn total_label(metric: Metric) -> &'static str {
    match metric {
        Metric::Gmv => "TOTAL GMV",
        Metric::GrossRevenue => "TOTAL GROSS REVENUE",
        Metric::BookingCount => "TOTAL BOOKINGS",
    }
}

/// Write the text report to `out`.
pub fn write<W: Write>(report: &Report, out: &mut W) -> io::Result<()> {
    let banner = "=".repeat(BANNER_WIDTH);
    let rule = "-".repeat(RULE_WIDTH);
    let series = report.series();
    let summaries = report.summaries();

    writeln!(out)?;
    writeln!(out, "{}", banner)?;
    writeln!(out, "DAILY REPORTS: {}", report.range())?;
    writeln!(out, "{}", banner)?;

    for metric in Metric::ALL {
        writeln!(out)?;
        writeln!(out, "{}", block_title(metric))?;
        writeln!(out, "{}", rule)?;
        match metric {
            Metric::BookingCount => {
                for (date, value) in series.daily_booking_count.iter() {
                    writeln!(out, "{}: {} bookings", date, count(value))?;
                }
                writeln!(out, "{}", rule)?;
                writeln!(
                    out,
                    "{}: {}",
                    total_label(metric),
                    count(summaries.booking_count.total)
                )?;
            }
            Metric::Gmv | Metric::GrossRevenue => {
                for (date, value) in series.points(metric) {
                    writeln!(out, "{}: {}", date, currency(value))?;
                }
                writeln!(out, "{}", rule)?;
                writeln!(
                    out,
                    "{}: {}",
                    total_label(metric),
                    currency(summaries.get(metric).total)
                )?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "{}", banner)?;
    Ok(())
}

/// The text report as a string.
pub fn render(report: &Report) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write(report, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}
