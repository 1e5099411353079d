//! Daily hotel revenue and booking reports.
//!
//! Fetches per-day booking count, GMV and gross revenue for a space from the
//! revenue-and-count endpoint, fills every missing day of the requested range
//! with zeros, summarizes each metric, and renders the result to the console,
//! a JSON file and/or a PDF with a summary table and one bar chart per metric.
//!
//! # Quick start
//!
//! ```no_run
//! use hotel_reports::{DateRange, OutputPlan, ReportGenerator};
//!
//! let generator = ReportGenerator::builder()
//!     .api_key("secret")
//!     .build()
//!     .unwrap();
//!
//! let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
//! let report = generator.generate(42, range).unwrap();
//!
//! let plan = OutputPlan {
//!     console: true,
//!     json: Some("report.json".into()),
//!     pdf: Some("report.pdf".into()),
//! };
//! plan.write(&report).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod normalize;
pub mod output;
pub mod range;
pub mod render;
pub mod stats;

pub use config::ReportConfig;
pub use error::{ReportError, Result};
pub use fetcher::{MetricsFetcher, MetricsSource};
pub use models::{DailyReports, Metric, Report};
pub use output::OutputPlan;
pub use range::DateRange;

use std::fmt;
use std::time::Duration;

use chrono::Local;

// ---------------------------------------------------------------------------
// ReportGeneratorBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`ReportGenerator`].
///
/// Use [`ReportGenerator::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](ReportGeneratorBuilder::build).
#[derive(Default)]
pub struct ReportGeneratorBuilder {
    config: ReportConfig,
}

impl ReportGeneratorBuilder {
    /// Start from an existing configuration instead of the defaults.
    pub fn config(mut self, config: ReportConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the base URL the endpoint path is appended to.
    ///
    /// Defaults to [`config::DEFAULT_BASE_URL`].
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Send `Authorization: Bearer <key>` with the request.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Set the HTTP request timeout.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build a generator backed by an HTTP [`MetricsFetcher`].
    pub fn build(self) -> Result<ReportGenerator<MetricsFetcher>> {
        Ok(ReportGenerator {
            source: MetricsFetcher::new(self.config)?,
        })
    }
}

// ---------------------------------------------------------------------------
// ReportGenerator
// ---------------------------------------------------------------------------

/// Runs the fetch → normalize → summarize pipeline against a
/// [`MetricsSource`].
pub struct ReportGenerator<S = MetricsFetcher> {
    source: S,
}

impl ReportGenerator<MetricsFetcher> {
    /// Create a new builder for an HTTP-backed generator.
    pub fn builder() -> ReportGeneratorBuilder {
        ReportGeneratorBuilder::default()
    }
}

impl<S: MetricsSource> ReportGenerator<S> {
    /// Use any metrics source, e.g. a canned one in tests.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Fetch the range for `space_id` and build the finished report.
    ///
    /// Nothing is normalized unless the fetch succeeded.
    pub fn generate(&self, space_id: u64, range: DateRange) -> Result<Report> {
        let raw = self.source.fetch(space_id, &range)?;
        let series = normalize::normalize(&range, &raw);
        Ok(Report::new(space_id, range, series, Local::now()))
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for ReportGenerator<MetricsFetcher> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.source.config();
        write!(
            f,
            "ReportGenerator(endpoint={}, api_key={}, timeout={:?})",
            config.endpoint(),
            if config.api_key.is_some() { "set" } else { "none" },
            config.timeout
        )
    }
}
