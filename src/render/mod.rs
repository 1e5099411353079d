//! Presentation layers. Each consumes a finished [`Report`](crate::models::Report)
//! read-only and is independent of the others.

pub mod chart;
pub mod console;
pub mod format;
pub mod json;
pub mod pdf;
