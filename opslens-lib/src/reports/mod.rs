//! Rendering of command results.
//!
//! Every read command produces a [`Report`], which is rendered either as
//! aligned, optionally colored console text or as pretty-printed JSON.

mod common;
mod console;
mod json;

use crate::analytics::{MetricDelta, RollingPoint};
use crate::runs::{Run, RunId};
use crate::storage::Metric;
use serde::Serialize;

pub use console::generate as generate_console;
pub use json::generate as generate_json;

/// Outcome of ingesting one archive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestSummary {
    pub run_id: RunId,
    pub host: String,
    pub health_score: Option<f64>,
}

/// The result of a command, ready to be rendered.
#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    Ingested(&'a [IngestSummary]),
    Runs(&'a [Run]),
    RunDetail { run: &'a Run, metrics: &'a [Metric] },
    Artifact { name: &'a str, content: &'a str },
    Rolling { host: &'a str, key: &'a str, points: &'a [RollingPoint] },
    Diff { run_a: RunId, run_b: RunId, deltas: &'a [MetricDelta] },
}
