#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for opslens
//!
//! This library turns host diagnostic bundles (gzip-compressed tar archives of
//! command outputs) into numeric health metrics, a composite health score, and
//! retained raw text artifacts. It also computes analytics over previously
//! stored runs.
//!
//! # Module Organization
//!
//! - [`archive`]: Safety filtering and text extraction for bundle members
//! - [`metrics`]: Metric names, per-signal extractors, and the health scorer
//! - [`runs`]: Run records and the assembler that produces them
//! - [`storage`]: The storage contract plus JSON-file and in-memory stores
//! - [`analytics`]: Rolling averages and run diffs over stored metrics
//! - `commands`: Command-line interface and orchestration
//! - `reports`: Console and JSON rendering of command results

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod analytics;
pub mod archive;
pub mod metrics;
pub mod runs;
pub mod storage;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use crate::commands::{Host, run};
