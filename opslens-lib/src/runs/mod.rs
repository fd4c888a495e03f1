//! Runs assembled from diagnostic archives.
//!
//! A run is one diagnostic collection. [`parse_run`] turns an archive into a
//! [`RunRecord`] holding the run metadata, the extracted metrics with the
//! health score, and the raw artifacts, ready to be committed to a store.

mod artifacts;
mod assembler;
mod run;
mod run_record;

pub use artifacts::{Artifacts, MAX_ARTIFACT_CHARS, MAX_SUMMARY_CHARS, truncate_head, truncate_tail};
pub use assembler::{assemble_run, parse_run};
pub use run::{Run, RunId};
pub use run_record::RunRecord;
