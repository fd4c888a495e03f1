//! Command-line interface and orchestration for opslens
//!
//! Every subcommand parses its arguments with clap, loads the configuration,
//! opens the run store, and renders its result through the `reports` module.
//!
//! ## Commands
//!
//! - **ingest**: Parse diagnostic archives and commit the resulting runs
//! - **runs**: List stored runs, newest first
//! - **show**: Show one run with its metrics
//! - **artifact**: Print a raw artifact of a run
//! - **rolling**: Daily values and 7-day rolling average of one metric for one host
//! - **diff**: Key-by-key comparison of two runs
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! The `common` module provides shared functionality like logging setup,
//! color mode handling, store location, and report output.
//!
//! Configuration is a small TOML file holding the upload size limit and the
//! defaults used by `runs` and `rolling`.

mod artifact;
mod common;
mod config;
mod diff;
mod host;
mod ingest;
mod init;
mod rolling;
mod run;
mod runs;
mod show;
mod validate;

pub use artifact::{ArtifactArgs, show_artifact};
#[cfg(debug_assertions)]
pub use config::Config;
pub use diff::{DiffArgs, diff_two_runs};
pub use host::Host;
pub use ingest::{IngestArgs, ingest_archives};
pub use init::{InitArgs, init_config};
pub use rolling::{RollingArgs, show_rolling};
pub use run::run;
pub use runs::{RunsArgs, list_runs};
pub use show::{ShowArgs, show_run};
pub use validate::{ValidateArgs, validate_config};
