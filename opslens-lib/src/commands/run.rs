//! Command dispatch logic for opslens

use super::{
    ArtifactArgs, DiffArgs, IngestArgs, InitArgs, RollingArgs, RunsArgs, ShowArgs, ValidateArgs, diff_two_runs, ingest_archives,
    init_config, list_runs, show_artifact, show_rolling, show_run, validate_config,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "opslens", author, version, long_about = None)]
#[command(about = "Turn host diagnostic bundles into health metrics and trends")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: OpsLensSubcommand,
}

#[derive(Subcommand, Debug)]
enum OpsLensSubcommand {
    /// Parse diagnostic archives and store the resulting runs
    Ingest(Box<IngestArgs>),
    /// List stored runs, newest first
    Runs(RunsArgs),
    /// Show a run and its metrics
    Show(ShowArgs),
    /// Print a raw artifact captured with a run
    Artifact(ArtifactArgs),
    /// Show the daily and 7-day rolling average of a metric for one host
    Rolling(RollingArgs),
    /// Compare the metrics of two runs
    Diff(DiffArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        OpsLensSubcommand::Ingest(ingest_args) => ingest_archives(host, ingest_args).await,
        OpsLensSubcommand::Runs(runs_args) => list_runs(host, runs_args),
        OpsLensSubcommand::Show(show_args) => show_run(host, show_args),
        OpsLensSubcommand::Artifact(artifact_args) => show_artifact(host, artifact_args),
        OpsLensSubcommand::Rolling(rolling_args) => show_rolling(host, rolling_args),
        OpsLensSubcommand::Diff(diff_args) => diff_two_runs(host, diff_args),
        OpsLensSubcommand::Init(init_args) => init_config(host, init_args),
        OpsLensSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
