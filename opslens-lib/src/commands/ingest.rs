use super::Host;
use super::common::{CommonArgs, Session};
use crate::Result;
use crate::metrics::MetricKey;
use crate::reports::{IngestSummary, Report};
use crate::runs::parse_run;
use crate::storage::{JsonStore, Store};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Parser;
use futures_util::future::join_all;
use ohno::{IntoAppError, bail};
use std::fs;
use std::io::Write;
use tokio::task::spawn_blocking;

/// Log target for ingestion
const LOG_TARGET: &str = "    ingest";

const ARCHIVE_SUFFIX: &str = ".tar.gz";

#[derive(Parser, Debug)]
pub struct IngestArgs {
    /// Diagnostic archives to ingest
    #[arg(value_name = "ARCHIVE", required = true)]
    pub archives: Vec<Utf8PathBuf>,

    /// Largest accepted archive, in MiB (overrides the configuration)
    #[arg(long, value_name = "MIB", env = "OPSLENS_MAX_UPLOAD_MB", value_parser = clap::value_parser!(u64).range(1..=1024))]
    pub max_upload_mb: Option<u64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Parse and store each archive independently.
///
/// Archives are parsed concurrently on blocking worker threads. A failed
/// archive is reported without affecting the others, and makes the command
/// exit with status 1 once every archive has been processed.
pub async fn ingest_archives<H: Host>(host: &mut H, args: &IngestArgs) -> Result<()> {
    let mut session = Session::new(host, &args.common)?;
    let max_bytes = args.max_upload_mb.map_or_else(|| session.config.max_upload_bytes(), |mb| mb * 1024 * 1024);

    let results = join_all(args.archives.iter().map(|path| {
        let store = session.store.clone();
        let path = path.clone();
        spawn_blocking(move || ingest_archive(&store, &path, max_bytes))
    }))
    .await;

    let mut summaries = Vec::with_capacity(results.len());
    let mut failures = 0_usize;
    for (path, result) in args.archives.iter().zip(results) {
        match result.into_app_err("ingest task panicked").and_then(|r| r) {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                failures += 1;
                let _ = writeln!(session.host().error(), "Could not ingest '{path}': {e:#}");
            }
        }
    }

    session.report(&Report::Ingested(&summaries))?;

    if failures > 0 {
        session.host().exit(1);
        bail!("{failures} of {} archives could not be ingested", args.archives.len());
    }

    Ok(())
}

/// Validate, parse, and commit a single archive.
fn ingest_archive(store: &JsonStore, path: &Utf8Path, max_bytes: u64) -> Result<IngestSummary> {
    let name = path.file_name().unwrap_or(path.as_str());
    if !name.ends_with(ARCHIVE_SUFFIX) {
        bail!("'{name}' is not a {ARCHIVE_SUFFIX} archive");
    }

    let size = fs::metadata(path).into_app_err_with(|| format!("reading '{path}'"))?.len();
    if size > max_bytes {
        bail!("'{name}' is {size} bytes, more than the limit of {} MiB", max_bytes / (1024 * 1024));
    }

    let data = fs::read(path).into_app_err_with(|| format!("reading '{path}'"))?;
    let record = parse_run(&data, name, Utc::now())?;
    store.commit(&record)?;

    log::info!(
        target: LOG_TARGET,
        "Committed run {} for host '{}' from '{path}'",
        record.run.id,
        record.run.host
    );

    Ok(IngestSummary {
        run_id: record.run.id,
        host: record.run.host,
        health_score: record.metrics.get(MetricKey::HealthScore),
    })
}
