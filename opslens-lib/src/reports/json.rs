use super::Report;
use crate::Result;
use core::fmt::Write;
use serde_json::json;

pub fn generate<W: Write>(report: &Report<'_>, writer: &mut W) -> Result<()> {
    let output = match *report {
        Report::Ingested(summaries) => json!(summaries),
        Report::Runs(runs) => json!(runs),
        Report::RunDetail { run, metrics } => json!({
            "run": run,
            "metrics": metrics,
        }),
        Report::Artifact { name, content } => json!({
            "name": name,
            "content": content,
        }),
        Report::Rolling { points, .. } => json!(points),
        Report::Diff { deltas, .. } => json!(deltas),
    };

    writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
