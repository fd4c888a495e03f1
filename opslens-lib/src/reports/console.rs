use super::common::{HealthBand, format_metric_value, format_optional};
use super::{IngestSummary, Report};
use crate::Result;
use crate::analytics::{MetricDelta, RollingPoint};
use crate::metrics::MetricKey;
use crate::runs::{Run, RunId};
use crate::storage::Metric;
use core::fmt::Write;
use owo_colors::OwoColorize;

pub fn generate<W: Write>(report: &Report<'_>, use_colors: bool, writer: &mut W) -> Result<()> {
    match *report {
        Report::Ingested(summaries) => ingested(summaries, use_colors, writer),
        Report::Runs(runs) => runs_table(runs, writer),
        Report::RunDetail { run, metrics } => run_detail(run, metrics, use_colors, writer),
        Report::Artifact { content, .. } => {
            write!(writer, "{content}")?;
            if !content.is_empty() && !content.ends_with('\n') {
                writeln!(writer)?;
            }
            Ok(())
        }
        Report::Rolling { host, key, points } => rolling(host, key, points, use_colors, writer),
        Report::Diff { run_a, run_b, deltas } => diff(run_a, run_b, deltas, writer),
    }
}

fn colored_score(score: f64, use_colors: bool) -> String {
    let text = format!("{score}");
    if !use_colors {
        return text;
    }

    match HealthBand::of(score) {
        HealthBand::Good => text.green().bold().to_string(),
        HealthBand::Fair => text.yellow().bold().to_string(),
        HealthBand::Poor => text.red().bold().to_string(),
    }
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors { text.bold().to_string() } else { text.to_string() }
}

fn ingested<W: Write>(summaries: &[IngestSummary], use_colors: bool, writer: &mut W) -> Result<()> {
    for summary in summaries {
        let score = summary
            .health_score
            .map_or_else(|| "n/a".to_string(), |score| colored_score(score, use_colors));
        writeln!(
            writer,
            "Ingested run {} for host '{}', health score {score}",
            summary.run_id, summary.host
        )?;
    }

    Ok(())
}

fn runs_table<W: Write>(runs: &[Run], writer: &mut W) -> Result<()> {
    if runs.is_empty() {
        writeln!(writer, "No runs recorded")?;
        return Ok(());
    }

    let host_width = runs.iter().map(|run| run.host.len()).chain([4]).max().unwrap_or(4);
    writeln!(writer, "{:<36}  {:<20}  {:<host_width$}  ARCHIVE", "RUN ID", "CREATED", "HOST")?;

    for run in runs {
        writeln!(
            writer,
            "{:<36}  {:<20}  {:<host_width$}  {}",
            run.id.to_string(),
            run.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            run.host,
            run.archive_name
        )?;
    }

    Ok(())
}

fn run_detail<W: Write>(run: &Run, metrics: &[Metric], use_colors: bool, writer: &mut W) -> Result<()> {
    writeln!(writer, "Run        : {}", run.id)?;
    writeln!(writer, "Created    : {}", run.created_at.to_rfc3339())?;
    writeln!(writer, "Host       : {}", run.host)?;
    writeln!(writer, "Archive    : {}", run.archive_name)?;
    writeln!(writer, "Uname      : {}", run.uname.lines().next().unwrap_or_default())?;
    writeln!(writer, "OS release : {}", os_name(&run.os_release))?;

    if metrics.is_empty() {
        return Ok(());
    }

    writeln!(writer)?;
    writeln!(writer, "{}", heading("Metrics", use_colors))?;

    let values: Vec<String> = metrics.iter().map(|m| format_metric_value(m.value, m.unit)).collect();
    let width = metrics.iter().map(|m| m.key.name().len()).max().unwrap_or(0);
    let value_width = values.iter().map(String::len).max().unwrap_or(0);

    for (metric, plain) in metrics.iter().zip(&values) {
        // pad on the plain text; color codes take no columns
        let padding = " ".repeat(value_width - plain.len());
        let value = if metric.key == MetricKey::HealthScore {
            colored_score(metric.value, use_colors)
        } else {
            plain.clone()
        };
        writeln!(
            writer,
            "  {:<width$} : {value}{padding}  {}",
            metric.key.name(),
            metric.key.description()
        )?;
    }

    Ok(())
}

/// The `PRETTY_NAME` of an os-release file, or its first line.
fn os_name(os_release: &str) -> &str {
    os_release
        .lines()
        .find_map(|line| line.strip_prefix("PRETTY_NAME="))
        .map(|name| name.trim_matches('"'))
        .or_else(|| os_release.lines().next())
        .unwrap_or_default()
}

fn rolling<W: Write>(host: &str, key: &str, points: &[RollingPoint], use_colors: bool, writer: &mut W) -> Result<()> {
    if points.is_empty() {
        writeln!(writer, "No values of '{key}' recorded for host '{host}'")?;
        return Ok(());
    }

    writeln!(writer, "{}", heading(&format!("{key} for host '{host}'"), use_colors))?;
    writeln!(writer, "{:<10}  {:>12}  {:>12}", "DAY", "VALUE", "ROLLING 7D")?;
    for point in points {
        writeln!(writer, "{:<10}  {:>12.2}  {:>12.2}", point.day.to_string(), point.value, point.rolling7)?;
    }

    Ok(())
}

fn diff<W: Write>(run_a: RunId, run_b: RunId, deltas: &[MetricDelta], writer: &mut W) -> Result<()> {
    writeln!(writer, "A: {run_a}")?;
    writeln!(writer, "B: {run_b}")?;

    if deltas.is_empty() {
        writeln!(writer, "No metrics to compare")?;
        return Ok(());
    }

    let width = deltas.iter().map(|d| d.key.name().len()).chain([3]).max().unwrap_or(3);
    writeln!(writer)?;
    writeln!(writer, "{:<width$}  {:>14}  {:>14}  {:>12}", "KEY", "A", "B", "DELTA")?;
    for delta in deltas {
        let change = delta.delta.map_or_else(|| "-".to_string(), |d| format!("{d:+}"));
        writeln!(
            writer,
            "{:<width$}  {:>14}  {:>14}  {:>12}",
            delta.key.name(),
            format_optional(delta.a),
            format_optional(delta.b),
            change
        )?;
    }

    Ok(())
}
