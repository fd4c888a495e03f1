use super::rounding::{count_value, round_to};
use super::{MetricKey, MetricSet};
use crate::archive::{Bundle, BundleFile};
use regex::Regex;
use std::sync::LazyLock;

/// Log target for metric extraction
const LOG_TARGET: &str = "   extract";

/// Host name used when `meta.txt` carries no usable `host=` line.
pub const UNKNOWN_HOST: &str = "unknown";

static ERROR_SIGNAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:error|failed|fail|panic|critical|segfault)\b").expect("invalid regex"));

/// A parser turning one bundle file into zero or more metrics.
#[derive(Debug)]
pub struct ExtractorDef {
    pub name: &'static str,
    pub source: BundleFile,
    pub extract: fn(&str) -> MetricSet,
}

macro_rules! extractor_def {
    ($name:expr, $source:ident, $extract:expr) => {
        ExtractorDef {
            name: $name,
            source: BundleFile::$source,
            extract: $extract,
        }
    };
}

/// Every registered extractor. Their output keys are disjoint.
pub const EXTRACTORS: &[ExtractorDef] = &[
    extractor_def!("memory", Free, extract_memory),
    extractor_def!("disk", Df, extract_disk),
    extractor_def!("systemd running", SystemdRunningServices, extract_running_services),
    extractor_def!("systemd failed", SystemdFailedUnits, extract_failed_units),
    extractor_def!("log errors", LogTail, extract_log_errors),
    extractor_def!("k8s nodes", K8sNodes, extract_k8s_nodes),
    extractor_def!("k8s pods", K8sPods, extract_k8s_pods),
];

/// Run every registered extractor against its source file in the bundle.
#[must_use]
pub fn extract_metrics(bundle: &Bundle) -> MetricSet {
    let mut metrics = MetricSet::new();

    for def in EXTRACTORS {
        let extracted = (def.extract)(&bundle.read_file(def.source));
        if extracted.is_empty() {
            log::debug!(target: LOG_TARGET, "No {} metrics in '{}'", def.name, def.source);
        }
        metrics.extend(extracted);
    }

    metrics
}

/// The value of the last `host=` line of `meta.txt`.
#[must_use]
pub fn extract_host(meta: &str) -> String {
    meta.lines()
        .filter_map(|line| line.strip_prefix("host="))
        .last()
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .unwrap_or(UNKNOWN_HOST)
        .to_string()
}

/// Memory totals from `free -b` output.
///
/// The `Mem:` row lists total then used bytes. Nothing is emitted unless both
/// parse; the percentage additionally needs a positive total.
#[must_use]
pub fn extract_memory(free: &str) -> MetricSet {
    let mut metrics = MetricSet::new();

    let Some(line) = free.lines().find(|line| line.trim_start().starts_with("Mem:")) else {
        return metrics;
    };

    let mut tokens = line.split_whitespace().skip(1).map(str::parse::<f64>);
    let (Some(Ok(total)), Some(Ok(used))) = (tokens.next(), tokens.next()) else {
        return metrics;
    };

    let _ = metrics.insert(MetricKey::MemTotalBytes, total);
    let _ = metrics.insert(MetricKey::MemUsedBytes, used);
    if total > 0.0 {
        let _ = metrics.insert(MetricKey::MemUsedPct, round_to(used / total * 100.0, 2));
    }

    metrics
}

/// Root filesystem usage from `df -P` output.
///
/// The first row mounted on `/` decides; its capacity column must look like `NN%`.
#[must_use]
pub fn extract_disk(df: &str) -> MetricSet {
    let mut metrics = MetricSet::new();

    for line in df.lines() {
        if line.trim().is_empty() || line.trim_start().to_ascii_lowercase().starts_with("filesystem") {
            continue;
        }

        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.last() != Some(&"/") {
            continue;
        }

        if let [.., capacity, _] = columns.as_slice()
            && let Some(Ok(pct)) = capacity.strip_suffix('%').map(str::parse::<f64>)
        {
            let _ = metrics.insert(MetricKey::DiskRootUsedPct, pct);
        }

        break;
    }

    metrics
}

#[must_use]
pub fn extract_running_services(listing: &str) -> MetricSet {
    let running = listing
        .lines()
        .filter(|line| line.trim().ends_with(".service") && line.contains("loaded"))
        .count();

    [(MetricKey::SystemdRunningServices, count_value(running))].into_iter().collect()
}

#[must_use]
pub fn extract_failed_units(listing: &str) -> MetricSet {
    let failed = listing
        .lines()
        .filter(|line| line.contains(".service") && line.contains("failed"))
        .count();

    [(MetricKey::SystemdFailedUnits, count_value(failed))].into_iter().collect()
}

#[must_use]
pub fn extract_log_errors(log_tail: &str) -> MetricSet {
    let signals = log_tail.lines().filter(|line| ERROR_SIGNAL_REGEX.is_match(line)).count();

    [(MetricKey::LogErrorSignals, count_value(signals))].into_iter().collect()
}

/// Node counts from `kubectl get nodes` output.
#[must_use]
pub fn extract_k8s_nodes(nodes: &str) -> MetricSet {
    let Some(rows) = kubectl_rows(nodes) else {
        return MetricSet::new();
    };

    let not_ready = rows
        .iter()
        .filter(|row| row.split_whitespace().nth(1).is_some_and(|status| !status.contains("Ready")))
        .count();

    [
        (MetricKey::K8sNodesTotal, count_value(rows.len())),
        (MetricKey::K8sNodesNotReady, count_value(not_ready)),
    ]
    .into_iter()
    .collect()
}

/// Pod count from `kubectl get pods -A` output.
#[must_use]
pub fn extract_k8s_pods(pods: &str) -> MetricSet {
    let Some(rows) = kubectl_rows(pods) else {
        return MetricSet::new();
    };

    [(MetricKey::K8sPodsTotal, count_value(rows.len()))].into_iter().collect()
}

/// Data rows of a kubectl table, without the header.
///
/// `None` when kubectl was unavailable on the host or the table has no data rows.
fn kubectl_rows(text: &str) -> Option<Vec<&str>> {
    if text.is_empty() || text.to_lowercase().contains("kubectl not found") {
        return None;
    }

    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    match lines.split_first() {
        Some((_header, rows)) if !rows.is_empty() => Some(rows.to_vec()),
        _ => None,
    }
}
