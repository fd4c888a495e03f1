use super::artifacts::{MAX_SUMMARY_CHARS, truncate_head};
use super::{Artifacts, Run, RunId, RunRecord};
use crate::Result;
use crate::archive::{Bundle, BundleFile};
use crate::metrics::{apply_health_score, extract_host, extract_metrics};
use chrono::{DateTime, Utc};
use ohno::EnrichableExt;
use strum::IntoEnumIterator;

/// Log target for run assembly
const LOG_TARGET: &str = "      runs";

/// Decode an archive and assemble the run, metrics, and artifacts it describes.
///
/// Nothing is persisted. The same input always yields the same host,
/// metrics, and artifacts; only the run id differs between calls.
///
/// # Errors
///
/// Returns an error if the archive is not a readable gzip-compressed tar stream.
pub fn parse_run(archive: &[u8], archive_name: &str, now: DateTime<Utc>) -> Result<RunRecord> {
    let bundle = Bundle::from_gzip(archive).map_err(|e| e.enrich_with(|| format!("decoding diagnostic archive '{archive_name}'")))?;
    Ok(assemble_run(&bundle, archive_name, now))
}

/// Assemble a run from an already decoded bundle.
#[must_use]
pub fn assemble_run(bundle: &Bundle, archive_name: &str, now: DateTime<Utc>) -> RunRecord {
    let mut artifacts = Artifacts::new();
    for file in BundleFile::iter() {
        artifacts.insert(file, &bundle.read_file(file));
    }

    let host = extract_host(&bundle.read_file(BundleFile::Meta));
    let mut metrics = extract_metrics(bundle);
    let score = apply_health_score(&mut metrics);

    let run = Run {
        id: RunId::new(),
        created_at: now,
        host,
        archive_name: archive_name.to_string(),
        uname: summary(&bundle.read_file(BundleFile::Uname)),
        os_release: summary(&bundle.read_file(BundleFile::OsRelease)),
    };

    log::debug!(
        target: LOG_TARGET,
        "Assembled run {} for host '{}' from '{archive_name}': {} metrics, health score {score}",
        run.id,
        run.host,
        metrics.len()
    );

    RunRecord { run, metrics, artifacts }
}

fn summary(text: &str) -> String {
    truncate_head(text.trim(), MAX_SUMMARY_CHARS).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::test_archive::TestArchive;
    use crate::metrics::{MetricKey, UNKNOWN_HOST};
    use crate::runs::MAX_ARTIFACT_CHARS;
    use chrono::TimeZone;

    const FREE: &str = "              total        used        free\nMem:        1000        500        500\nSwap:          0          0          0\n";
    const DF: &str = "Filesystem 1K-blocks Used Available Use% Mounted on\n/dev/sda1 100 95 5 95% /\n";
    const LOG: &str = "all good\nERROR one\nsomething failed\npanic: boom\n";
    const FAILED: &str = "  UNIT LOAD ACTIVE SUB\n  nginx.service loaded failed failed\n";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn sample_archive() -> Vec<u8> {
        TestArchive::new()
            .dir("bundle-20240501")
            .file("bundle-20240501/meta.txt", "collected_at=2024-05-01\nhost=web-01\n")
            .file("bundle-20240501/uname.txt", "  Linux web-01 6.1.0 x86_64\n")
            .file("bundle-20240501/os_release.txt", "NAME=\"Debian\"\n")
            .file("bundle-20240501/free.txt", FREE)
            .file("bundle-20240501/df.txt", DF)
            .file("bundle-20240501/log_tail.txt", LOG)
            .file("bundle-20240501/systemd_failed_units.txt", FAILED)
            .finish()
    }

    #[test]
    fn test_parse_scores_example_bundle() {
        let record = parse_run(&sample_archive(), "web-01.tar.gz", now()).unwrap();

        assert_eq!(record.run.host, "web-01");
        assert_eq!(record.run.archive_name, "web-01.tar.gz");
        assert_eq!(record.run.created_at, now());
        assert_eq!(record.run.uname, "Linux web-01 6.1.0 x86_64");
        assert_eq!(record.run.os_release, "NAME=\"Debian\"");

        assert_eq!(record.metrics.get(MetricKey::MemUsedPct), Some(50.0));
        assert_eq!(record.metrics.get(MetricKey::DiskRootUsedPct), Some(95.0));
        assert_eq!(record.metrics.get(MetricKey::LogErrorSignals), Some(3.0));
        assert_eq!(record.metrics.get(MetricKey::SystemdFailedUnits), Some(1.0));
        assert_eq!(record.metrics.get(MetricKey::HealthScore), Some(64.0));
    }

    #[test]
    fn test_all_artifacts_recorded() {
        let record = parse_run(&sample_archive(), "a.tar.gz", now()).unwrap();
        assert_eq!(record.artifacts.len(), BundleFile::iter().count());
        assert_eq!(record.artifacts.get(BundleFile::Df), Some(DF));
        assert_eq!(record.artifacts.get(BundleFile::K8sPods), Some(""));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let archive = sample_archive();
        let first = parse_run(&archive, "a.tar.gz", now()).unwrap();
        let second = parse_run(&archive, "a.tar.gz", now()).unwrap();

        assert_ne!(first.run.id, second.run.id);
        assert_eq!(first.run.host, second.run.host);
        assert_eq!(first.metrics, second.metrics);
        assert_eq!(first.artifacts, second.artifacts);
    }

    #[test]
    fn test_empty_bundle_is_healthy() {
        let archive = TestArchive::new().dir("empty").finish();
        let record = parse_run(&archive, "empty.tar.gz", now()).unwrap();

        assert_eq!(record.run.host, UNKNOWN_HOST);
        assert_eq!(record.metrics.get(MetricKey::HealthScore), Some(100.0));
        assert_eq!(record.metrics.get(MetricKey::LogErrorSignals), Some(0.0));
        assert!(record.artifacts.iter().all(|(_, content)| content.is_empty()));
    }

    #[test]
    fn test_hostile_members_do_not_contribute() {
        let archive = TestArchive::new()
            .file("../log_tail.txt", "error error error")
            .file("/etc/meta.txt", "host=evil")
            .symlink("b/df.txt", "/etc/shadow")
            .file("b/meta.txt", "host=good")
            .finish();
        let record = parse_run(&archive, "x.tar.gz", now()).unwrap();

        assert_eq!(record.run.host, "good");
        assert_eq!(record.metrics.get(MetricKey::LogErrorSignals), Some(0.0));
        assert!(!record.metrics.contains(MetricKey::DiskRootUsedPct));
        assert_eq!(record.artifacts.get(BundleFile::Df), Some(""));
    }

    #[test]
    fn test_long_log_truncated_to_tail() {
        let log = format!("HEAD{}", "x".repeat(MAX_ARTIFACT_CHARS + 100));
        let archive = TestArchive::new().file("b/log_tail.txt", &log).finish();
        let record = parse_run(&archive, "x.tar.gz", now()).unwrap();

        let stored = record.artifacts.get(BundleFile::LogTail).unwrap();
        assert_eq!(stored.chars().count(), MAX_ARTIFACT_CHARS);
        assert!(!stored.contains("HEAD"));
    }

    #[test]
    fn test_summaries_truncated_to_head() {
        let uname = "u".repeat(MAX_SUMMARY_CHARS + 10);
        let archive = TestArchive::new().file("b/uname.txt", &uname).finish();
        let record = parse_run(&archive, "x.tar.gz", now()).unwrap();
        assert_eq!(record.run.uname.chars().count(), MAX_SUMMARY_CHARS);
    }

    #[test]
    fn test_corrupt_archive_names_the_upload() {
        let err = parse_run(b"definitely not gzip", "broken.tar.gz", now()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("broken.tar.gz"), "{message}");
    }
}
