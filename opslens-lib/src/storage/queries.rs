//! Read-side computations shared by the store implementations.

use super::{DailyValue, Metric};
use crate::metrics::{MetricKey, MetricSet};
use crate::runs::{Run, RunRecord};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;

/// Metric rows sorted by key name.
pub fn metric_rows(metrics: &MetricSet) -> Vec<Metric> {
    let mut rows: Vec<Metric> = metrics
        .iter()
        .map(|(key, value)| Metric {
            key,
            value,
            unit: key.unit(),
        })
        .collect();

    rows.sort_by_key(|row| row.key.name());
    rows
}

/// The `limit` most recently created runs, newest first.
pub fn newest_first<'a>(runs: impl Iterator<Item = &'a Run>, limit: usize) -> Vec<Run> {
    let mut runs: Vec<&Run> = runs.collect();
    runs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    runs.into_iter().take(limit).cloned().collect()
}

/// Per-day averages of one metric for one host.
pub fn daily_series<'a>(
    records: impl Iterator<Item = &'a RunRecord>,
    host: &str,
    key: MetricKey,
    since: DateTime<Utc>,
) -> Vec<DailyValue> {
    let mut days: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();

    for record in records {
        if record.run.host != host || record.run.created_at < since {
            continue;
        }

        if let Some(value) = record.metrics.get(key) {
            let entry = days.entry(record.run.created_at.date_naive()).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    days.into_iter()
        .map(|(day, (sum, count))| DailyValue {
            day,
            value: sum / f64::from(count),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Unit;
    use crate::runs::{Artifacts, RunId};
    use chrono::TimeZone;

    fn record(host: &str, at: DateTime<Utc>, pairs: &[(MetricKey, f64)]) -> RunRecord {
        RunRecord {
            run: Run {
                id: RunId::new(),
                created_at: at,
                host: host.to_string(),
                archive_name: "a.tar.gz".to_string(),
                uname: String::new(),
                os_release: String::new(),
            },
            metrics: pairs.iter().copied().collect(),
            artifacts: Artifacts::new(),
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_metric_rows_sorted_by_name_with_units() {
        let metrics: MetricSet = [
            (MetricKey::HealthScore, 90.0),
            (MetricKey::DiskRootUsedPct, 40.0),
            (MetricKey::MemTotalBytes, 1024.0),
        ]
        .into_iter()
        .collect();

        let rows = metric_rows(&metrics);
        let names: Vec<&str> = rows.iter().map(|r| r.key.name()).collect();
        assert_eq!(names, ["disk_root_used_pct", "health_score", "mem_total_bytes"]);
        assert_eq!(rows[0].unit, Some(Unit::Pct));
        assert_eq!(rows[1].unit, None);
        assert_eq!(rows[2].unit, Some(Unit::Bytes));
    }

    #[test]
    fn test_newest_first_respects_limit() {
        let records = [
            record("a", at(1, 0), &[]),
            record("a", at(3, 0), &[]),
            record("a", at(2, 0), &[]),
        ];

        let runs = newest_first(records.iter().map(|r| &r.run), 2);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].created_at, at(3, 0));
        assert_eq!(runs[1].created_at, at(2, 0));
    }

    #[test]
    fn test_daily_series_averages_same_day() {
        let records = [
            record("web", at(2, 1), &[(MetricKey::HealthScore, 80.0)]),
            record("web", at(2, 23), &[(MetricKey::HealthScore, 90.0)]),
            record("web", at(1, 5), &[(MetricKey::HealthScore, 50.0)]),
        ];

        let series = daily_series(records.iter(), "web", MetricKey::HealthScore, at(1, 0));
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].day, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!((series[0].value - 50.0).abs() < 1e-9);
        assert_eq!(series[1].day, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert!((series[1].value - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_daily_series_filters_host_since_and_key() {
        let records = [
            record("web", at(1, 0), &[(MetricKey::HealthScore, 10.0)]),
            record("db", at(5, 0), &[(MetricKey::HealthScore, 20.0)]),
            record("web", at(5, 0), &[(MetricKey::MemUsedPct, 30.0)]),
            record("web", at(6, 0), &[(MetricKey::HealthScore, 40.0)]),
        ];

        let series = daily_series(records.iter(), "web", MetricKey::HealthScore, at(2, 0));
        assert_eq!(series.len(), 1);
        assert!((series[0].value - 40.0).abs() < 1e-9);

        assert!(daily_series(records.iter(), "nobody", MetricKey::HealthScore, at(1, 0)).is_empty());
    }
}
