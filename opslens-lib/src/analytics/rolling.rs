use crate::Result;
use crate::metrics::MetricKey;
use crate::storage::{DailyValue, Store};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use core::str::FromStr;
use serde::Serialize;

/// Log target for rolling averages
const LOG_TARGET: &str = " analytics";

/// Number of days, including the current one, averaged into each rolling value.
pub const ROLLING_WINDOW_DAYS: usize = 7;

/// One day of a smoothed metric series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RollingPoint {
    pub day: NaiveDate,

    /// Average of the day's runs.
    pub value: f64,

    /// Mean of this day's value and up to six preceding days present in the series.
    pub rolling7: f64,
}

/// Smooth a series of daily values, oldest first.
///
/// Each window only covers days that are present in the input; missing days
/// are neither padded nor interpolated.
#[must_use]
pub fn rolling_window(daily: &[DailyValue]) -> Vec<RollingPoint> {
    daily
        .iter()
        .enumerate()
        .map(|(index, current)| {
            let start = (index + 1).saturating_sub(ROLLING_WINDOW_DAYS);
            let window = daily.get(start..=index).unwrap_or_default();
            let sum: f64 = window.iter().map(|d| d.value).sum();

            #[expect(clippy::cast_precision_loss, reason = "windows hold at most seven values")]
            let rolling7 = sum / window.len() as f64;

            RollingPoint {
                day: current.day,
                value: current.value,
                rolling7,
            }
        })
        .collect()
}

/// The rolling series of `key` for `host` over the `days` days preceding `now`.
///
/// Unknown hosts and metric names yield an empty series.
pub fn rolling_average<S: Store + ?Sized>(store: &S, host: &str, key: &str, days: u32, now: DateTime<Utc>) -> Result<Vec<RollingPoint>> {
    let Ok(key) = MetricKey::from_str(key) else {
        log::debug!(target: LOG_TARGET, "No series for unknown metric '{key}'");
        return Ok(Vec::new());
    };

    let since = now - Duration::days(i64::from(days));
    let daily = store.metric_time_series(host, key, since)?;
    log::debug!(target: LOG_TARGET, "Smoothing {} days of '{key}' for host '{host}'", daily.len());

    Ok(rolling_window(&daily))
}
