use super::MetricKey;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Log target for metric sets
const LOG_TARGET: &str = "   metrics";

/// The metrics of one run, keyed by [`MetricKey`].
///
/// Every stored value is finite; non-finite values are refused on insert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSet {
    values: BTreeMap<MetricKey, f64>,
}

impl MetricSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from name/value pairs, dropping names that are not known
    /// metric keys and values that are not finite.
    pub fn from_named<S: AsRef<str>>(pairs: impl IntoIterator<Item = (S, f64)>) -> Self {
        let mut set = Self::new();
        for (name, value) in pairs {
            let name = name.as_ref();
            match MetricKey::from_str(name) {
                Ok(key) => {
                    let _ = set.insert(key, value);
                }
                Err(_) => log::warn!(target: LOG_TARGET, "Ignoring unknown metric '{name}'"),
            }
        }
        set
    }

    /// Insert a value, replacing any previous value for the key.
    ///
    /// Returns `false` and leaves the set untouched if `value` is NaN or infinite.
    pub fn insert(&mut self, key: MetricKey, value: f64) -> bool {
        if !value.is_finite() {
            log::debug!(target: LOG_TARGET, "Refusing non-finite value {value} for '{key}'");
            return false;
        }

        let _ = self.values.insert(key, value);
        true
    }

    /// Merge another set into this one.
    pub fn extend(&mut self, other: Self) {
        self.values.extend(other.values);
    }

    #[must_use]
    pub fn get(&self, key: MetricKey) -> Option<f64> {
        self.values.get(&key).copied()
    }

    /// The value for `key`, or `0.0` when absent.
    #[must_use]
    pub fn get_or_zero(&self, key: MetricKey) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    #[must_use]
    pub fn contains(&self, key: MetricKey) -> bool {
        self.values.contains_key(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = MetricKey> + '_ {
        self.values.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(MetricKey, f64)> for MetricSet {
    fn from_iter<I: IntoIterator<Item = (MetricKey, f64)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            let _ = set.insert(key, value);
        }
        set
    }
}
