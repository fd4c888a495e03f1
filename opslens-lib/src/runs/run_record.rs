use super::{Artifacts, Run};
use crate::metrics::MetricSet;
use serde::{Deserialize, Serialize};

/// Everything produced by ingesting one archive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub run: Run,
    pub metrics: MetricSet,
    pub artifacts: Artifacts,
}
