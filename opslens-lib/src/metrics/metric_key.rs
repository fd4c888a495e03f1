use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Unit tag attached to a stored metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum Unit {
    #[strum(serialize = "pct")]
    #[serde(rename = "pct")]
    Pct,

    #[strum(serialize = "bytes")]
    #[serde(rename = "bytes")]
    Bytes,
}

/// The known metric names.
///
/// Extractors can only emit keys from this set, and stored metrics whose name
/// is not listed here are dropped when loaded.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
pub enum MetricKey {
    #[strum(serialize = "health_score")]
    #[serde(rename = "health_score")]
    HealthScore,

    #[strum(serialize = "mem_used_pct")]
    #[serde(rename = "mem_used_pct")]
    MemUsedPct,

    #[strum(serialize = "mem_used_bytes")]
    #[serde(rename = "mem_used_bytes")]
    MemUsedBytes,

    #[strum(serialize = "mem_total_bytes")]
    #[serde(rename = "mem_total_bytes")]
    MemTotalBytes,

    #[strum(serialize = "disk_root_used_pct")]
    #[serde(rename = "disk_root_used_pct")]
    DiskRootUsedPct,

    #[strum(serialize = "systemd_running_services")]
    #[serde(rename = "systemd_running_services")]
    SystemdRunningServices,

    #[strum(serialize = "systemd_failed_units")]
    #[serde(rename = "systemd_failed_units")]
    SystemdFailedUnits,

    #[strum(serialize = "log_error_signals")]
    #[serde(rename = "log_error_signals")]
    LogErrorSignals,

    #[strum(serialize = "k8s_nodes_total")]
    #[serde(rename = "k8s_nodes_total")]
    K8sNodesTotal,

    #[strum(serialize = "k8s_nodes_not_ready")]
    #[serde(rename = "k8s_nodes_not_ready")]
    K8sNodesNotReady,

    #[strum(serialize = "k8s_pods_total")]
    #[serde(rename = "k8s_pods_total")]
    K8sPodsTotal,
}

impl MetricKey {
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Unit derived from the name suffix: `_pct` keys are percentages, `_bytes` keys are byte counts.
    #[must_use]
    pub fn unit(self) -> Option<Unit> {
        let name = self.name();
        if name.ends_with("_pct") {
            Some(Unit::Pct)
        } else if name.ends_with("_bytes") {
            Some(Unit::Bytes)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::HealthScore => "Composite health score (0..100)",
            Self::MemUsedPct => "Used memory as a percentage of total memory",
            Self::MemUsedBytes => "Used memory",
            Self::MemTotalBytes => "Total memory",
            Self::DiskRootUsedPct => "Used capacity of the root filesystem",
            Self::SystemdRunningServices => "Loaded systemd services",
            Self::SystemdFailedUnits => "Failed systemd services",
            Self::LogErrorSignals => "Recent log lines mentioning errors or failures",
            Self::K8sNodesTotal => "Kubernetes nodes",
            Self::K8sNodesNotReady => "Kubernetes nodes not reporting Ready",
            Self::K8sPodsTotal => "Kubernetes pods",
        }
    }
}
