use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// The logical files a collection script places in a diagnostic bundle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display, EnumString, IntoStaticStr, Serialize, Deserialize,
)]
pub enum BundleFile {
    #[strum(serialize = "meta.txt")]
    #[serde(rename = "meta.txt")]
    Meta,

    #[strum(serialize = "uname.txt")]
    #[serde(rename = "uname.txt")]
    Uname,

    #[strum(serialize = "os_release.txt")]
    #[serde(rename = "os_release.txt")]
    OsRelease,

    #[strum(serialize = "df.txt")]
    #[serde(rename = "df.txt")]
    Df,

    #[strum(serialize = "free.txt")]
    #[serde(rename = "free.txt")]
    Free,

    #[strum(serialize = "log_tail.txt")]
    #[serde(rename = "log_tail.txt")]
    LogTail,

    #[strum(serialize = "systemd_running_services.txt")]
    #[serde(rename = "systemd_running_services.txt")]
    SystemdRunningServices,

    #[strum(serialize = "systemd_failed_units.txt")]
    #[serde(rename = "systemd_failed_units.txt")]
    SystemdFailedUnits,

    #[strum(serialize = "k8s_nodes.txt")]
    #[serde(rename = "k8s_nodes.txt")]
    K8sNodes,

    #[strum(serialize = "k8s_pods.txt")]
    #[serde(rename = "k8s_pods.txt")]
    K8sPods,
}

impl BundleFile {
    /// The file name as it appears at the end of a member path.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        self.into()
    }
}
