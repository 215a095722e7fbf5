use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One point-in-time audit of a host.
///
/// Every field is always present; a source that could not be read shows up
/// as `"not available"` (or an empty map), never as a missing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub sysctl: BTreeMap<String, String>,
    pub proc: ProcInfo,
    pub dmesg: String,
    #[serde(rename = "transparent_huge_pages")]
    pub thp: HugePages,
    pub memory: String,
    pub disk: DiskInfo,
    pub network: NetworkInfo,
    pub distro: DistroInfo,
    pub power_mgmt: PowerMgmt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcInfo {
    pub cpuinfo: String,
    pub cmdline: String,
    #[serde(rename = "net/softnet_stat")]
    pub net_softnet_stat: String,
    pub cgroups: String,
    pub uptime: String,
    pub vmstat: BTreeMap<String, String>,
    pub loadavg: String,
    pub zoneinfo: String,
    pub partitions: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HugePages {
    pub enabled: String,
    pub defrag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskInfo {
    /// Block device name to the contents of its `queue/scheduler` file.
    pub scheduler: BTreeMap<String, String>,
    /// `lsblk` output.
    #[serde(rename = "number_of_disks")]
    pub block_devices: String,
    /// `df -h` output.
    pub partitions: String,
}

// Overlapping tools are kept side by side on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub ifconfig: String,
    pub ip: String,
    pub netstat: String,
    pub ss: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistroInfo {
    pub issue: String,
    pub release: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerMgmt {
    pub max_cstate: String,
}
