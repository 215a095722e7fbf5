use crate::extract::extract_kv;
use crate::snapshot::ProcInfo;
use crate::sources::Source;

pub async fn collect<S: Source>(source: &S) -> ProcInfo {
    ProcInfo {
        cpuinfo: source.read_file("/proc/cpuinfo").await,
        cmdline: source.read_file("/proc/cmdline").await,
        net_softnet_stat: source.read_file("/proc/net/softnet_stat").await,
        cgroups: source.read_file("/proc/cgroups").await,
        uptime: source.read_file("/proc/uptime").await,
        vmstat: extract_kv(" ", &source.read_file("/proc/vmstat").await),
        loadavg: source.read_file("/proc/loadavg").await,
        zoneinfo: source.read_file("/proc/zoneinfo").await,
        partitions: source.read_file("/proc/partitions").await,
        version: source.read_file("/proc/version").await,
    }
}

/// `free -m` report.
pub async fn collect_memory<S: Source>(source: &S) -> String {
    source.run_command("free", &["-m"]).await
}
