pub mod disk;
pub mod distro;
pub mod kernel;
#[cfg(test)]
pub mod mock;
pub mod network;
pub mod power;
pub mod proc;
pub mod thp;

use crate::snapshot::Snapshot;
use crate::sources::Source;
use tracing::debug;

/// Runs every collector once and assembles the result.
///
/// Collectors share no state, so with `parallel` they are polled
/// concurrently and joined; otherwise they run one after another.
pub async fn collect_snapshot<S: Source>(source: &S, parallel: bool) -> Snapshot {
    debug!(parallel, "running collectors");
    if !parallel {
        return Snapshot {
            sysctl: kernel::collect_sysctl(source).await,
            proc: proc::collect(source).await,
            dmesg: kernel::collect_dmesg(source).await,
            thp: thp::collect(source).await,
            memory: proc::collect_memory(source).await,
            disk: disk::collect(source).await,
            network: network::collect(source).await,
            distro: distro::collect(source).await,
            power_mgmt: power::collect(source).await,
        };
    }

    let (sysctl, proc, dmesg, thp, memory, disk, network, distro, power_mgmt) = tokio::join!(
        kernel::collect_sysctl(source),
        proc::collect(source),
        kernel::collect_dmesg(source),
        thp::collect(source),
        proc::collect_memory(source),
        disk::collect(source),
        network::collect(source),
        distro::collect(source),
        power::collect(source),
    );

    Snapshot {
        sysctl,
        proc,
        dmesg,
        thp,
        memory,
        disk,
        network,
        distro,
        power_mgmt,
    }
}
