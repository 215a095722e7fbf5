use crate::snapshot::DiskInfo;
use crate::sources::Source;
use std::collections::BTreeMap;

const BLOCK_DIR: &str = "/sys/block";

pub async fn collect<S: Source>(source: &S) -> DiskInfo {
    DiskInfo {
        scheduler: collect_schedulers(source, BLOCK_DIR).await,
        block_devices: source.run_command("lsblk", &[]).await,
        partitions: source.run_command("df", &["-h"]).await,
    }
}

/// I/O scheduler per block device found under `block_dir`. Devices without
/// a `queue/scheduler` file (e.g. some virtual devices) are left out.
pub async fn collect_schedulers<S: Source>(source: &S, block_dir: &str) -> BTreeMap<String, String> {
    let mut schedulers = BTreeMap::new();
    for device in source.list_dir(block_dir).await {
        let path = format!("{block_dir}/{device}/queue/scheduler");
        if source.exists(&path).await {
            let scheduler = source.read_file(&path).await;
            schedulers.insert(device, scheduler);
        }
    }
    schedulers
}
