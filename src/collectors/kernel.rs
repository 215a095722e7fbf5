use crate::extract::parse_kernel_params;
use crate::sources::Source;
use std::collections::BTreeMap;

pub async fn collect_sysctl<S: Source>(source: &S) -> BTreeMap<String, String> {
    parse_kernel_params(&source.run_command("sysctl", &["-a"]).await)
}

/// Kernel ring buffer, verbatim.
pub async fn collect_dmesg<S: Source>(source: &S) -> String {
    source.run_command("dmesg", &[]).await
}
