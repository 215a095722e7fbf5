use crate::snapshot::DistroInfo;
use crate::sources::{Source, NOT_AVAILABLE};

/// Probed in order; the first file present wins.
pub const RELEASE_FILES: [&str; 16] = [
    "/etc/SuSE-release",
    "/etc/redhat-release",
    "/etc/redhat_version",
    "/etc/fedora-release",
    "/etc/slackware-release",
    "/etc/slackware-version",
    "/etc/debian_release",
    "/etc/debian_version",
    "/etc/os-release",
    "/etc/mandrake-release",
    "/etc/yellowdog-release",
    "/etc/sun-release",
    "/etc/release",
    "/etc/gentoo-release",
    "/etc/system-release",
    "/etc/lsb-release",
];

pub async fn collect<S: Source>(source: &S) -> DistroInfo {
    DistroInfo {
        issue: source.read_file("/etc/issue").await,
        release: detect_release(source).await,
    }
}

pub async fn detect_release<S: Source>(source: &S) -> String {
    for path in RELEASE_FILES {
        if source.exists(path).await {
            return source.read_file(path).await;
        }
    }
    NOT_AVAILABLE.to_string()
}
