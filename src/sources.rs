use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::fs;
use tokio::process::Command;
use tokio::time;
use tracing::{debug, warn};

/// Value substituted for any file, command or directory that could not be read.
pub const NOT_AVAILABLE: &str = "not available";

/// Primitive readers every collector is built from.
///
/// Implementations never fail: an unreadable file or a failing command
/// resolves to [`NOT_AVAILABLE`], an unreadable directory to an empty list.
pub trait Source {
    /// Trimmed contents of `path`.
    async fn read_file(&self, path: &str) -> String;
    /// Trimmed stdout of `name args...`. Stderr and the exit code are discarded.
    async fn run_command(&self, name: &str, args: &[&str]) -> String;
    /// Entry names under `path`, sorted.
    async fn list_dir(&self, path: &str) -> Vec<String>;
    async fn exists(&self, path: &str) -> bool;
}

/// Reads from the running host. Every filesystem path is resolved under
/// `sysroot`, commands run from `PATH` as usual.
#[derive(Debug, Clone)]
pub struct HostSource {
    sysroot: PathBuf,
    command_timeout: Duration,
    file_timeout: Duration,
}

impl HostSource {
    pub fn new(sysroot: impl Into<PathBuf>, command_timeout: Duration, file_timeout: Duration) -> Self {
        Self {
            sysroot: sysroot.into(),
            command_timeout,
            file_timeout,
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.sysroot.join(path.trim_start_matches('/'))
    }
}

impl Source for HostSource {
    async fn read_file(&self, path: &str) -> String {
        let full = self.resolve(path);
        match time::timeout(self.file_timeout, fs::read(&full)).await {
            Ok(Ok(bytes)) => String::from_utf8_lossy(&bytes).trim().to_string(),
            Ok(Err(err)) => {
                debug!(path = %full.display(), error = %err, "file unavailable");
                NOT_AVAILABLE.to_string()
            }
            Err(_elapsed) => {
                warn!(path = %full.display(), timeout = ?self.file_timeout, "file read timeout");
                NOT_AVAILABLE.to_string()
            }
        }
    }

    async fn run_command(&self, name: &str, args: &[&str]) -> String {
        let mut cmd = Command::new(name);
        cmd.args(args).stdin(Stdio::null()).kill_on_drop(true);

        match time::timeout(self.command_timeout, cmd.output()).await {
            Ok(Ok(output)) if output.status.success() => {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            }
            Ok(Ok(output)) => {
                debug!(command = name, ?args, status = %output.status, "command failed");
                NOT_AVAILABLE.to_string()
            }
            Ok(Err(err)) => {
                debug!(command = name, ?args, error = %err, "command could not be started");
                NOT_AVAILABLE.to_string()
            }
            Err(_elapsed) => {
                warn!(command = name, ?args, timeout = ?self.command_timeout, "command timeout");
                NOT_AVAILABLE.to_string()
            }
        }
    }

    async fn list_dir(&self, path: &str) -> Vec<String> {
        let full = self.resolve(path);
        match time::timeout(self.file_timeout, read_dir_names(&full)).await {
            Ok(Ok(names)) => names,
            Ok(Err(err)) => {
                debug!(path = %full.display(), error = %err, "directory unavailable");
                Vec::new()
            }
            Err(_elapsed) => {
                warn!(path = %full.display(), timeout = ?self.file_timeout, "directory listing timeout");
                Vec::new()
            }
        }
    }

    async fn exists(&self, path: &str) -> bool {
        fs::try_exists(self.resolve(path)).await.unwrap_or(false)
    }
}

async fn read_dir_names(path: &Path) -> std::io::Result<Vec<String>> {
    let mut entries = fs::read_dir(path).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().to_string());
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(sysroot: &Path) -> HostSource {
        HostSource::new(sysroot, Duration::from_secs(5), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn missing_file_is_not_available() {
        let dir = tempfile::tempdir().unwrap();
        let source = host(dir.path());
        assert_eq!(source.read_file("/proc/does-not-exist").await, NOT_AVAILABLE);
        assert_eq!(source.read_file("/etc/nope/nope").await, NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn file_contents_are_trimmed_and_resolved_under_sysroot() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("proc")).unwrap();
        std::fs::write(dir.path().join("proc/uptime"), "  350735.47 234388.90\n\n").unwrap();

        let source = host(dir.path());
        assert_eq!(source.read_file("/proc/uptime").await, "350735.47 234388.90");
        assert!(source.exists("/proc/uptime").await);
        assert!(!source.exists("/proc/loadavg").await);
    }

    #[tokio::test]
    async fn directory_in_place_of_file_is_not_available() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("etc/issue")).unwrap();

        let source = host(dir.path());
        assert!(source.exists("/etc/issue").await);
        assert_eq!(source.read_file("/etc/issue").await, NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced_not_dropped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dmesg.log"), b"[0.0] ok \xff\n").unwrap();

        let source = host(dir.path());
        assert_eq!(source.read_file("/dmesg.log").await, "[0.0] ok \u{fffd}");
    }

    #[tokio::test]
    async fn missing_or_failing_commands_are_not_available() {
        let source = host(Path::new("/"));
        assert_eq!(
            source.run_command("hostaudit-no-such-binary-4711", &[]).await,
            NOT_AVAILABLE
        );
        assert_eq!(source.run_command("sh", &["-c", "echo partial; exit 3"]).await, NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn command_stdout_is_trimmed() {
        let source = host(Path::new("/"));
        let out = source
            .run_command("sh", &["-c", "echo '  hello  '; echo noise >&2"])
            .await;
        assert_eq!(out, "hello");
    }

    #[tokio::test]
    async fn hung_command_times_out_to_not_available() {
        let source = HostSource::new("/", Duration::from_millis(100), Duration::from_secs(5));
        assert_eq!(source.run_command("sleep", &["5"]).await, NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn list_dir_is_sorted_and_empty_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        for dev in ["sdb", "nvme0n1", "sda"] {
            std::fs::create_dir_all(dir.path().join("sys/block").join(dev)).unwrap();
        }

        let source = host(dir.path());
        assert_eq!(source.list_dir("/sys/block").await, vec!["nvme0n1", "sda", "sdb"]);
        assert!(source.list_dir("/sys/nothing-here").await.is_empty());
    }
}
