use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to render snapshot as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to render snapshot as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to write artifact in {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to move artifact into place at {path}: {source}")]
    Persist {
        path: String,
        source: tempfile::PersistError,
    },
}

/// `audit-<host>-<unix_ts>.<ext>`
pub fn artifact_name(host_name: &str, unix_ts: i64, format: OutputFormat) -> String {
    let host = host_name.replace(['/', '\\'], "_");
    format!("audit-{host}-{unix_ts}.{}", format.extension())
}

/// Field order follows the struct definitions and maps are sorted, so an
/// unchanged host renders byte-identical documents.
pub fn render(snapshot: &Snapshot, format: OutputFormat) -> Result<String, WriteError> {
    let mut body = match format {
        OutputFormat::Json => serde_json::to_string_pretty(snapshot)?,
        OutputFormat::Yaml => serde_yaml::to_string(snapshot)?,
    };
    if !body.ends_with('\n') {
        body.push('\n');
    }
    Ok(body)
}

/// Writes `body` to a temporary file next to the target and renames it
/// into place, so a failed write never leaves a truncated artifact.
pub fn write_artifact(dir: &Path, name: &str, body: &str) -> Result<PathBuf, WriteError> {
    let io_err = |source: std::io::Error| WriteError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".audit-")
        .suffix(".partial")
        .tempfile_in(dir)
        .map_err(io_err)?;
    tmp.write_all(body.as_bytes()).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(0o644))
            .map_err(io_err)?;
    }

    let target = dir.join(name);
    tmp.persist(&target).map_err(|source| WriteError::Persist {
        path: target.display().to_string(),
        source,
    })?;
    Ok(target)
}
