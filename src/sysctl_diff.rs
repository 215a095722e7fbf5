use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamChange {
    pub key: String,
    pub left: String,
    pub right: String,
}

impl fmt::Display for ParamChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} => {})", self.key, self.left, self.right)
    }
}

// Only the kernel parameters of a written audit artifact are of interest.
#[derive(Deserialize)]
struct ArtifactParams {
    sysctl: BTreeMap<String, String>,
}

pub fn load_params(path: &Path) -> Result<BTreeMap<String, String>, DiffError> {
    let text = fs::read_to_string(path).map_err(|source| DiffError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(parse_params(&text))
}

/// Accepts a JSON or YAML audit artifact, or a raw `sysctl -a` dump where a
/// line counts only when it holds exactly one `=`.
pub fn parse_params(text: &str) -> BTreeMap<String, String> {
    if let Ok(artifact) = serde_json::from_str::<ArtifactParams>(text) {
        return artifact.sysctl;
    }
    if let Ok(artifact) = serde_yaml::from_str::<ArtifactParams>(text) {
        return artifact.sysctl;
    }

    let mut kv = BTreeMap::new();
    for line in text.lines() {
        let mut parts = line.trim().split('=');
        if let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) {
            kv.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    kv
}

/// Keys present on both sides with different values, in key order.
pub fn diff(left: &BTreeMap<String, String>, right: &BTreeMap<String, String>) -> Vec<ParamChange> {
    left.iter()
        .filter_map(|(key, l)| {
            let r = right.get(key)?;
            (l != r).then(|| ParamChange {
                key: key.clone(),
                left: l.clone(),
                right: r.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST_A: &str = "kernel.ostype = Linux\nvm.swappiness = 60\nnet.core.somaxconn = 128\nkernel.only_a = 1\n";
    const HOST_B: &str = "vm.swappiness = 10\nkernel.ostype = Linux\nnet.core.somaxconn = 4096\nkernel.only_b = 1\n";

    #[test]
    fn reports_changed_shared_keys_once_in_order() {
        let changes = diff(&parse_params(HOST_A), &parse_params(HOST_B));
        let lines: Vec<String> = changes.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "net.core.somaxconn (128 => 4096)".to_string(),
                "vm.swappiness (60 => 10)".to_string(),
            ]
        );
    }

    #[test]
    fn lines_with_zero_or_several_equals_are_ignored() {
        let kv = parse_params("a = 1\nno delimiter here\nb = x=y\n  c=3  \n");
        assert_eq!(kv.len(), 2);
        assert_eq!(kv["a"], "1");
        assert_eq!(kv["c"], "3");
    }

    #[test]
    fn audit_artifact_is_accepted() {
        let artifact = r#"{"sysctl": {"vm.swappiness": "60"}, "dmesg": "not available"}"#;
        let kv = parse_params(artifact);
        assert_eq!(kv.len(), 1);
        assert_eq!(kv["vm.swappiness"], "60");
    }

    #[test]
    fn unreadable_input_is_an_error() {
        let err = load_params(Path::new("/nonexistent/sysctl.txt")).unwrap_err();
        assert!(matches!(err, DiffError::Read { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, HOST_A).unwrap();
        let kv = load_params(&path).unwrap();
        assert_eq!(kv.len(), 4);
    }
}
