use crate::sources::NOT_AVAILABLE;
use std::collections::BTreeMap;

/// Splits every line of `text` on the first `delimiter` into a trimmed
/// key/value pair. Lines without the delimiter are dropped, a repeated key
/// keeps its last value. Unavailable input yields an empty map.
pub fn extract_kv(delimiter: &str, text: &str) -> BTreeMap<String, String> {
    let mut kv = BTreeMap::new();
    if text == NOT_AVAILABLE || delimiter.is_empty() {
        return kv;
    }
    for line in text.lines() {
        insert_split(&mut kv, line, delimiter);
    }
    kv
}

/// Parses `sysctl -a` output, which mixes `key = value` and `key: value`
/// lines depending on platform.
///
/// Both delimiters are tried on every line independently, `:` first, so a
/// line containing both is inserted twice and the `=` split wins for its key.
pub fn parse_kernel_params(text: &str) -> BTreeMap<String, String> {
    let mut kv = BTreeMap::new();
    if text == NOT_AVAILABLE {
        return kv;
    }
    for line in text.lines() {
        insert_split(&mut kv, line, ":");
        insert_split(&mut kv, line, "=");
    }
    kv
}

fn insert_split(kv: &mut BTreeMap<String, String>, line: &str, delimiter: &str) {
    if let Some((key, value)) = line.split_once(delimiter) {
        kv.insert(key.trim().to_string(), value.trim().to_string());
    }
}
