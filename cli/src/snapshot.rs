//! JSON snapshot of a `MemStore`.
//!
//! The file is a single JSON object mapping each key to its stored value
//! as text. Stored values are record JSON, so they are always UTF-8.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ledgerstore_hostapi::MemStore;

/// Load a snapshot. A missing file is an empty world state.
pub fn load(path: &Path) -> Result<MemStore> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no snapshot, starting empty");
        return Ok(MemStore::new());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let entries: BTreeMap<String, String> = serde_json::from_str(&text)
        .with_context(|| format!("snapshot {} is not a JSON object of strings", path.display()))?;

    tracing::debug!(path = %path.display(), keys = entries.len(), "loaded snapshot");
    Ok(MemStore::with_data(
        entries
            .into_iter()
            .map(|(key, value)| (key, value.into_bytes()))
            .collect(),
    ))
}

/// Write `store` to `path`, replacing the previous snapshot.
pub fn save(path: &Path, store: &MemStore) -> Result<()> {
    let mut entries = BTreeMap::new();
    for (key, value) in store.iter() {
        let text = std::str::from_utf8(value)
            .with_context(|| format!("value at {key} is not UTF-8"))?;
        entries.insert(key.as_str(), text);
    }
    let json = serde_json::to_string_pretty(&entries).context("failed to encode snapshot")?;

    // Written beside the target, then renamed into place.
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to replace snapshot {}", path.display()))?;

    tracing::debug!(path = %path.display(), keys = store.len(), "saved snapshot");
    Ok(())
}
