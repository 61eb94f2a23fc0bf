//! JSON snapshots of the global store.
//!
//! The file is a flat JSON object mapping each key to its value, integers
//! as numbers and text as strings:
//!
//! ```text
//! {"a":20,"name":"alice"}
//! ```
//!
//! Only the global store is ever written. Open scopes are not persisted.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::{Error, Result, Store, Value};

/// Writes `store` to `path`.
///
/// The snapshot is written to a temporary file in the same directory and
/// renamed over `path`, so a failed save never leaves a truncated file.
/// Keys are written in sorted order.
///
/// # Errors
///
/// Returns an error if the directory is not writable or the rename fails.
pub fn save_store(store: &Store, path: &Path) -> Result<()> {
    let sorted: BTreeMap<&str, &Value> = store.iter().collect();
    let json = serde_json::to_vec(&sorted)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(&json)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    log::info!("Saved {} keys to {:?}", store.len(), path);
    Ok(())
}

/// Reads a snapshot from `path`.
///
/// Each scalar is coerced through [`Value::from_json`]. Entries that are
/// not scalars are skipped with a warning.
///
/// Integers and text round-trip unchanged, except text that reads as an
/// integer literal: `Text("42")` is saved as `"42"` and reloads as
/// `Integer(42)`. Command input can never produce such text.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, or its
/// top level is not an object.
pub fn load_store(path: &Path) -> Result<Store> {
    let data = fs::read(path)?;
    let decoded: serde_json::Value = serde_json::from_slice(&data)?;

    let serde_json::Value::Object(map) = decoded else {
        return Err(Error::corruption(format!("{:?} does not hold a JSON object", path)));
    };

    let mut store = Store::new();
    for (key, json) in map {
        match Value::from_json(&json) {
            Some(value) => store.set(key, value),
            None => log::warn!("Skipping non-scalar entry {:?} in {:?}", key, path),
        }
    }

    Ok(store)
}

/// Reads a snapshot from `path`, falling back to an empty store.
///
/// A missing, unreadable or malformed file is not fatal: a warning is
/// logged and an empty store is returned.
pub fn load_or_empty(path: &Path) -> Store {
    log::info!("Attempting to load saved data from {:?}", path);
    match load_store(path) {
        Ok(store) => {
            log::info!("Loaded {} keys from {:?}", store.len(), path);
            store
        }
        Err(e) => {
            log::warn!("{}. Defaulting to empty store", e);
            Store::new()
        }
    }
}
