//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::time::SystemTime;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::ClaimsError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, ClaimsError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| ClaimsError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| ClaimsError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ClaimsError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ClaimsError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| ClaimsError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| ClaimsError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| ClaimsError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ClaimsError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ClaimsError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Modification time and length of a file, `None` if it does not exist
pub fn file_stamp<P: AsRef<Path>>(path: P) -> Option<(SystemTime, u64)> {
    let meta = fs::metadata(path).ok()?;
    Some((meta.modified().ok()?, meta.len()))
}

/// Lay an updated document over the one it was read from
///
/// Keys in `replaced` are dropped from `original` before `updated` is laid
/// over it, so fields the updated document leaves out do not linger. Keys in
/// `kept` retain the original value whenever the original has one.
pub fn overlay_document(
    original: &Value,
    updated: Value,
    replaced: &[&str],
    kept: &[&str],
) -> Value {
    let mut merged = match original {
        Value::Object(map) => map.clone(),
        _ => return updated,
    };
    let updated = match updated {
        Value::Object(map) => map,
        other => return other,
    };

    let kept_values: Vec<(String, Value)> = kept
        .iter()
        .filter_map(|key| merged.get(*key).map(|v| (key.to_string(), v.clone())))
        .collect();

    for key in replaced {
        merged.remove(*key);
    }
    merged.extend(updated);
    merged.extend(kept_values);
    Value::Object(merged)
}
