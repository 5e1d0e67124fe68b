//! Persistence gateway: snapshot load/save and document export.
//!
//! All three operations return typed `Result`s; nothing here panics or lets
//! an error escape. Writes go to a temporary file in the target directory and
//! are renamed into place, so a failed write leaves the previous file
//! untouched. Writes and reads of the same path are serialized through a
//! path-scoped async lock so a concurrent load can never observe a
//! half-written file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Why a snapshot load failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    /// No snapshot exists at the path.
    #[error("no snapshot at {path}")]
    Missing {
        /// The snapshot path.
        path: String,
    },
    /// The file exists but could not be read.
    #[error("cannot read snapshot {path}: {message}")]
    Read {
        /// The snapshot path.
        path: String,
        /// Underlying I/O error text.
        message: String,
    },
    /// The file was read but is not a valid snapshot (malformed JSON or a
    /// removed/renamed field).
    #[error("snapshot {path} does not match the current schema: {message}")]
    Decode {
        /// The snapshot path.
        path: String,
        /// Underlying decode error text.
        message: String,
    },
}

/// Why a snapshot save failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SaveError {
    /// The state could not be serialized.
    #[error("cannot serialize snapshot: {message}")]
    Serialize {
        /// Underlying serializer error text.
        message: String,
    },
    /// The temp write or the rename failed.
    #[error("cannot write snapshot {path}: {message}")]
    Write {
        /// The snapshot path.
        path: String,
        /// Underlying I/O error text.
        message: String,
    },
}

/// Why a document export failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExportError {
    /// The write to the external tool's config path failed.
    #[error("cannot export document to {path}: {message}")]
    Write {
        /// The export target path.
        path: String,
        /// Underlying I/O error text.
        message: String,
    },
}

/// Per-path write locks. Entries are created on first use and live for the
/// process lifetime; the set of paths is small and fixed.
static PATH_LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>> = OnceLock::new();

/// The lock guarding reads and writes of `path`.
fn lock_for(path: &Path) -> Arc<tokio::sync::Mutex<()>> {
    let map = PATH_LOCKS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut guard = map.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    guard
        .entry(path.to_path_buf())
        .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
        .clone()
}

/// Write `contents` to `path` via a sibling temp file and an atomic rename.
fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)
}

/// Read and decode a domain snapshot.
///
/// On any failure the caller keeps its prior in-memory state; a snapshot is
/// decoded as a whole or not at all.
pub async fn load_snapshot<T>(path: &Path) -> Result<T, LoadError>
where
    T: DeserializeOwned,
{
    let lock = lock_for(path);
    let _guard = lock.lock().await;
    if !path.is_file() {
        return Err(LoadError::Missing {
            path: path.display().to_string(),
        });
    }
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&text).map_err(|e| LoadError::Decode {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Serialize and write a domain snapshot atomically.
pub async fn save_snapshot<T>(path: &Path, state: &T) -> Result<(), SaveError>
where
    T: Serialize + Sync,
{
    let json = serde_json::to_string_pretty(state).map_err(|e| SaveError::Serialize {
        message: e.to_string(),
    })?;
    let lock = lock_for(path);
    let _guard = lock.lock().await;
    write_atomic(path, &json).map_err(|e| SaveError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Write a rendered document verbatim to its external target path.
pub async fn export_document(path: &Path, text: &str) -> Result<(), ExportError> {
    let lock = lock_for(path);
    let _guard = lock.lock().await;
    write_atomic(path, text).map_err(|e| ExportError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
