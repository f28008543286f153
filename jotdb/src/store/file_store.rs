use crate::collection::Document;
use crate::common::{Value, DEFAULT_DB_NAME, JSON_EXTENSION};
use crate::errors::{ErrorKind, JotError, JotResult};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};

/// File-level storage collaborator.
///
/// `FileStore` wraps the handful of filesystem primitives the engine needs:
/// existence check, whole-file read, whole-file write, and parent directory
/// creation. Every call is stateless and synchronous; failures surface as
/// [JotError] values with the matching [ErrorKind].
pub struct FileStore;

impl FileStore {
    /// Checks whether the backing file exists.
    pub fn exists(path: &Path) -> bool {
        path.exists()
    }

    /// Reads the backing file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound`, `PermissionDenied`, or `IOError` depending on
    /// the underlying failure.
    pub fn read(path: &Path) -> JotResult<String> {
        fs::read_to_string(path).map_err(|err| {
            log::error!("Failed to read {}: {}", path.display(), err);
            err.into()
        })
    }

    /// Writes the full contents to the backing file, replacing what was there.
    ///
    /// The write is all-or-nothing relative to the filesystem's guarantee;
    /// there is no partial-write recovery.
    pub fn write(path: &Path, contents: &str) -> JotResult<()> {
        fs::write(path, contents).map_err(|err| {
            log::error!("Failed to write {}: {}", path.display(), err);
            err.into()
        })
    }

    /// Creates the parent directory of the backing file if it is missing.
    pub fn ensure_parent_dir(path: &Path) -> JotResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| {
                    log::error!("Failed to create directory {}: {}", parent.display(), err);
                    JotError::new_with_cause(
                        &format!("Cannot create directory {}", parent.display()),
                        ErrorKind::FileAccessError,
                        err.into(),
                    )
                })?;
            }
        }
        Ok(())
    }
}

/// Resolves the caller-supplied database path to the backing file path.
///
/// The path is taken verbatim, with the `.json` suffix appended only when it
/// is not already present (case-sensitive check). An empty path falls back to
/// the default database name.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(json_file_name("people"), PathBuf::from("people.json"));
/// assert_eq!(json_file_name("people.json"), PathBuf::from("people.json"));
/// assert_eq!(json_file_name(""), PathBuf::from("index.json"));
/// ```
pub fn json_file_name(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let name = path.to_string_lossy();
    let name = if name.is_empty() {
        DEFAULT_DB_NAME.into()
    } else {
        name
    };

    if name.ends_with(JSON_EXTENSION) {
        PathBuf::from(name.as_ref())
    } else {
        PathBuf::from(format!("{}{}", name, JSON_EXTENSION))
    }
}

/// Encodes a Root document as JSON text.
///
/// Compact by default; pretty mode indents with a tab per nesting level.
pub fn encode(root: &Document, pretty: bool) -> JotResult<String> {
    if pretty {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"\t");
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);
        root.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf)?)
    } else {
        Ok(serde_json::to_string(root)?)
    }
}

/// Decodes JSON text into a Root document.
///
/// # Errors
///
/// Returns `FileCorrupted` when the text is not valid JSON or when the
/// top-level value is not a JSON object.
pub fn decode(text: &str) -> JotResult<Document> {
    let value: Value = serde_json::from_str(text).map_err(|err| {
        log::error!("Failed to decode backing file: {}", err);
        JotError::new_with_cause(
            "Backing file is not valid JSON",
            ErrorKind::FileCorrupted,
            err.into(),
        )
    })?;

    match value {
        Value::Document(doc) => Ok(doc),
        other => {
            log::error!("Backing file root is not a JSON object: {}", other);
            Err(JotError::new(
                "Backing file root is not a JSON object",
                ErrorKind::FileCorrupted,
            ))
        }
    }
}
