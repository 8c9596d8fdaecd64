//! Whole-file JSON persistence shared by the stores.
//!
//! Every save rewrites the complete document: it is serialized into a sibling
//! temporary file which then replaces the target, so a crash mid-write leaves
//! the previous version intact. Loading never fails; a missing or unreadable
//! file yields the type's default value.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, warn};

use crate::error::AppResult;

const INDENT: &[u8] = b"    ";

/// A JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the document, degrading to `T::default()`.
    pub fn load_or_default<T>(&self) -> T
    where
        T: DeserializeOwned + Default,
    {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Backing file missing, starting empty");
                return T::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Cannot read backing file, starting empty");
                return T::default();
            }
        };

        if raw.trim().is_empty() {
            return T::default();
        }

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Corrupt backing file, starting empty");
                T::default()
            }
        }
    }

    /// Pretty-print `value` and replace the file with it.
    pub fn save<T>(&self, value: &T) -> AppResult<()>
    where
        T: Serialize + ?Sized,
    {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        value.serialize(&mut serializer)?;
        buf.push(b'\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, &buf)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), bytes = buf.len(), "Persisted backing file");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
