//! FileBlobStore - one JSON file per key inside a directory.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{BlobError, BlobStore};

/// File-backed blob store.
///
/// Key `k` lives at `<dir>/k.json`. Writes go to `k.json.tmp`, are synced,
/// then renamed over the target, so a reader sees either the old blob or the
/// new one.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Blob store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, BlobError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn validate_key(key: &str) -> Result<(), BlobError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' || ch == '.')
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(BlobError::InvalidKey(key.to_string()))
    }
}

fn io_error(context: &str, path: &Path, err: std::io::Error) -> BlobError {
    BlobError::Io(format!("{} {}: {}", context, path.display(), err))
}

impl BlobStore for FileBlobStore {
    fn read_blob(&self, key: &str) -> Result<Option<String>, BlobError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error("failed to read", &path, err)),
        }
    }

    fn write_blob(&self, key: &str, contents: &str) -> Result<(), BlobError> {
        let path = self.path_for(key)?;
        let temp_path = self.dir.join(format!("{}.json.tmp", key));

        fs::create_dir_all(&self.dir)
            .map_err(|e| io_error("failed to create directory", &self.dir, e))?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| io_error("failed to create", &temp_path, e))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| io_error("failed to write", &temp_path, e))?;
        file.sync_all()
            .map_err(|e| io_error("failed to sync", &temp_path, e))?;

        fs::rename(&temp_path, &path).map_err(|e| io_error("failed to replace", &path, e))?;

        // best effort: make the rename itself durable
        if let Ok(dir) = File::open(&self.dir) {
            let _ = dir.sync_all();
        }

        Ok(())
    }

    fn remove_blob(&self, key: &str) -> Result<bool, BlobError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(io_error("failed to remove", &path, err)),
        }
    }
}
