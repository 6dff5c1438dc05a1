//! Persistence of the whole-application document.
//!
//! Settings and every job (references included) live in one JSON file. The
//! dashboard is the only writer. Writes go to a temp file in the same
//! directory and are renamed over the old document, so a crash never leaves a
//! half-written file behind.

use crate::constants::{DATA_DIR_ENV, DATA_DIR_NAME, DATA_FILE_NAME, IMAGES_DIR_NAME};
use crate::error::{StorageError, StorageResult};
use crate::types::AppData;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub trait Storage {
    /// Load the document. A missing document is an empty default, not an error.
    fn load(&self) -> StorageResult<AppData>;

    fn save(&self, data: &AppData) -> StorageResult<()>;
}

/// Root directory for the document and ingested assets:
/// `$REFBOARD_DATA_DIR`, else `<platform data dir>/refboard-pro`.
pub fn default_data_dir() -> StorageResult<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .ok_or(StorageError::NoDataDir)
}

/// JSON document on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage rooted at [`default_data_dir`].
    pub fn open_default() -> StorageResult<Self> {
        default_data_dir().map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.join(DATA_FILE_NAME)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.dir.join(IMAGES_DIR_NAME)
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> StorageResult<AppData> {
        let path = self.data_file();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no document yet, starting empty");
                return Ok(AppData::default());
            }
            Err(e) => return Err(StorageError::io(path, e)),
        };

        let data: AppData = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), jobs = data.jobs.len(), "document loaded");
        Ok(data)
    }

    fn save(&self, data: &AppData) -> StorageResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        let path = self.data_file();
        let json = serde_json::to_vec_pretty(data)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        tmp.write_all(&json).map_err(|e| StorageError::io(tmp.path(), e))?;
        tmp.as_file().sync_all().map_err(|e| StorageError::io(tmp.path(), e))?;
        tmp.persist(&path).map_err(|e| StorageError::Persist {
            path: path.clone(),
            message: e.error.to_string(),
        })?;

        debug!(path = %path.display(), bytes = json.len(), "document saved");
        Ok(())
    }
}
