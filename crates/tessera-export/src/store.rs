//! Persistence of saved blocks.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tessera_model::{Block, NewBlock};

/// Errors from a block store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Block store IO error: {0}")]
    Io(String),

    #[error("Failed to serialize block: {0}")]
    Serialize(String),

    #[error("Corrupt block record {path}: {message}")]
    Corrupt { path: String, message: String },
}

/// Storage for saved blocks.
///
/// Implementations assign ids; saves are last-write-wins.
pub trait BlockStore: Send + Sync {
    /// Persist a new block and return the stored record.
    fn create(&self, block: NewBlock) -> Result<Block, StoreError>;

    /// Fetch a block by id.
    fn get(&self, id: u64) -> Result<Option<Block>, StoreError>;

    /// All blocks, ordered by id.
    fn list(&self) -> Result<Vec<Block>, StoreError>;
}

/// Stores one pretty-printed JSON file per block, named `<id>.json`.
#[derive(Debug)]
pub struct FileBlockStore {
    dir: PathBuf,
    /// Serializes id assignment
    write_lock: Mutex<()>,
}

impl FileBlockStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StoreError::Io(e.to_string()))?;

        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Ids of stored records, ascending.
    fn ids(&self) -> Result<Vec<u64>, StoreError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| StoreError::Io(e.to_string()))?;

        let mut ids: Vec<u64> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let path = e.path();
                if path.extension().and_then(|x| x.to_str()) != Some("json") {
                    return None;
                }
                path.file_stem()?.to_str()?.parse().ok()
            })
            .collect();

        ids.sort_unstable();
        Ok(ids)
    }

    fn read(&self, path: &Path) -> Result<Block, StoreError> {
        let contents = fs::read_to_string(path).map_err(|e| StoreError::Io(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| StoreError::Corrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl BlockStore for FileBlockStore {
    fn create(&self, block: NewBlock) -> Result<Block, StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let id = self.ids()?.last().map_or(1, |last| last + 1);
        let block = block.into_block(id);

        let json = serde_json::to_string_pretty(&block)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        fs::write(self.path_for(id), json).map_err(|e| StoreError::Io(e.to_string()))?;

        tracing::info!("Saved block {} ({})", id, block.name);
        Ok(block)
    }

    fn get(&self, id: u64) -> Result<Option<Block>, StoreError> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        self.read(&path).map(Some)
    }

    fn list(&self) -> Result<Vec<Block>, StoreError> {
        self.ids()?
            .into_iter()
            .map(|id| self.read(&self.path_for(id)))
            .collect()
    }
}
