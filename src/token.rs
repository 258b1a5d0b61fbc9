use super::constant::TOKEN_DIR_NAME;
use super::Result;

use std::fmt::Debug;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A place where the auth token for one TV is kept
pub trait TokenSlot: Debug + Send + Sync {
    /// Stored token, `None` if nothing has been saved yet or the slot is unreadable
    fn load(&self) -> Option<String>;

    /// Replace the stored token
    fn save(&self, token: &str) -> Result<()>;
}

pub type TokenHandle = Arc<dyn TokenSlot>;

/// Keyed storage of [`TokenSlot`]s, one per TV host
pub trait TokenStore: Send + Sync {
    /// Get the slot for `key`, creating it if needed. Returns `None` when the
    /// backing storage is unavailable; callers continue without a token.
    fn get_or_create(&self, key: &str) -> Option<TokenHandle>;
}

/// Stores each token in `token-{host}.txt` inside a directory
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
}

impl FileTokenStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Per-user cache directory, or the temp directory when there is none
    pub fn default_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(TOKEN_DIR_NAME)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, host: &str) -> PathBuf {
        self.dir.join(format!("token-{}.txt", host))
    }

    fn create(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        OpenOptions::new().create(true).append(true).open(path)?;
        Ok(())
    }
}

impl Default for FileTokenStore {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}

impl TokenStore for FileTokenStore {
    fn get_or_create(&self, key: &str) -> Option<TokenHandle> {
        let path = self.path_for(key);
        if !path.is_file() {
            // Create it now so a storage problem shows up before pairing
            if let Err(e) = self.create(&path) {
                log::error!("Error creating token file {}: {}", path.display(), e);
                return None;
            }
        }
        Some(Arc::new(TokenFile { path }))
    }
}

/// Token slot backed by a single file
#[derive(Debug)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenSlot for TokenFile {
    fn load(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.lines().next().unwrap_or_default().trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        log::debug!("Saving token to {}", self.path.display());
        fs::write(&self.path, token)?;
        Ok(())
    }
}
