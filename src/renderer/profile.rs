//! Throwaway browser profile directories

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

const PROFILE_PREFIX: &str = "adaptive_scrape_chrome";

/// RAII handle for a per-session profile directory.
///
/// The directory is removed on drop unless [`BrowserProfile::remove`] already
/// ran, so sessions never share cookies or storage and nothing is left in temp.
#[derive(Debug)]
pub struct BrowserProfile {
    path: Option<PathBuf>,
}

impl BrowserProfile {
    /// Create `<root>/adaptive_scrape_chrome_<uuid>`; `root` defaults to the temp dir
    pub fn create(root: Option<&Path>) -> Result<Self> {
        let root = root.map_or_else(std::env::temp_dir, Path::to_path_buf);
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create profile root: {}", root.display()))?;

        let path = root.join(format!("{PROFILE_PREFIX}_{}", Uuid::new_v4()));
        // create_dir fails on collision
        std::fs::create_dir(&path)
            .with_context(|| format!("Failed to create profile directory: {}", path.display()))?;

        debug!("Created browser profile: {}", path.display());
        Ok(Self { path: Some(path) })
    }

    /// Profile directory, `None` once removed
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Delete the directory now. Call only after the browser process exited.
    pub fn remove(&mut self) {
        if let Some(path) = self.path.take() {
            debug!("Removing browser profile: {}", path.display());
            if let Err(e) = std::fs::remove_dir_all(&path)
                && e.kind() != std::io::ErrorKind::NotFound
            {
                warn!("Failed to remove profile directory {}: {e}", path.display());
            }
        }
    }
}

impl Drop for BrowserProfile {
    fn drop(&mut self) {
        self.remove();
    }
}
