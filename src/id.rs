//! Persistent monotonic id generation.
//!
//! Shape, layer, and area ids come from a single process-wide counter so
//! every entity is uniquely addressable. The counter is persisted to a small
//! file so ids stay unique across restarts.

use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::PathBuf;

/// Hands out monotonically increasing ids and persists the counter.
///
/// Held by the application state rather than living in a global; load/save
/// are explicit operations at startup and shutdown.
#[derive(Debug)]
pub struct IdGenerator {
    next: u64,
    path: PathBuf,
}

impl IdGenerator {
    /// Returns the default counter file location under the user data
    /// directory.
    ///
    /// # Errors
    /// Fails if the data directory cannot be determined (e.g. HOME unset).
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .context("Could not find data directory")?
            .join("termsketch");
        Ok(data_dir.join("next_id"))
    }

    /// Loads the counter from `path`, starting at 0 when the file is
    /// missing. An unparseable file is treated as 0 with a warning rather
    /// than an error, so a corrupt counter never blocks startup.
    pub fn load(path: PathBuf) -> Result<Self> {
        let next = if path.exists() {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read id counter from {}", path.display()))?;
            match raw.trim().parse::<u64>() {
                Ok(value) => value,
                Err(_) => {
                    warn!(
                        "Id counter file {} is not a number, restarting at 0",
                        path.display()
                    );
                    0
                }
            }
        } else {
            0
        };

        Ok(Self { next, path })
    }

    /// Returns the next unique id and advances the counter.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Writes the counter back to its file, creating parent directories as
    /// needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create id counter directory {}", parent.display())
            })?;
        }
        fs::write(&self.path, self.next.to_string())
            .with_context(|| format!("Failed to write id counter to {}", self.path.display()))?;
        info!("Saved id counter {} to {}", self.next, self.path.display());
        Ok(())
    }
}
