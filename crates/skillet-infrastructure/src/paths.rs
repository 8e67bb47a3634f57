//! Unified path management for skillet's durable client state.
//!
//! The entire on-disk footprint is one directory holding `config.toml` and
//! `session.json` (plus a transient lock file during session writes).

use skillet_core::error::{Result, SkilletError};
use std::path::PathBuf;

/// Resolves the skillet state directory and the files inside it.
///
/// Defaults to the platform config dir (`~/.config/skillet` on Linux); an
/// explicit root overrides it for tests.
#[derive(Debug, Clone)]
pub struct SkilletPaths {
    root: PathBuf,
}

impl SkilletPaths {
    /// Uses the platform config directory.
    pub fn new() -> Result<Self> {
        let base = dirs::config_dir()
            .ok_or_else(|| SkilletError::config("cannot determine the config directory"))?;
        Ok(Self {
            root: base.join("skillet"),
        })
    }

    /// Uses an explicit root directory (tests, portable installs).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn session_file(&self) -> PathBuf {
        self.root.join("session.json")
    }

    pub fn session_lock_file(&self) -> PathBuf {
        self.root.join("session.json.lock")
    }
}
