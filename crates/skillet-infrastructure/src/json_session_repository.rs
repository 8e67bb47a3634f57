//! JSON-file session repository.
//!
//! Persists the `{token, user}` pair as a single small JSON document under
//! the skillet state directory. Writes go to a temp file first and are
//! renamed into place under an advisory lock, so a crash mid-write leaves
//! the previous session intact.

use crate::paths::SkilletPaths;
use async_trait::async_trait;
use skillet_core::error::Result;
use skillet_core::session::{AuthSession, SessionRepository};
use std::fs::OpenOptions;
use std::path::PathBuf;

/// File-backed [`SessionRepository`] implementation.
#[derive(Debug, Clone)]
pub struct JsonSessionRepository {
    paths: SkilletPaths,
}

impl JsonSessionRepository {
    pub fn new(paths: SkilletPaths) -> Self {
        Self { paths }
    }

    fn session_file(&self) -> PathBuf {
        self.paths.session_file()
    }

    /// Holds an exclusive advisory lock on the sidecar lock file for the
    /// duration of the returned guard.
    fn acquire_lock(&self) -> Result<FileLock> {
        let lock_path = self.paths.session_lock_file();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()?;
        }

        Ok(FileLock {
            _file: file,
            lock_path,
        })
    }
}

#[async_trait]
impl SessionRepository for JsonSessionRepository {
    async fn load(&self) -> Result<Option<AuthSession>> {
        let path = self.session_file();
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                let session: AuthSession = serde_json::from_str(&contents)?;
                Ok(Some(session))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, session: &AuthSession) -> Result<()> {
        tokio::fs::create_dir_all(self.paths.root()).await?;
        let _lock = self.acquire_lock()?;

        let path = self.session_file();
        let tmp_path = path.with_extension("json.tmp");
        let contents = serde_json::to_string_pretty(session)?;
        tokio::fs::write(&tmp_path, contents).await?;
        tokio::fs::rename(&tmp_path, &path).await?;
        tracing::debug!("session persisted to {:?}", path);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let path = self.session_file();
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// RAII guard over the sidecar lock file.
struct FileLock {
    _file: std::fs::File,
    lock_path: PathBuf,
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped; removing the
        // sidecar is best effort.
        let _ = std::fs::remove_file(&self.lock_path);
    }
}
