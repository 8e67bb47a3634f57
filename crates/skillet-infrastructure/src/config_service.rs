//! Configuration service implementation.
//!
//! Loads the client configuration from `config.toml` under the skillet
//! state directory and caches it. A missing file yields the defaults; a
//! partial file is filled in field by field.

use crate::paths::SkilletPaths;
use skillet_core::config::ClientConfig;
use skillet_core::error::Result;
use std::sync::{Arc, RwLock};

/// Lazily-loading, cached configuration reader.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: SkilletPaths,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(paths: SkilletPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file on first access.
    pub fn get_config(&self) -> ClientConfig {
        {
            let read_lock = self.config.read().expect("config lock poisoned");
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_config().unwrap_or_else(|err| {
            tracing::warn!("failed to load config, using defaults: {err}");
            ClientConfig::default()
        });

        {
            let mut write_lock = self.config.write().expect("config lock poisoned");
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().expect("config lock poisoned");
        *write_lock = None;
    }

    /// Persists the configuration and refreshes the cache.
    pub fn save_config(&self, config: &ClientConfig) -> Result<()> {
        std::fs::create_dir_all(self.paths.root())?;
        let contents = toml::to_string_pretty(config)?;
        std::fs::write(self.paths.config_file(), contents)?;
        let mut write_lock = self.config.write().expect("config lock poisoned");
        *write_lock = Some(config.clone());
        Ok(())
    }

    fn load_config(&self) -> Result<ClientConfig> {
        let path = self.paths.config_file();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(ClientConfig::default())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(SkilletPaths::with_root(dir.path()));
        assert_eq!(service.get_config(), ClientConfig::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(SkilletPaths::with_root(dir.path()));

        let config = ClientConfig {
            base_url: "https://skillet.example".to_string(),
            ..ClientConfig::default()
        };
        service.save_config(&config).unwrap();

        let reloaded = ConfigService::new(SkilletPaths::with_root(dir.path()));
        assert_eq!(reloaded.get_config().base_url, "https://skillet.example");
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(SkilletPaths::with_root(dir.path()));
        assert_eq!(service.get_config(), ClientConfig::default());

        let config = ClientConfig {
            max_attempts: 5,
            ..ClientConfig::default()
        };
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(
            SkilletPaths::with_root(dir.path()).config_file(),
            toml::to_string(&config).unwrap(),
        )
        .unwrap();

        // Cache still holds the old value until invalidated.
        assert_eq!(service.get_config().max_attempts, 3);
        service.invalidate_cache();
        assert_eq!(service.get_config().max_attempts, 5);
    }
}
