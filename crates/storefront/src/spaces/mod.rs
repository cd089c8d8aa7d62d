//! Space registry backed by per-space YAML config files.
//!
//! Configs are authored out-of-band by operators, one directory per space:
//!
//! ```text
//! spaces/
//!   default/space.yaml
//!   acme/space.yaml
//! ```
//!
//! Lookups are cached with a bounded TTL via `moka` to bound filesystem load;
//! staleness within the TTL is an accepted trade-off, not an error.
//!
//! The registry never fails for the default space: if `default/space.yaml` is
//! missing or unreadable, [`Space::fallback`] (compiled into the binary) is
//! served instead, so rendering always has branding to fall back to.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use merchspace_core::{Space, SpaceId};
use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// File name of a space's config inside its directory.
pub const SPACE_CONFIG_FILE: &str = "space.yaml";

/// Errors that can occur when loading a space config.
///
/// These never propagate to the end user: callers log and fall back to the
/// default space.
#[derive(Debug, Error)]
pub enum SpaceError {
    /// Reading the config file failed.
    #[error("failed to read space config {path}: {message}")]
    Io { path: String, message: String },

    /// The config file is not valid YAML for a `Space`.
    #[error("invalid space config {path}: {message}")]
    Parse { path: String, message: String },

    /// The id inside the config does not match its directory name.
    #[error("space config id '{config}' does not match directory '{dir}'")]
    IdMismatch { dir: String, config: String },
}

/// Read-only registry of space configurations.
///
/// Cheaply cloneable; lookups share one TTL cache.
#[derive(Clone)]
pub struct SpaceRegistry {
    inner: Arc<SpaceRegistryInner>,
}

struct SpaceRegistryInner {
    dir: PathBuf,
    cache: Cache<SpaceId, Arc<Space>>,
}

impl SpaceRegistry {
    /// Create a registry over a spaces directory.
    #[must_use]
    pub fn new(dir: PathBuf, cache_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(cache_ttl)
            .build();

        Self {
            inner: Arc::new(SpaceRegistryInner { dir, cache }),
        }
    }

    /// Look up a space by id.
    ///
    /// Returns `None` for unknown ids. Load failures (unreadable or invalid
    /// config) are logged and also yield `None`; callers fall back to the
    /// default space rather than surfacing an error.
    #[instrument(skip(self), fields(space = %id))]
    pub async fn get(&self, id: &SpaceId) -> Option<Arc<Space>> {
        if let Some(space) = self.inner.cache.get(id).await {
            debug!("Cache hit for space config");
            return Some(space);
        }

        match load_space(&self.inner.dir, id).await {
            Ok(Some(space)) => {
                let space = Arc::new(space);
                self.inner.cache.insert(id.clone(), Arc::clone(&space)).await;
                Some(space)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to load space config");
                None
            }
        }
    }

    /// Look up a space, falling back to the default space on any miss.
    ///
    /// An unknown-but-valid id (e.g. a subdomain with no matching config) is
    /// logged for operability and treated the same as no signal at all.
    pub async fn get_or_default(&self, id: &SpaceId) -> Arc<Space> {
        if let Some(space) = self.get(id).await {
            return space;
        }

        if !id.is_default() {
            warn!(space = %id, "Unknown space id, serving default branding");
        }

        self.default_space().await
    }

    /// Get the default space. Always succeeds.
    pub async fn default_space(&self) -> Arc<Space> {
        let id = SpaceId::default();
        if let Some(space) = self.get(&id).await {
            return space;
        }

        Arc::new(Space::fallback())
    }

    /// List all configured spaces, sorted by id.
    ///
    /// The default space is always included, even if it has no config file.
    /// Unreadable entries are skipped with a warning.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Vec<Arc<Space>> {
        let mut spaces = Vec::new();

        let mut entries = match tokio::fs::read_dir(&self.inner.dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %self.inner.dir.display(), error = %e, "Failed to read spaces directory");
                return vec![self.default_space().await];
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let Ok(file_type) = entry.file_type().await else {
                continue;
            };
            if !file_type.is_dir() {
                continue;
            }
            let name = entry.file_name();
            let Ok(id) = SpaceId::parse(&name.to_string_lossy()) else {
                warn!(dir = %name.to_string_lossy(), "Skipping space directory with invalid name");
                continue;
            };
            if let Some(space) = self.get(&id).await {
                spaces.push(space);
            }
        }

        if !spaces.iter().any(|s| s.id.is_default()) {
            spaces.push(self.default_space().await);
        }

        spaces.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        spaces
    }

    /// Drop all cached configs, forcing reloads on next lookup.
    pub fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
    }
}

/// Load one space config from `<dir>/<id>/space.yaml`.
///
/// `Ok(None)` means the file does not exist (a normal registry miss).
async fn load_space(dir: &Path, id: &SpaceId) -> Result<Option<Space>, SpaceError> {
    let path = dir.join(id.as_str()).join(SPACE_CONFIG_FILE);

    if !path.exists() {
        return Ok(None);
    }

    let contents = tokio::fs::read_to_string(&path).await.map_err(|e| SpaceError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let space: Space = serde_yaml::from_str(&contents).map_err(|e| SpaceError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    if space.id != *id {
        return Err(SpaceError::IdMismatch {
            dir: id.to_string(),
            config: space.id.to_string(),
        });
    }

    Ok(Some(space))
}
