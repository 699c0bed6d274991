//! Connector plugin resolution and bind mounts
//!
//! Plugins are exposed to the Connect worker under [`DEFAULT_PLUGINS_PATH`],
//! which is the worker's `plugin.path`. A plugin directory is mounted as one
//! folder; a lone jar keeps the name of the directory it lives in so that
//! sibling jars of the same plugin end up grouped together.

use std::path::{Path, PathBuf};

use testcontainers::core::{AccessMode, Mount};

use crate::error::{ContainerOperationError, ErrorKind, Result};
use crate::image::DEFAULT_PLUGINS_PATH;

/// Maps a logical resource identifier to a host filesystem path
pub trait ResourceResolver {
    /// `None` when the identifier cannot be mapped at all
    fn resolve(&self, resource_id: &str) -> Option<PathBuf>;
}

/// Resolves identifiers relative to a base directory; absolute paths pass through
#[derive(Debug, Clone)]
pub struct ResourceRoot {
    base: PathBuf,
}

impl ResourceRoot {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl ResourceResolver for ResourceRoot {
    fn resolve(&self, resource_id: &str) -> Option<PathBuf> {
        let resource_id = resource_id.trim_start_matches("classpath:");
        if resource_id.is_empty() {
            return None;
        }
        Some(self.base.join(resource_id))
    }
}

impl<F> ResourceResolver for F
where
    F: Fn(&str) -> Option<PathBuf>,
{
    fn resolve(&self, resource_id: &str) -> Option<PathBuf> {
        self(resource_id)
    }
}

/// A read-only bind mount of a plugin into the Connect worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginMount {
    host_path: PathBuf,
    bind_source: String,
    container_path: String,
}

impl PluginMount {
    /// Resolve `resource_id` and work out where it belongs inside the container
    pub fn resolve(resource_id: &str, resolver: &impl ResourceResolver) -> Result<Self> {
        let path = resolver
            .resolve(resource_id)
            .ok_or_else(|| ContainerOperationError::resource_not_found(resource_id))?;
        Self::for_host_path(&path)
    }

    /// Symlinks are not followed when naming the target, so a linked jar
    /// keeps the directory it was linked into.
    pub fn for_host_path(path: &Path) -> Result<Self> {
        let not_found = || ContainerOperationError::resource_not_found(path.display());

        // Docker wants absolute bind sources
        let host_path = std::path::absolute(path).map_err(|_| not_found())?;
        if !host_path.try_exists().map_err(|_| not_found())? {
            return Err(not_found());
        }
        let bind_source = host_path
            .to_str()
            .ok_or_else(|| {
                ContainerOperationError::new(
                    ErrorKind::ResourceNotFound,
                    format!("Resource path {} is not valid UTF-8", path.display()),
                )
            })?
            .to_string();
        let container_path =
            container_path_for(&host_path, host_path.is_dir()).ok_or_else(not_found)?;

        Ok(Self {
            host_path,
            bind_source,
            container_path,
        })
    }

    pub fn host_path(&self) -> &Path {
        &self.host_path
    }

    pub fn container_path(&self) -> &str {
        &self.container_path
    }

    pub fn to_bind_mount(&self) -> Mount {
        Mount::bind_mount(self.bind_source.as_str(), self.container_path.as_str())
            .with_access_mode(AccessMode::ReadOnly)
    }
}

/// In-container location for a plugin at `host_path`
///
/// Returns `None` when the path lacks the name components the layout needs.
pub fn container_path_for(host_path: &Path, is_dir: bool) -> Option<String> {
    let name = host_path.file_name()?.to_string_lossy();
    if is_dir {
        return Some(format!("{DEFAULT_PLUGINS_PATH}/{name}"));
    }

    let parent = host_path.parent()?.file_name()?.to_string_lossy();
    Some(format!("{DEFAULT_PLUGINS_PATH}/{parent}/{name}"))
}
