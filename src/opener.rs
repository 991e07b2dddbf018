//! URL opener registration
//!
//! Maps a connection-string scheme to facade construction. The process-wide
//! [`registry`] installs the `git` scheme once at first use and is never
//! mutated afterwards; `git://<repository-location>` is the only recognized
//! form, with the location as the sole configuration input.

use std::collections::HashMap;
use std::sync::OnceLock;

use parking_lot::RwLock;
use thiserror::Error;

use crate::errors::VfsError;
use crate::fs::GitVfs;

/// errors from url parsing and scheme dispatch
#[derive(Debug, Error)]
pub enum OpenerError {
    /// the url has no `scheme://` part
    #[error("invalid filesystem url: {0}")]
    InvalidUrl(String),

    /// no opener was installed for the scheme
    #[error("no opener installed for scheme '{0}'")]
    UnknownScheme(String),

    /// the opener ran but filesystem construction failed
    #[error(transparent)]
    Vfs(#[from] VfsError),
}

/// constructor invoked with the location part of a url
pub type OpenFn = fn(&str) -> Result<GitVfs, OpenerError>;

/// scheme-to-constructor registry
pub struct Registry {
    openers: RwLock<HashMap<String, OpenFn>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            openers: RwLock::new(HashMap::new()),
        }
    }

    /// install an opener for a scheme; a later install for the same scheme
    /// replaces the earlier one
    pub fn install(&self, scheme: impl Into<String>, open: OpenFn) {
        self.openers.write().insert(scheme.into(), open);
    }

    /// check whether a scheme has an opener
    pub fn contains(&self, scheme: &str) -> bool {
        self.openers.read().contains_key(scheme)
    }

    /// open a filesystem from a `scheme://location` url
    pub fn open(&self, url: &str) -> Result<GitVfs, OpenerError> {
        let (scheme, location) = url
            .split_once("://")
            .ok_or_else(|| OpenerError::InvalidUrl(url.to_string()))?;
        let open = *self
            .openers
            .read()
            .get(scheme)
            .ok_or_else(|| OpenerError::UnknownScheme(scheme.to_string()))?;
        open(location)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn open_git(location: &str) -> Result<GitVfs, OpenerError> {
    Ok(GitVfs::open(location)?)
}

/// the process-wide registry, with the `git` scheme pre-installed
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let registry = Registry::new();
        registry.install("git", open_git);
        registry
    })
}

/// open a filesystem from a url via the process-wide registry
pub fn open_fs(url: &str) -> Result<GitVfs, OpenerError> {
    registry().open(url)
}
