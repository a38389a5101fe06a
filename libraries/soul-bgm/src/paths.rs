//! Track identifier to file path bindings

use crate::error::{BgmError, Result};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::path::{Path, PathBuf};

/// Associative store linking track identifiers to music file paths
///
/// Rebinding an identifier replaces its previous path.
#[derive(Debug, Clone)]
pub struct PathStore<Id> {
    paths: HashMap<Id, PathBuf>,
}

impl<Id> PathStore<Id>
where
    Id: Eq + Hash + Debug,
{
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            paths: HashMap::new(),
        }
    }

    /// Bind `id` to `path`
    pub fn bind(&mut self, id: Id, path: impl Into<PathBuf>) {
        let path = path.into();
        if let Some(previous) = self.paths.insert(id, path) {
            tracing::debug!("Rebound music path (was {})", previous.display());
        }
    }

    /// Look up the path bound to `id`
    ///
    /// # Returns
    /// * `Ok(path)` - Bound path
    /// * `Err(BgmError::TrackNotFound)` - Nothing bound to `id`
    pub fn lookup(&self, id: &Id) -> Result<&Path> {
        self.paths
            .get(id)
            .map(PathBuf::as_path)
            .ok_or_else(|| BgmError::track_not_found(id))
    }

    /// Remove a binding, returning its path
    pub fn release(&mut self, id: &Id) -> Option<PathBuf> {
        self.paths.remove(id)
    }

    /// Remove every binding
    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Check if no path is bound
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Number of bound identifiers
    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

impl<Id> Default for PathStore<Id>
where
    Id: Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Id, P> Extend<(Id, P)> for PathStore<Id>
where
    Id: Eq + Hash + Debug,
    P: Into<PathBuf>,
{
    fn extend<T: IntoIterator<Item = (Id, P)>>(&mut self, iter: T) {
        for (id, path) in iter {
            self.bind(id, path);
        }
    }
}
