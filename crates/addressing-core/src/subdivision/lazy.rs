// crates/addressing-core/src/subdivision/lazy.rs

use super::repository::Inner;
use super::{Subdivision, SubdivisionRepository};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::warn;

/// Children of a subdivision, loaded on first read.
///
/// Every read accessor triggers the load; [`LazySubdivisions::is_loaded`]
/// does not. A node declared without children starts out loaded and empty.
#[derive(Clone)]
pub struct LazySubdivisions {
    parents: Vec<String>,
    repository: Weak<Inner>,
    subdivisions: OnceCell<BTreeMap<String, Arc<Subdivision>>>,
}

impl LazySubdivisions {
    pub(crate) fn new(parents: Vec<String>, repository: Weak<Inner>) -> Self {
        Self {
            parents,
            repository,
            subdivisions: OnceCell::new(),
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            parents: Vec::new(),
            repository: Weak::new(),
            subdivisions: OnceCell::with_value(BTreeMap::new()),
        }
    }

    fn load(&self) -> &BTreeMap<String, Arc<Subdivision>> {
        self.subdivisions.get_or_init(|| {
            let Some(repository) = SubdivisionRepository::from_weak(&self.repository) else {
                return BTreeMap::new();
            };
            repository.all(&self.parents).unwrap_or_else(|err| {
                warn!(parents = ?self.parents, error = %err, "failed to load child subdivisions");
                BTreeMap::new()
            })
        })
    }

    /// Parent chain the children live under.
    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    pub fn is_loaded(&self) -> bool {
        self.subdivisions.get().is_some()
    }

    pub fn get(&self, id: &str) -> Option<Arc<Subdivision>> {
        self.load().get(id).cloned()
    }

    pub fn any(&self) -> bool {
        !self.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.load().is_empty()
    }

    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.load().keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Subdivision>)> {
        self.load().iter().map(|(id, sub)| (id.as_str(), sub))
    }
}

impl Default for LazySubdivisions {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for LazySubdivisions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("LazySubdivisions");
        s.field("parents", &self.parents);
        match self.subdivisions.get() {
            Some(loaded) => s.field("loaded", &loaded.keys().collect::<Vec<_>>()),
            None => s.field("loaded", &false),
        };
        s.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_loaded_up_front() {
        let lazy = LazySubdivisions::empty();
        assert!(lazy.is_loaded());
        assert!(lazy.is_empty());
        assert!(lazy.get("anything").is_none());
    }

    #[test]
    fn orphaned_loader_degrades_to_empty() {
        let lazy = LazySubdivisions::new(vec!["BR".into()], Weak::new());
        assert!(!lazy.is_loaded());
        assert_eq!(lazy.len(), 0);
        assert!(lazy.is_loaded());
    }
}
