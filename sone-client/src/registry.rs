use std::{cell::RefCell, collections::HashSet};

use crate::api::SoneId;

/// Sones whose status is being polled
///
/// A sone never leaves the registry once it entered it.
#[derive(Debug, Default)]
pub struct WatchRegistry {
    watched: RefCell<HashSet<SoneId>>,
}

impl WatchRegistry {
    pub fn new() -> WatchRegistry {
        WatchRegistry::default()
    }

    /// Returns true iff `sone` was not watched yet
    pub fn register(&self, sone: &SoneId) -> bool {
        let mut watched = self.watched.borrow_mut();
        if watched.contains(sone) {
            return false;
        }
        watched.insert(sone.clone())
    }

    pub fn is_watched(&self, sone: &SoneId) -> bool {
        self.watched.borrow().contains(sone)
    }

    pub fn len(&self) -> usize {
        self.watched.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.watched.borrow().is_empty()
    }
}
