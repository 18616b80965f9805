use std::collections::BTreeSet;

use crate::types::CategoryId;

/// Categories the user picked to filter collection points by
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    ids: BTreeSet<CategoryId>,
}

impl CategorySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `id` when present, inserts it otherwise
    pub fn toggle(&mut self, id: CategoryId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.ids.iter().copied()
    }
}
