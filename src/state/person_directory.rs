use std::collections::BTreeSet;

use crate::types::person::PersonId;

/// Read-only lookup of the persons known to the API.
pub trait PersonDirectory: Send + Sync {
    /// Returns whether a person with the given id exists.
    fn contains(&self, id: PersonId) -> bool;
}

/// A fixed set of person ids held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryPersonDirectory {
    ids: BTreeSet<PersonId>,
}

impl InMemoryPersonDirectory {
    pub fn new(ids: impl IntoIterator<Item = PersonId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }
}

impl Default for InMemoryPersonDirectory {
    fn default() -> Self {
        Self::new(1..=5)
    }
}

impl PersonDirectory for InMemoryPersonDirectory {
    fn contains(&self, id: PersonId) -> bool {
        self.ids.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directory_knows_the_first_five_ids() {
        let directory = InMemoryPersonDirectory::default();

        for id in 1..=5 {
            assert!(directory.contains(id));
        }

        assert!(!directory.contains(0));
        assert!(!directory.contains(6));
        assert!(!directory.contains(99));
    }

    #[test]
    fn custom_ids_replace_the_defaults() {
        let directory = InMemoryPersonDirectory::new([7, 42]);

        assert!(directory.contains(42));
        assert!(!directory.contains(1));
    }
}
