//! Label registry: maps [`LabelId`] to label names with name-based lookup.

use hashbrown::HashMap;
use tilekit_grid::LabelId;

/// Errors that can occur when registering labels.
#[derive(Debug, thiserror::Error)]
pub enum LabelRegistryError {
    /// Every [`LabelId`] is in use.
    #[error("label registry is full ({0} labels)")]
    Full(usize),
}

/// Stores label names with O(1) lookup in both directions.
#[derive(Clone, Debug, Default)]
pub struct LabelRegistry {
    names: Vec<String>,
    name_to_id: HashMap<String, LabelId>,
}

impl LabelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `name`, registering it first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`LabelRegistryError::Full`] if no id is left.
    pub fn intern(&mut self, name: &str) -> Result<LabelId, LabelRegistryError> {
        match self.name_to_id.get(name) {
            Some(&id) => Ok(id),
            None => self.insert(name),
        }
    }

    /// Returns the name of a label, if registered.
    pub fn name(&self, id: LabelId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    /// Looks up a label id by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<LabelId> {
        self.name_to_id.get(name).copied()
    }

    /// Iterates over `(id, name)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (LabelId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, n)| (LabelId(i as u16), n.as_str()))
    }

    /// Returns the number of registered labels.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no labels are registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn insert(&mut self, name: &str) -> Result<LabelId, LabelRegistryError> {
        let Ok(raw) = u16::try_from(self.names.len()) else {
            return Err(LabelRegistryError::Full(self.names.len()));
        };
        let id = LabelId(raw);
        self.name_to_id.insert(name.to_string(), id);
        self.names.push(name.to_string());
        Ok(id)
    }
}
