//! Keyed persistence of compound definitions.
//!
//! The transport behind the trait (HTTP, local storage, a database) lives
//! outside this crate; everything here speaks whole definitions in their
//! plain-JSON form. Access is whole-object read/replace with
//! last-writer-wins; there are no partial-field writers.

use std::sync::Mutex;

use ahash::AHashMap;

use crate::definition::CompoundDefinition;
use crate::error::StoreError;
use crate::ident::now_millis;

/// Keyed persistence boundary for compound definitions.
pub trait DefinitionStore: Send + Sync {
    fn load(&self, id: &str) -> Result<Option<CompoundDefinition>, StoreError>;

    fn save(&self, definition: &CompoundDefinition) -> Result<(), StoreError>;

    /// Replaces a definition that was saved before, refreshing
    /// `updated_at`. Fails with [`StoreError::NotFound`] for ids that were
    /// never saved; an update can never create.
    fn update(&self, definition: CompoundDefinition) -> Result<(), StoreError>;

    fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// All stored definitions, newest first.
    fn list(&self) -> Result<Vec<CompoundDefinition>, StoreError>;
}

/// In-memory store backing tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    definitions: Mutex<AHashMap<String, CompoundDefinition>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AHashMap<String, CompoundDefinition>> {
        self.definitions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DefinitionStore for MemoryStore {
    fn load(&self, id: &str) -> Result<Option<CompoundDefinition>, StoreError> {
        Ok(self.lock().get(id).cloned())
    }

    fn save(&self, definition: &CompoundDefinition) -> Result<(), StoreError> {
        self.lock()
            .insert(definition.id.clone(), definition.clone());
        Ok(())
    }

    fn update(&self, mut definition: CompoundDefinition) -> Result<(), StoreError> {
        let mut definitions = self.lock();
        if !definitions.contains_key(&definition.id) {
            return Err(StoreError::NotFound(definition.id));
        }
        definition.updated_at = now_millis();
        definitions.insert(definition.id.clone(), definition);
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        match self.lock().remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }

    fn list(&self) -> Result<Vec<CompoundDefinition>, StoreError> {
        let mut definitions: Vec<_> = self.lock().values().cloned().collect();
        definitions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(definitions)
    }
}
