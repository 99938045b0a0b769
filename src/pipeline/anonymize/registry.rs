//! Run-scoped substitution registry.
//!
//! Keeps replacements referentially consistent across a whole input file:
//! the same original value under the same entity type always resolves to
//! the same fabricated replacement. The registry is owned by the run
//! context and must be reset before starting a new input file so
//! replacement values never leak across files.

use std::collections::HashMap;

use super::types::FakeValueGenerator;

pub struct SubstitutionRegistry {
    generator: Box<dyn FakeValueGenerator>,
    map: HashMap<(String, String), String>,
}

impl SubstitutionRegistry {
    pub fn new(generator: Box<dyn FakeValueGenerator>) -> Self {
        Self {
            generator,
            map: HashMap::new(),
        }
    }

    /// Replacement for `(entity_type, original)`.
    ///
    /// First sight invokes the generator and stores the result for the
    /// remainder of the run; subsequent calls return the stored value
    /// without regenerating.
    pub fn resolve(&mut self, entity_type: &str, original: &str) -> String {
        let key = (entity_type.to_string(), original.to_string());
        if let Some(existing) = self.map.get(&key) {
            return existing.clone();
        }
        let replacement = self.generator.generate(entity_type);
        self.map.insert(key, replacement.clone());
        replacement
    }

    /// Forget every stored pair. Call between input files.
    pub fn reset(&mut self) {
        self.map.clear();
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
