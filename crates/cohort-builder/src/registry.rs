//! Operator registry
//!
//! Resolves the operators available for a field path against one catalogue,
//! memoizing the result per path. The memo lives and dies with the registry:
//! a new catalogue gets a new registry.

use cohort_core::types::Operator;
use cohort_core::Catalogue;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Catalogue plus a per-path operator memo
#[derive(Debug)]
pub struct OperatorRegistry {
    catalogue: Arc<Catalogue>,
    cache: RwLock<HashMap<String, Vec<Operator>>>,
}

impl OperatorRegistry {
    pub fn new(catalogue: Arc<Catalogue>) -> Self {
        Self {
            catalogue,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn shared_catalogue(&self) -> Arc<Catalogue> {
        Arc::clone(&self.catalogue)
    }

    /// Operators allowed on the field at `path`.
    ///
    /// Paths missing from the catalogue yield an empty list and are not memoized.
    pub fn operators(&self, path: &str) -> Vec<Operator> {
        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(operators) = cache.get(path) {
                return operators.clone();
            }
        }

        let Some(field) = self.catalogue.field(path) else {
            tracing::warn!("No operators for unknown field '{}'", path);
            return Vec::new();
        };

        let operators = field.operators.clone();
        self.cache
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.to_string(), operators.clone());
        operators
    }

    /// Number of memoized paths
    pub fn cached_len(&self) -> usize {
        self.cache.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}
