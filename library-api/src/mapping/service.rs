//! Process-wide registry of property mapping tables

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use super::property::PropertyMappingTable;
use super::sort::{parse_order_by, SortKey};
use crate::error::{Error, Result};

/// Registry of [`PropertyMappingTable`]s keyed by `(source, destination)` type pair
///
/// Built once at startup and only read afterwards; share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct PropertyMappingService {
    tables: HashMap<(TypeId, TypeId), PropertyMappingTable>,
}

impl PropertyMappingService {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the table used to sort `D` values by `S` field names
    #[must_use]
    pub fn register<S: 'static, D: 'static>(mut self, table: PropertyMappingTable) -> Self {
        self.tables
            .insert((TypeId::of::<S>(), TypeId::of::<D>()), table);
        self
    }

    /// Get the table for a type pair
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMapping`] if nothing was registered for the pair.
    pub fn get_mapping<S: 'static, D: 'static>(&self) -> Result<&PropertyMappingTable> {
        self.tables
            .get(&(TypeId::of::<S>(), TypeId::of::<D>()))
            .ok_or(Error::MissingMapping {
                source_type: type_name::<S>(),
                destination_type: type_name::<D>(),
            })
    }

    /// Check an `orderBy` clause against the table for a type pair
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMapping`] if nothing was registered for the pair.
    pub fn is_valid_mapping<S: 'static, D: 'static>(&self, order_by: &str) -> Result<bool> {
        Ok(self.get_mapping::<S, D>()?.is_valid(order_by))
    }

    /// Like [`is_valid_mapping`](Self::is_valid_mapping), rejecting invalid clauses
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSortKey`] for an invalid clause and
    /// [`Error::MissingMapping`] if nothing was registered for the pair.
    pub fn validate_order_by<S: 'static, D: 'static>(&self, order_by: &str) -> Result<()> {
        if self.is_valid_mapping::<S, D>(order_by)? {
            Ok(())
        } else {
            tracing::debug!(order_by, "Rejected orderBy clause");
            Err(Error::InvalidSortKey(order_by.to_string()))
        }
    }

    /// Expand an `orderBy` clause into storage-level sort keys
    ///
    /// Keys come out in clause order; a key that maps to several properties
    /// contributes them in registration order. A reverted mapping flips the
    /// requested direction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSortKey`] for unknown keys or malformed tokens and
    /// [`Error::MissingMapping`] if nothing was registered for the pair.
    pub fn resolve_sort<S: 'static, D: 'static>(&self, order_by: &str) -> Result<Vec<SortKey>> {
        let table = self.get_mapping::<S, D>()?;
        let mut keys = Vec::new();

        for token in parse_order_by(order_by)? {
            let mappings = table
                .get(token.field)
                .ok_or_else(|| Error::InvalidSortKey(order_by.to_string()))?;

            keys.extend(mappings.iter().map(|mapping| SortKey {
                property: mapping.source_property().to_string(),
                direction: if mapping.revert() {
                    token.direction.reverse()
                } else {
                    token.direction
                },
            }));
        }

        Ok(keys)
    }
}
