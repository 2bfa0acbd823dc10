//! Mapping tables from client sort keys to storage properties

use std::collections::HashMap;

use super::sort::parse_order_by;
use crate::error::{Error, Result};

/// One storage property a client sort key expands to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMapping {
    source_property: String,
    revert: bool,
}

impl PropertyMapping {
    /// Map to a storage property in the requested direction
    pub fn new(source_property: impl Into<String>) -> Self {
        Self {
            source_property: source_property.into(),
            revert: false,
        }
    }

    /// Map to a storage property in the opposite of the requested direction
    pub fn reverted(source_property: impl Into<String>) -> Self {
        Self {
            source_property: source_property.into(),
            revert: true,
        }
    }

    /// Storage property name
    #[must_use]
    pub fn source_property(&self) -> &str {
        &self.source_property
    }

    /// Whether the requested direction is flipped for this property
    #[must_use]
    pub fn revert(&self) -> bool {
        self.revert
    }
}

/// Immutable table of client sort keys for one `(DTO, entity)` pair
///
/// Keys are stored lowercased; every key maps to at least one
/// [`PropertyMapping`].
#[derive(Debug, Clone, Default)]
pub struct PropertyMappingTable {
    entries: HashMap<String, Vec<PropertyMapping>>,
}

impl PropertyMappingTable {
    /// Start building a table
    #[must_use]
    pub fn builder() -> PropertyMappingTableBuilder {
        PropertyMappingTableBuilder::default()
    }

    /// Look up the mappings for a client key, ignoring case
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[PropertyMapping]> {
        self.entries
            .get(&key.to_lowercase())
            .map(Vec::as_slice)
    }

    /// Whether a client key is mapped, ignoring case
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_lowercase())
    }

    /// The (lowercased) client keys of this table
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of client keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check an `orderBy` clause against this table
    ///
    /// A blank clause is valid. Otherwise every token must parse and name a
    /// mapped key.
    #[must_use]
    pub fn is_valid(&self, order_by: &str) -> bool {
        match parse_order_by(order_by) {
            Ok(tokens) => tokens.iter().all(|token| self.contains_key(token.field)),
            Err(_) => false,
        }
    }
}

/// Builder for [`PropertyMappingTable`]
#[derive(Debug, Default)]
pub struct PropertyMappingTableBuilder {
    entries: Vec<(String, Vec<PropertyMapping>)>,
}

impl PropertyMappingTableBuilder {
    /// Add a client key and the storage properties it expands to
    #[must_use]
    pub fn map(
        mut self,
        key: impl Into<String>,
        mappings: impl IntoIterator<Item = PropertyMapping>,
    ) -> Self {
        self.entries
            .push((key.into(), mappings.into_iter().collect()));
        self
    }

    /// Finish the table
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if a key is blank, maps to nothing, or
    /// is registered twice (keys compare case-insensitively).
    pub fn build(self) -> Result<PropertyMappingTable> {
        let mut entries = HashMap::with_capacity(self.entries.len());

        for (key, mappings) in self.entries {
            let normalized = key.trim().to_lowercase();
            if normalized.is_empty() {
                return Err(Error::Configuration(
                    "property mapping key must not be blank".to_string(),
                ));
            }
            if mappings.is_empty() {
                return Err(Error::Configuration(format!(
                    "property mapping '{}' has no source properties",
                    key
                )));
            }
            if entries.insert(normalized, mappings).is_some() {
                return Err(Error::Configuration(format!(
                    "property mapping '{}' is registered twice",
                    key
                )));
            }
        }

        Ok(PropertyMappingTable { entries })
    }
}
