//! Link representation

use serde::{Deserialize, Serialize};

/// A navigable action on a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDto {
    /// Absolute target URI
    pub href: String,
    /// Relation name, e.g. `self` or `delete_author`
    pub rel: String,
    /// HTTP method to use on `href`
    pub method: String,
}

impl LinkDto {
    /// Create a link
    pub fn new(href: impl Into<String>, rel: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method: method.into(),
        }
    }
}
