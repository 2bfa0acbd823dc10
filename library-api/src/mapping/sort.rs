//! Parsing of `orderBy` clauses
//!
//! A clause is a comma-separated list of `<field>[ asc|desc]` tokens. Tokens
//! are whitespace-trimmed and the direction keyword is case-insensitive.

use std::fmt;

use crate::error::{Error, Result};

/// Direction for ordering results
///
/// # Example
///
/// ```rust
/// use library_api::mapping::OrderDirection;
///
/// assert_eq!(format!("{}", OrderDirection::Ascending), "asc");
/// assert_eq!(OrderDirection::Ascending.reverse(), OrderDirection::Descending);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Sort in ascending order (A-Z, 0-9)
    #[default]
    Ascending,
    /// Sort in descending order (Z-A, 9-0)
    Descending,
}

impl OrderDirection {
    /// The opposite direction
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    fn parse(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("asc") {
            Some(Self::Ascending)
        } else if keyword.eq_ignore_ascii_case("desc") {
            Some(Self::Descending)
        } else {
            None
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// One client-facing token of an `orderBy` clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortToken<'a> {
    /// Client field name, as written by the client
    pub field: &'a str,
    /// Requested direction
    pub direction: OrderDirection,
}

/// A resolved storage-level ordering key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    /// Storage property name
    pub property: String,
    /// Direction after applying the mapping's revert flag
    pub direction: OrderDirection,
}

/// Split an `orderBy` clause into field/direction tokens
///
/// A blank clause yields no tokens. Empty tokens (`"name,"`), unknown
/// direction keywords and trailing words are rejected with
/// [`Error::InvalidSortKey`].
///
/// # Example
///
/// ```rust
/// use library_api::mapping::{parse_order_by, OrderDirection};
///
/// let tokens = parse_order_by(" name DESC , genre").unwrap();
/// assert_eq!(tokens[0].field, "name");
/// assert_eq!(tokens[0].direction, OrderDirection::Descending);
/// assert_eq!(tokens[1].direction, OrderDirection::Ascending);
///
/// assert!(parse_order_by("name sideways").is_err());
/// ```
pub fn parse_order_by(clause: &str) -> Result<Vec<SortToken<'_>>> {
    if clause.trim().is_empty() {
        return Ok(Vec::new());
    }

    clause
        .split(',')
        .map(|raw| {
            let mut words = raw.split_whitespace();
            let field = words
                .next()
                .ok_or_else(|| Error::InvalidSortKey(clause.to_string()))?;
            let direction = match words.next() {
                None => OrderDirection::Ascending,
                Some(keyword) => OrderDirection::parse(keyword)
                    .ok_or_else(|| Error::InvalidSortKey(clause.to_string()))?,
            };
            if words.next().is_some() {
                return Err(Error::InvalidSortKey(clause.to_string()));
            }
            Ok(SortToken { field, direction })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_clause_has_no_tokens() {
        assert!(parse_order_by("").unwrap().is_empty());
        assert!(parse_order_by("   ").unwrap().is_empty());
    }

    #[test]
    fn test_direction_keyword_is_case_insensitive() {
        let tokens = parse_order_by("name Desc,age ASC").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].direction, OrderDirection::Descending);
        assert_eq!(tokens[1].field, "age");
        assert_eq!(tokens[1].direction, OrderDirection::Ascending);
    }

    #[test]
    fn test_empty_token_is_rejected() {
        assert!(matches!(
            parse_order_by("name,"),
            Err(Error::InvalidSortKey(_))
        ));
        assert!(parse_order_by(",name").is_err());
    }

    #[test]
    fn test_extra_words_are_rejected() {
        assert!(parse_order_by("name desc please").is_err());
        assert!(parse_order_by("name upward").is_err());
    }

    #[test]
    fn test_reverse() {
        assert_eq!(
            OrderDirection::Descending.reverse(),
            OrderDirection::Ascending
        );
        assert_eq!(OrderDirection::default(), OrderDirection::Ascending);
    }
}
