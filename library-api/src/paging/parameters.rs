//! Query parameters for author collection requests

use std::fmt;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Page size used when the client does not send one
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a client can get; larger requests are clamped
pub const MAX_PAGE_SIZE: u32 = 20;

/// Sort clause used when the client does not send one
pub const DEFAULT_ORDER_BY: &str = "Name";

/// Paging, filter, search, sort and field-selection inputs of one request
///
/// Deserializes from the camelCase query string (`pageNumber`, `pageSize`,
/// `genre`, `searchQuery`, `orderBy`, `fields`). `pageNumber` is never below 1
/// and `pageSize` is silently clamped to `1..=MAX_PAGE_SIZE`, both on
/// deserialization and on assignment. Integers too large for `u32` saturate
/// instead of failing; only non-numeric paging values are rejected.
///
/// # Example
///
/// ```rust
/// use library_api::paging::ResourceParameters;
///
/// let params = ResourceParameters::new()
///     .with_genre("Fantasy")
///     .with_order_by("Name desc")
///     .with_page_size(5);
///
/// assert_eq!(params.page_number(), 1);
/// assert_eq!(params.page_size(), 5);
/// assert_eq!(params.genre_filter(), Some("Fantasy"));
/// assert_eq!(params.fields(), None);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceParameters {
    #[serde(deserialize_with = "deserialize_page_number")]
    page_number: u32,

    #[serde(deserialize_with = "deserialize_page_size")]
    page_size: u32,

    /// Exact genre filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,

    /// Free-text search over genre and author names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,

    /// Comma-separated `<field>[ asc|desc]` sort clause
    pub order_by: String,

    /// Comma-separated field selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
}

impl Default for ResourceParameters {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            genre: None,
            search_query: None,
            order_by: DEFAULT_ORDER_BY.to_string(),
            fields: None,
        }
    }
}

impl ResourceParameters {
    /// Parameters for the first page with default size and ordering
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current page number (1-indexed)
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Effective page size, always within `1..=MAX_PAGE_SIZE`
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Set the page number; 0 becomes 1
    pub fn set_page_number(&mut self, page_number: u32) {
        self.page_number = page_number.max(1);
    }

    /// Set the page size, clamping it into `1..=MAX_PAGE_SIZE`
    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = clamp_page_size(page_size);
    }

    /// Builder form of [`set_page_number`](Self::set_page_number)
    #[must_use]
    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.set_page_number(page_number);
        self
    }

    /// Builder form of [`set_page_size`](Self::set_page_size)
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.set_page_size(page_size);
        self
    }

    /// Set the genre filter
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Set the search query
    #[must_use]
    pub fn with_search_query(mut self, search_query: impl Into<String>) -> Self {
        self.search_query = Some(search_query.into());
        self
    }

    /// Set the sort clause
    #[must_use]
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }

    /// Set the field selection
    #[must_use]
    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Trimmed genre filter, `None` when absent or blank
    #[must_use]
    pub fn genre_filter(&self) -> Option<&str> {
        non_blank(self.genre.as_deref())
    }

    /// Trimmed search query, `None` when absent or blank
    #[must_use]
    pub fn search_filter(&self) -> Option<&str> {
        non_blank(self.search_query.as_deref())
    }

    /// Field selection, `None` when absent or blank (all fields)
    #[must_use]
    pub fn fields(&self) -> Option<&str> {
        non_blank(self.fields.as_deref())
    }

    /// Number of items preceding the current page
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page_number as usize - 1).saturating_mul(self.page_size as usize)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn clamp_page_size(page_size: u32) -> u32 {
    page_size.clamp(1, MAX_PAGE_SIZE)
}

/// Reads an integer paging value, saturating anything outside `u32`
struct SaturatingU32;

impl<'de> Visitor<'de> for SaturatingU32 {
    type Value = u32;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<u32, E> {
        Ok(u32::try_from(value).unwrap_or(u32::MAX))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<u32, E> {
        if value < 0 {
            Ok(0)
        } else {
            Ok(u32::try_from(value).unwrap_or(u32::MAX))
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<u32, E> {
        let trimmed = value.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(E::invalid_value(Unexpected::Str(value), &self));
        }
        if negative {
            return Ok(0);
        }
        // all digits, so parsing only fails on overflow
        Ok(digits.parse().unwrap_or(u32::MAX))
    }
}

fn deserialize_page_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    deserializer
        .deserialize_any(SaturatingU32)
        .map(|page| page.max(1))
}

fn deserialize_page_size<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    deserializer
        .deserialize_any(SaturatingU32)
        .map(clamp_page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn parse(query: &str) -> ResourceParameters {
        let uri: Uri = format!("http://localhost/api/authors?{}", query).parse().unwrap();
        Query::<ResourceParameters>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn test_defaults() {
        let params = ResourceParameters::default();
        assert_eq!(params.page_number(), 1);
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.order_by, "Name");
        assert_eq!(params.offset(), 0);
        assert!(params.genre.is_none());
    }

    #[test]
    fn test_page_size_is_clamped_on_assignment() {
        assert_eq!(ResourceParameters::new().with_page_size(50).page_size(), 20);
        assert_eq!(ResourceParameters::new().with_page_size(5).page_size(), 5);
        assert_eq!(ResourceParameters::new().with_page_size(0).page_size(), 1);

        let mut params = ResourceParameters::new();
        params.set_page_size(21);
        assert_eq!(params.page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_number_zero_becomes_one() {
        assert_eq!(ResourceParameters::new().with_page_number(0).page_number(), 1);
        assert_eq!(parse("pageNumber=0").page_number(), 1);
    }

    #[test]
    fn test_deserialize_from_query_string() {
        let params =
            parse("pageNumber=3&pageSize=50&genre=Fantasy&searchQuery=king&orderBy=age%20desc&fields=id,name");
        assert_eq!(params.page_number(), 3);
        assert_eq!(params.page_size(), 20);
        assert_eq!(params.genre_filter(), Some("Fantasy"));
        assert_eq!(params.search_filter(), Some("king"));
        assert_eq!(params.order_by, "age desc");
        assert_eq!(params.fields(), Some("id,name"));
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn test_missing_parameters_take_defaults() {
        let params = parse("genre=Horror");
        assert_eq!(params.page_number(), 1);
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(params.order_by, DEFAULT_ORDER_BY);
    }

    #[test]
    fn test_blank_values_are_treated_as_absent() {
        let params = parse("fields=&genre=%20%20&searchQuery=");
        assert_eq!(params.fields(), None);
        assert_eq!(params.genre_filter(), None);
        assert_eq!(params.search_filter(), None);
    }

    #[test]
    fn test_out_of_range_paging_values_are_clamped() {
        let params = parse("pageSize=5000000000&pageNumber=99999999999999999999999");
        assert_eq!(params.page_size(), MAX_PAGE_SIZE);
        assert_eq!(params.page_number(), u32::MAX);

        let params = parse("pageSize=-3&pageNumber=-1");
        assert_eq!(params.page_size(), 1);
        assert_eq!(params.page_number(), 1);

        assert_eq!(parse("pageSize=%2B7").page_size(), 7);
    }

    #[test]
    fn test_json_paging_values_are_clamped() {
        let params: ResourceParameters =
            serde_json::from_str(r#"{"pageSize": 5000000000, "pageNumber": 4}"#).unwrap();
        assert_eq!(params.page_size(), MAX_PAGE_SIZE);
        assert_eq!(params.page_number(), 4);
    }

    #[test]
    fn test_non_numeric_page_is_rejected() {
        for query in ["pageNumber=two", "pageSize=", "pageSize=1.5", "pageSize=-"] {
            let uri: Uri = format!("http://localhost/api/authors?{}", query).parse().unwrap();
            assert!(
                Query::<ResourceParameters>::try_from_uri(&uri).is_err(),
                "expected '{}' to be rejected",
                query
            );
        }
    }
}
