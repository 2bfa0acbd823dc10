//! Registry of pure conversion functions keyed by type pair

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use crate::error::{Error, Result};

type MapFn<S, D> = fn(&S) -> D;

/// Conversion functions registered per `(source, destination)` type pair
///
/// Built once at startup and only read afterwards.
///
/// # Example
///
/// ```rust
/// use library_api::domain::Mapper;
///
/// fn celsius_to_fahrenheit(c: &f64) -> String {
///     format!("{:.1}F", c * 9.0 / 5.0 + 32.0)
/// }
///
/// let mapper = Mapper::new().register(celsius_to_fahrenheit);
/// assert_eq!(mapper.map::<f64, String>(&100.0).unwrap(), "212.0F");
/// assert!(mapper.map::<String, f64>(&"212F".to_string()).is_err());
/// ```
#[derive(Default)]
pub struct Mapper {
    maps: HashMap<(TypeId, TypeId), Box<dyn Any + Send + Sync>>,
}

impl Mapper {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the conversion from `S` to `D`, replacing any earlier one
    #[must_use]
    pub fn register<S: 'static, D: 'static>(mut self, map: MapFn<S, D>) -> Self {
        self.maps
            .insert((TypeId::of::<S>(), TypeId::of::<D>()), Box::new(map));
        self
    }

    /// Whether a conversion from `S` to `D` is registered
    #[must_use]
    pub fn contains<S: 'static, D: 'static>(&self) -> bool {
        self.maps.contains_key(&(TypeId::of::<S>(), TypeId::of::<D>()))
    }

    /// Fail unless a conversion from `S` to `D` is registered
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMapping`] naming the pair.
    pub fn ensure<S: 'static, D: 'static>(&self) -> Result<()> {
        self.lookup::<S, D>().map(|_| ())
    }

    fn lookup<S: 'static, D: 'static>(&self) -> Result<MapFn<S, D>> {
        self.maps
            .get(&(TypeId::of::<S>(), TypeId::of::<D>()))
            .and_then(|map| map.downcast_ref::<MapFn<S, D>>())
            .copied()
            .ok_or(Error::MissingMapping {
                source_type: type_name::<S>(),
                destination_type: type_name::<D>(),
            })
    }

    /// Convert one value
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMapping`] if no conversion is registered.
    pub fn map<S: 'static, D: 'static>(&self, source: &S) -> Result<D> {
        Ok(self.lookup::<S, D>()?(source))
    }

    /// Convert every value of a sequence, preserving order
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingMapping`] if no conversion is registered, even
    /// for an empty sequence.
    pub fn map_many<'a, S: 'static, D: 'static>(
        &self,
        sources: impl IntoIterator<Item = &'a S>,
    ) -> Result<Vec<D>> {
        let map = self.lookup::<S, D>()?;
        Ok(sources.into_iter().map(map).collect())
    }
}

impl std::fmt::Debug for Mapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapper")
            .field("registered", &self.maps.len())
            .finish()
    }
}
