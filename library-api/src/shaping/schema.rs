//! Static field descriptors for shapeable resources

use serde_json::Value;

use crate::error::{Error, Result};

/// Reads one public field of a resource as a JSON value
pub type FieldAccessor<T> = fn(&T) -> Value;

/// Public name and accessor of one resource field
pub struct FieldDescriptor<T: 'static> {
    name: &'static str,
    accessor: FieldAccessor<T>,
}

impl<T: 'static> FieldDescriptor<T> {
    /// Describe a field by its public (serialized) name
    pub const fn new(name: &'static str, accessor: FieldAccessor<T>) -> Self {
        Self { name, accessor }
    }

    /// Public field name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Read the field from a resource
    #[must_use]
    pub fn read(&self, resource: &T) -> Value {
        (self.accessor)(resource)
    }
}

impl<T: 'static> std::fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Field table of a shapeable resource type
///
/// Field order is the order of the full (unshaped) projection. The identifier
/// field must be one of the declared fields.
pub struct ResourceSchema<T: 'static> {
    resource: &'static str,
    id_field: &'static str,
    fields: &'static [FieldDescriptor<T>],
}

impl<T: 'static> ResourceSchema<T> {
    /// Declare a schema
    pub const fn new(
        resource: &'static str,
        id_field: &'static str,
        fields: &'static [FieldDescriptor<T>],
    ) -> Self {
        Self {
            resource,
            id_field,
            fields,
        }
    }

    /// Resource name used in diagnostics
    #[must_use]
    pub const fn resource(&self) -> &'static str {
        self.resource
    }

    /// Name of the identifier field
    #[must_use]
    pub const fn id_field(&self) -> &'static str {
        self.id_field
    }

    /// All declared fields, in declaration order
    #[must_use]
    pub const fn fields(&self) -> &'static [FieldDescriptor<T>] {
        self.fields
    }

    /// Find a field by name, ignoring case
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor<T>> {
        self.fields
            .iter()
            .find(|descriptor| descriptor.name.eq_ignore_ascii_case(name))
    }

    /// The identifier field descriptor
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the schema does not declare its own
    /// identifier field.
    pub fn id_descriptor(&self) -> Result<&'static FieldDescriptor<T>> {
        self.field(self.id_field).ok_or_else(|| Error::UnknownField {
            resource: self.resource,
            field: self.id_field.to_string(),
        })
    }
}

impl<T: 'static> std::fmt::Debug for ResourceSchema<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceSchema")
            .field("resource", &self.resource)
            .field("id_field", &self.id_field)
            .field("fields", &self.fields)
            .finish()
    }
}

/// A resource type that can be shaped
pub trait Shape: Sized + 'static {
    /// The static field table for this type
    fn schema() -> &'static ResourceSchema<Self>;
}

/// Whether every entry of a comma-separated field list names a field of `T`
///
/// `None` or a blank list means "all fields" and is always valid. Entries are
/// trimmed and compared case-insensitively; an empty entry is invalid.
#[must_use]
pub fn type_has_properties<T: Shape>(fields: Option<&str>) -> bool {
    let Some(fields) = fields.filter(|f| !f.trim().is_empty()) else {
        return true;
    };

    let schema = T::schema();
    fields
        .split(',')
        .all(|field| schema.field(field.trim()).is_some())
}

/// Reject a field list that [`type_has_properties`] does not accept
///
/// # Errors
///
/// Returns [`Error::InvalidFieldSelection`] naming the rejected list.
pub fn validate_fields<T: Shape>(fields: Option<&str>) -> Result<()> {
    if type_has_properties::<T>(fields) {
        Ok(())
    } else {
        let fields = fields.unwrap_or_default();
        tracing::debug!(resource = T::schema().resource(), fields, "Rejected field selection");
        Err(Error::InvalidFieldSelection(fields.to_string()))
    }
}
