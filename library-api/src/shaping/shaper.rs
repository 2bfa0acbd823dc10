//! Runtime projection of resources to ordered field maps

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use super::schema::{FieldDescriptor, Shape};
use crate::error::{Error, Result};
use crate::hypermedia::LinkDto;

/// Ordered field-name → value projection of one resource
///
/// Always contains the resource identifier. When hypermedia is requested the
/// entity also carries its own `links`, serialized after the fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedEntity {
    fields: Vec<(&'static str, Value)>,
    links: Option<Vec<LinkDto>>,
}

impl ShapedEntity {
    /// Value of a shaped field by its exact public name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Shaped field names, in output order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(field, _)| *field)
    }

    /// Number of shaped fields (links excluded)
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field was shaped
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Links attached to this entity, if any
    #[must_use]
    pub fn links(&self) -> Option<&[LinkDto]> {
        self.links.as_deref()
    }

    /// Attach entity-level links
    #[must_use]
    pub fn with_links(mut self, links: Vec<LinkDto>) -> Self {
        self.links = Some(links);
        self
    }
}

impl Serialize for ShapedEntity {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = self.fields.len() + usize::from(self.links.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        if let Some(links) = &self.links {
            map.serialize_entry("links", links)?;
        }
        map.end()
    }
}

/// Resolve a field list to descriptors, identifier first unless the client placed it
fn select_fields<T: Shape>(fields: Option<&str>) -> Result<Vec<&'static FieldDescriptor<T>>> {
    let schema = T::schema();

    let Some(fields) = fields.filter(|f| !f.trim().is_empty()) else {
        return Ok(schema.fields().iter().collect());
    };

    let mut selected: Vec<&'static FieldDescriptor<T>> = Vec::new();
    for name in fields.split(',').map(str::trim) {
        let descriptor = schema.field(name).ok_or_else(|| Error::UnknownField {
            resource: schema.resource(),
            field: name.to_string(),
        })?;
        if !selected.iter().any(|s| s.name() == descriptor.name()) {
            selected.push(descriptor);
        }
    }

    let id = schema.id_descriptor()?;
    if !selected.iter().any(|s| s.name() == id.name()) {
        selected.insert(0, id);
    }

    Ok(selected)
}

fn project<T>(entity: &T, selected: &[&'static FieldDescriptor<T>]) -> ShapedEntity {
    ShapedEntity {
        fields: selected
            .iter()
            .map(|descriptor| (descriptor.name(), descriptor.read(entity)))
            .collect(),
        links: None,
    }
}

/// Project one resource to the requested fields
///
/// `None` or a blank list selects every declared field in schema order.
/// Otherwise fields appear in the order the client listed them, matched
/// case-insensitively, with duplicates dropped; the identifier is prepended
/// when the client left it out.
///
/// # Errors
///
/// Returns [`Error::UnknownField`] for a name the schema does not declare.
/// Callers are expected to run [`validate_fields`](super::validate_fields)
/// first, so this indicates a defect rather than bad input.
pub fn shape<T: Shape>(entity: &T, fields: Option<&str>) -> Result<ShapedEntity> {
    let selected = select_fields::<T>(fields)?;
    Ok(project(entity, &selected))
}

/// Project every resource of a collection, preserving input order
///
/// # Errors
///
/// Same as [`shape`]; the field list is resolved once, so an unknown field
/// fails even for an empty collection.
pub fn shape_many<'a, T, I>(entities: I, fields: Option<&str>) -> Result<Vec<ShapedEntity>>
where
    T: Shape,
    I: IntoIterator<Item = &'a T>,
{
    let selected = select_fields::<T>(fields)?;
    Ok(entities
        .into_iter()
        .map(|entity| project(entity, &selected))
        .collect())
}
