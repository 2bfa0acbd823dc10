//! Data shaping: projecting resources to a client-chosen subset of fields
//!
//! Each shapeable DTO publishes a static [`ResourceSchema`], a table of
//! field descriptors (public name → accessor) built once and read on every
//! request. [`type_has_properties`] validates a client's `fields` list
//! against that table, and [`shape`] / [`shape_many`] build ordered
//! [`ShapedEntity`] maps from it.
//!
//! # Example
//!
//! ```rust
//! use library_api::shaping::{shape, type_has_properties, FieldDescriptor, ResourceSchema, Shape};
//! use serde_json::Value;
//!
//! struct Planet {
//!     id: u32,
//!     name: String,
//!     moons: u32,
//! }
//!
//! static PLANET_SCHEMA: ResourceSchema<Planet> = ResourceSchema::new(
//!     "Planet",
//!     "id",
//!     &[
//!         FieldDescriptor::new("id", |p| Value::from(p.id)),
//!         FieldDescriptor::new("name", |p| Value::from(p.name.clone())),
//!         FieldDescriptor::new("moons", |p| Value::from(p.moons)),
//!     ],
//! );
//!
//! impl Shape for Planet {
//!     fn schema() -> &'static ResourceSchema<Self> {
//!         &PLANET_SCHEMA
//!     }
//! }
//!
//! let earth = Planet { id: 3, name: "Earth".to_string(), moons: 1 };
//!
//! assert!(type_has_properties::<Planet>(Some("Name, moons")));
//! let shaped = shape(&earth, Some("moons")).unwrap();
//! assert_eq!(shaped.field_names().collect::<Vec<_>>(), vec!["id", "moons"]);
//! ```

mod schema;
mod shaper;

pub use schema::{type_has_properties, validate_fields, FieldAccessor, FieldDescriptor, ResourceSchema, Shape};
pub use shaper::{shape, shape_many, ShapedEntity};
