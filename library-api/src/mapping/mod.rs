//! Property mapping between client-facing sort keys and storage properties
//!
//! A client sorts a collection with an `orderBy` clause such as
//! `"name desc, age"`. Each key in the clause is looked up (case-insensitively)
//! in a [`PropertyMappingTable`] registered for the `(DTO, entity)` type pair,
//! and expands to one or more storage properties. A mapping may be marked as
//! reverted, which flips the requested direction for that property (sorting
//! by `age` ascending means sorting by date of birth descending).
//!
//! # Example
//!
//! ```rust
//! use library_api::mapping::{
//!     OrderDirection, PropertyMapping, PropertyMappingService, PropertyMappingTable,
//! };
//!
//! struct PersonDto;
//! struct Person;
//!
//! let table = PropertyMappingTable::builder()
//!     .map("name", [PropertyMapping::new("FirstName"), PropertyMapping::new("LastName")])
//!     .map("age", [PropertyMapping::reverted("DateOfBirth")])
//!     .build()
//!     .unwrap();
//!
//! let service = PropertyMappingService::new().register::<PersonDto, Person>(table);
//!
//! assert!(service.is_valid_mapping::<PersonDto, Person>("Name desc, age").unwrap());
//! assert!(!service.is_valid_mapping::<PersonDto, Person>("shoeSize").unwrap());
//!
//! let keys = service.resolve_sort::<PersonDto, Person>("age").unwrap();
//! assert_eq!(keys[0].property, "DateOfBirth");
//! assert_eq!(keys[0].direction, OrderDirection::Descending);
//! ```

mod property;
mod service;
mod sort;

pub use property::{PropertyMapping, PropertyMappingTable, PropertyMappingTableBuilder};
pub use service::PropertyMappingService;
pub use sort::{parse_order_by, OrderDirection, SortKey, SortToken};
