//! Storage contract for authors and books
//!
//! [`LibraryRepository`] is the collaborator the HTTP handlers fetch from.
//! Each request stages its mutations in its own [`ChangeSet`]; they only
//! become visible once [`save`](LibraryRepository::save) reports success.
//!
//! [`InMemoryLibraryRepository`] is the bundled implementation; it applies a
//! batch of staged changes all-or-nothing.

mod changes;
mod memory;
mod seed;
mod traits;

pub use changes::{ChangeSet, StagedChange};
pub use memory::InMemoryLibraryRepository;
pub use seed::seed_authors;
pub use traits::LibraryRepository;
