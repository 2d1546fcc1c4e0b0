//! blogkit Content Library
//!
//! Discovers the files of a content collection and validates each one against
//! the post schema.
//!
//! # Modules
//!
//! - [`collector`] - Directory walk and parallel validation
//! - [`collection`] - The validated collection and its indexes

pub mod collection;
pub mod collector;

pub use collection::{Collection, Entry};
pub use collector::{CollectionError, ContentCollector, Failure};
