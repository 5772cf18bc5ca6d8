//! Demo data model and its static metadata.

pub mod descriptor;
pub mod record;

pub use descriptor::{Describe, FieldDescriptor, ResolvedType, TypeDescriptor};
pub use record::{DemoRecord, Entry};
