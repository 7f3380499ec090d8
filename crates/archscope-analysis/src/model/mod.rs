//! Metadata model: an immutable snapshot of one compiled module.

pub mod builder;
pub mod types;

pub use builder::{ModuleBuilder, TypeBuilder};
pub use types::*;
