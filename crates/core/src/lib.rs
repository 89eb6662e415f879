#![deny(missing_docs)]
//! bemjsx core: the entity description model, entity identity, and errors.

/// Entity description tree types.
pub mod entity;
/// Transformation error types.
pub mod error;
/// Entity identity descriptors and comparison.
pub mod naming;

pub use entity::{Bemjson, Entity, Js, Mods};
pub use error::TransformError;
pub use naming::{EntityName, IdentityMatcher, NameEquality};
