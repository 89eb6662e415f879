#![deny(missing_docs)]
//! bemjsx: renders BEMJSON entity trees to JSX through an ordered plugin pipeline.

/// Rendered JSX nodes and tag name derivation.
pub mod node;
/// Built-in plugins and the plugin contract.
pub mod plugins;
/// The processing pipeline.
pub mod processor;
/// Value-to-literal serialization.
pub mod value;

pub use bemjsx_core::{
    Bemjson, Entity, EntityName, IdentityMatcher, Js, Mods, NameEquality, TransformError,
};
pub use node::{AttrValue, JsxChild, JsxNode, Naming};
pub use plugins::{Context, Plugin, Position, Rewrite, WhiteList};
pub use processor::{ProcessResult, Processor, ProcessorOptions};
pub use value::PropValue;
