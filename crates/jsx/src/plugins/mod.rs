//! Plugins: named rewrites applied to every entity before it is compiled.
//!
//! - `copy_mods`: picks `mods` or `elemMods` as the entity's own attributes.
//! - `mix`: mirrors `elemMods` into `mods` on mix targets.
//! - `js_params`: merges behavior parameters into the attributes.
//! - `camel_case`: `has-clear` modifier names become `hasClear`.
//! - `style`: expands `"prop:value;..."` style strings into mappings.
//! - `white_space`: keeps text children verbatim, one per line.
//! - `white_list`: drops child entities that are not on an allow-list.

use bemjsx_core::{Bemjson, Entity, TransformError};

/// Hyphenated modifier names to camelCase.
pub mod camel_case;
/// Modifier source resolution.
pub mod copy_mods;
/// Behavior parameter merge.
pub mod js_params;
/// Mix target normalization.
pub mod mix;
/// Inline style expansion.
pub mod style;
/// Allow-list filtering of child entities.
pub mod white_list;
/// Whitespace-preserving text children.
pub mod white_space;

pub use camel_case::CamelCaseProps;
pub use copy_mods::CopyMods;
pub use js_params::ProcessJsParams;
pub use mix::ProcessMixElemMods;
pub use style::StylePropToObj;
pub use white_list::WhiteList;
pub use white_space::KeepWhiteSpaces;

/// Names of the default plugins, in the order they run.
pub const DEFAULT_ORDER: [&str; 6] = [
    CopyMods::NAME,
    ProcessMixElemMods::NAME,
    ProcessJsParams::NAME,
    CamelCaseProps::NAME,
    StylePropToObj::NAME,
    KeepWhiteSpaces::NAME,
];

/// Where an entity sits in the tree being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// A top-level input node.
    Root,
    /// A child in some entity's `content`.
    Content,
    /// An entity embedded in an attribute value.
    Prop,
}

/// What a plugin sees about the entity's surroundings.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Nesting depth; top-level nodes are at 0.
    pub depth: usize,
    /// Where the entity sits.
    pub position: Position,
    /// Block of the nearest enclosing entity.
    pub parent_block: Option<&'a str>,
}

impl Context<'_> {
    /// Returns true for top-level input nodes.
    pub fn is_root(&self) -> bool {
        self.position == Position::Root
    }
}

/// The outcome of applying a plugin to an entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite {
    /// Keep the (possibly mutated in place) entity.
    Keep,
    /// Continue with a different entity.
    Replace(Entity),
    /// Replace the entity with a set of nodes, each processed from scratch.
    Splice(Vec<Bemjson>),
    /// Remove the entity and everything beneath it.
    Drop,
}

/// A named rewrite over entity descriptions.
///
/// Plugins must tolerate being applied to an entity they already rewrote.
pub trait Plugin {
    /// Registration name; a later plugin with the same name replaces this one.
    fn name(&self) -> &str;

    /// Rewrite `entity`.
    fn rewrite(&self, entity: &mut Entity, ctx: &Context<'_>) -> Result<Rewrite, TransformError>;
}

/// A plugin backed by a closure.
pub struct FnPlugin<F> {
    name: String,
    rewrite: F,
}

/// Wraps a closure as a named plugin.
///
/// # Examples
///
/// ```
/// use bemjsx::plugins::{Rewrite, plugin_fn};
///
/// let drop_spacers = plugin_fn("dropSpacers", |entity, _ctx| {
///     Ok(if entity.block.as_deref() == Some("spacer") {
///         Rewrite::Drop
///     } else {
///         Rewrite::Keep
///     })
/// });
/// ```
pub fn plugin_fn<F>(name: impl Into<String>, rewrite: F) -> FnPlugin<F>
where
    F: Fn(&mut Entity, &Context<'_>) -> Result<Rewrite, TransformError>,
{
    FnPlugin {
        name: name.into(),
        rewrite,
    }
}

impl<F> Plugin for FnPlugin<F>
where
    F: Fn(&mut Entity, &Context<'_>) -> Result<Rewrite, TransformError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn rewrite(&self, entity: &mut Entity, ctx: &Context<'_>) -> Result<Rewrite, TransformError> {
        (self.rewrite)(entity, ctx)
    }
}

/// The default plugins, in [`DEFAULT_ORDER`].
pub fn defaults() -> Vec<Box<dyn Plugin>> {
    vec![
        Box::new(CopyMods),
        Box::new(ProcessMixElemMods),
        Box::new(ProcessJsParams),
        Box::new(CamelCaseProps),
        Box::new(StylePropToObj),
        Box::new(KeepWhiteSpaces),
    ]
}

#[cfg(test)]
pub(crate) fn root_context() -> Context<'static> {
    Context {
        depth: 0,
        position: Position::Root,
        parent_block: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_documented_order() {
        let names: Vec<String> = defaults().iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, DEFAULT_ORDER);
    }

    #[test]
    fn closure_plugins_keep_their_name() {
        let plugin = plugin_fn("noop", |_, _| Ok(Rewrite::Keep));
        assert_eq!(plugin.name(), "noop");
        let mut entity = Entity::new("b");
        assert_eq!(
            plugin.rewrite(&mut entity, &root_context()).unwrap(),
            Rewrite::Keep
        );
    }
}
