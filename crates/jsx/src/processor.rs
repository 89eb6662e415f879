//! The processing pipeline: plugin pass, compilation, and output.

use crate::node::{JsxChild, JsxNode, Naming};
use crate::plugins::{self, Context, KeepWhiteSpaces, Plugin, Position, Rewrite};
use crate::value::PropValue;
use bemjsx_core::{Bemjson, Entity, TransformError};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Processor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessorOptions {
    /// Render every entity as one generic tag instead of a named component.
    pub use_simple_component: bool,
    /// Tag used in simple mode.
    pub simple_component_name: String,
}

impl Default for ProcessorOptions {
    fn default() -> Self {
        Self {
            use_simple_component: false,
            simple_component_name: "BEM".to_string(),
        }
    }
}

impl ProcessorOptions {
    fn naming(&self) -> Naming {
        if self.use_simple_component {
            Naming::Simple(self.simple_component_name.clone())
        } else {
            Naming::Component
        }
    }
}

/// Result of a single [`Processor::process`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    /// The rendered JSX.
    pub jsx: String,
}

/// Position and inherited block for the node being rewritten.
#[derive(Debug, Clone)]
struct Scope {
    depth: usize,
    position: Position,
    parent_block: Option<String>,
}

impl Scope {
    fn root() -> Self {
        Self {
            depth: 0,
            position: Position::Root,
            parent_block: None,
        }
    }

    fn child(&self, position: Position, block: Option<&str>) -> Self {
        Self {
            depth: self.depth + 1,
            position,
            parent_block: block.map(str::to_string).or_else(|| self.parent_block.clone()),
        }
    }
}

/// Owns an ordered plugin list and renders entity trees to JSX.
///
/// Registration and processing on the same instance must not overlap; callers
/// that share a processor serialize access themselves.
///
/// # Examples
///
/// ```
/// use bemjsx::Processor;
/// use serde_json::json;
///
/// let result = Processor::new()
///     .process_value(json!({ "block": "button2", "mods": { "has-clear": "yes" } }))
///     .unwrap();
/// assert_eq!(result.jsx, r#"<Button2 hasClear="yes"/>"#);
/// ```
pub struct Processor {
    options: ProcessorOptions,
    naming: Naming,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Processor {
    /// Creates a processor with default options and the default plugins.
    pub fn new() -> Self {
        Self::with_options(ProcessorOptions::default())
    }

    /// Creates a processor with the given options and the default plugins.
    pub fn with_options(options: ProcessorOptions) -> Self {
        Self {
            naming: options.naming(),
            options,
            plugins: plugins::defaults(),
        }
    }

    /// The options this processor was built with.
    pub fn options(&self) -> &ProcessorOptions {
        &self.options
    }

    /// Names of the active plugins, in the order they run.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    /// Registers a plugin.
    ///
    /// A plugin whose name is already registered replaces the earlier one in
    /// place; otherwise it is appended. The whitespace plugin cannot be replaced.
    pub fn use_plugin<P: Plugin + 'static>(&mut self, plugin: P) -> &mut Self {
        let name = plugin.name().to_string();
        if name == KeepWhiteSpaces::NAME {
            log::warn!("Ignoring registration of `{}`: it is always active", name);
            return self;
        }
        match self.plugins.iter().position(|p| p.name() == name) {
            Some(index) => {
                log::debug!("Replacing plugin `{}`", name);
                self.plugins[index] = Box::new(plugin);
            }
            None => {
                log::debug!("Registering plugin `{}`", name);
                self.plugins.push(Box::new(plugin));
            }
        }
        self
    }

    /// Renders an entity tree.
    ///
    /// A top-level sequence renders each item on its own line.
    pub fn process(&self, input: impl Into<Bemjson>) -> Result<ProcessResult, TransformError> {
        let root = Scope::root();
        let items = self.rewrite_node(input.into(), &root)?;
        let children = self.compile_items(items, &root)?;
        let jsx = children
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        Ok(ProcessResult { jsx })
    }

    /// Renders an entity tree given as JSON.
    pub fn process_value(&self, input: Value) -> Result<ProcessResult, TransformError> {
        self.process(Bemjson::from_value(input)?)
    }

    fn rewrite_node(&self, node: Bemjson, scope: &Scope) -> Result<Vec<Bemjson>, TransformError> {
        match node {
            Bemjson::Empty => Ok(Vec::new()),
            Bemjson::Text(text) => Ok(vec![Bemjson::Text(text)]),
            Bemjson::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.extend(self.rewrite_node(item, scope)?);
                }
                Ok(out)
            }
            Bemjson::Entity(entity) => self.rewrite_entity(*entity, scope),
        }
    }

    fn rewrite_entity(
        &self,
        mut entity: Entity,
        scope: &Scope,
    ) -> Result<Vec<Bemjson>, TransformError> {
        if entity.block.is_none() && entity.elem.is_some() {
            log::debug!(
                "Element {:?} inherits block {:?}",
                entity.elem,
                scope.parent_block
            );
            entity.block = scope.parent_block.clone();
        }

        let ctx = Context {
            depth: scope.depth,
            position: scope.position,
            parent_block: scope.parent_block.as_deref(),
        };
        for plugin in &self.plugins {
            match plugin.rewrite(&mut entity, &ctx)? {
                Rewrite::Keep => {}
                Rewrite::Replace(next) => entity = next,
                Rewrite::Splice(items) => {
                    return self.rewrite_node(Bemjson::List(items), scope);
                }
                Rewrite::Drop => return Ok(Vec::new()),
            }
        }

        if let Some(content) = entity.content.take() {
            let child_scope = scope.child(Position::Content, entity.block.as_deref());
            let children = self.rewrite_node(content, &child_scope)?;
            if !children.is_empty() {
                entity.content = Some(Bemjson::List(children));
            }
        }

        Ok(vec![Bemjson::Entity(Box::new(entity))])
    }

    fn compile_items(
        &self,
        items: Vec<Bemjson>,
        scope: &Scope,
    ) -> Result<Vec<JsxChild>, TransformError> {
        let mut children = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Bemjson::Empty => {}
                Bemjson::Text(text) => children.push(JsxChild::Text(text)),
                Bemjson::List(list) => children.extend(self.compile_items(list, scope)?),
                Bemjson::Entity(entity) => children.extend(self.compile_entity(*entity, scope)?),
            }
        }
        Ok(children)
    }

    /// Compiles one entity; block-less entities contribute their children in place.
    fn compile_entity(&self, entity: Entity, scope: &Scope) -> Result<Vec<JsxChild>, TransformError> {
        let Some(block) = entity.block else {
            let children = match entity.content {
                Some(content) => {
                    let child_scope = scope.child(Position::Content, None);
                    self.compile_items(content.into_items(), &child_scope)?
                }
                None => Vec::new(),
            };
            return Ok(children);
        };
        let children = match entity.content {
            Some(content) => {
                let child_scope = scope.child(Position::Content, Some(block.as_str()));
                self.compile_items(content.into_items(), &child_scope)?
            }
            None => Vec::new(),
        };
        let prop_scope = scope.child(Position::Prop, Some(block.as_str()));
        let mut attributes = IndexMap::new();
        for (name, value) in entity.props.into_iter().chain(entity.custom) {
            let value = self.prop_value(value, &prop_scope)?;
            attributes.insert(name, value);
        }
        if let Some(mix) = entity.mix {
            attributes.insert("mix".to_string(), PropValue::from_json(mix));
        }
        for (name, value) in entity.attrs {
            attributes.insert(name, PropValue::from_json(value));
        }
        if let Some(style) = entity.style {
            attributes.insert("style".to_string(), PropValue::from_json(style));
        }

        let node = JsxNode::for_entity(
            &block,
            entity.elem.as_deref(),
            attributes,
            children,
            &self.naming,
        )?;
        Ok(vec![JsxChild::Node(node)])
    }

    /// Converts an attribute value, compiling any embedded entity into markup.
    ///
    /// `scope` is the position embedded entities occupy under their host.
    fn prop_value(&self, value: Value, scope: &Scope) -> Result<PropValue, TransformError> {
        match value {
            Value::Object(map) if map.get("block").is_some_and(Value::is_string) => {
                let entity: Entity = serde_json::from_value(Value::Object(map))?;
                let items = self.rewrite_entity(entity, scope)?;
                let mut nodes: Vec<PropValue> = self
                    .compile_items(items, scope)?
                    .into_iter()
                    .map(|child| match child {
                        JsxChild::Node(node) => PropValue::from(node),
                        JsxChild::Text(text) => PropValue::String(text),
                    })
                    .collect();
                Ok(match nodes.len() {
                    0 => PropValue::Null,
                    1 => nodes.remove(0),
                    _ => PropValue::Array(nodes),
                })
            }
            Value::Object(map) => {
                let mut out = IndexMap::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key, self.prop_value(value, scope)?);
                }
                Ok(PropValue::Object(out))
            }
            Value::Array(items) => items
                .into_iter()
                .map(|item| self.prop_value(item, scope))
                .collect::<Result<Vec<_>, _>>()
                .map(PropValue::Array),
            other => Ok(PropValue::from_json(other)),
        }
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::{WhiteList, plugin_fn};
    use bemjsx_core::EntityName;
    use serde_json::json;

    fn jsx(value: Value) -> String {
        Processor::new().process_value(value).unwrap().jsx
    }

    #[test]
    fn defaults_are_registered_in_order() {
        assert_eq!(Processor::new().plugin_names(), plugins::DEFAULT_ORDER);
    }

    #[test]
    fn same_name_replaces_in_place() {
        let mut processor = Processor::new();
        processor.use_plugin(plugin_fn("copyMods", |_, _| Ok(Rewrite::Keep)));
        assert_eq!(processor.plugin_names(), plugins::DEFAULT_ORDER);

        let result = processor
            .process_value(json!({ "block": "button2", "mods": { "size": "m" } }))
            .unwrap();
        assert_eq!(result.jsx, "<Button2/>");
    }

    #[test]
    fn whitespace_plugin_cannot_be_replaced() {
        let mut processor = Processor::new();
        processor.use_plugin(plugin_fn("keepWhiteSpaces", |_, _| Ok(Rewrite::Drop)));
        let result = processor
            .process_value(json!({ "block": "b", "content": " x " }))
            .unwrap();
        assert_eq!(result.jsx, "<B>\n{\" x \"}\n</B>");
    }

    #[test]
    fn elements_inherit_the_enclosing_block() {
        assert_eq!(
            jsx(json!({ "block": "menu", "content": [{ "elem": "item", "elemMods": { "active": true } }] })),
            "<Menu>\n<MenuItem active={true}/>\n</Menu>"
        );
    }

    #[test]
    fn blockless_entities_inline_their_children() {
        assert_eq!(
            jsx(json!({ "block": "page", "content": { "content": ["a", { "block": "b" }] } })),
            "<Page>\n{\"a\"}\n<B/>\n</Page>"
        );
    }

    #[test]
    fn attribute_sources_render_in_fixed_order() {
        assert_eq!(
            jsx(json!({
                "style": "color:red",
                "attrs": { "id": "x" },
                "mix": { "block": "m" },
                "block": "b",
                "js": { "ext": "txt" },
                "items": 2,
                "mods": { "size": "m" }
            })),
            r#"<B size="m" ext="txt" items={2} mix={{ 'block': "m" }} id="x" style={{ 'color': "red" }}/>"#
        );
    }

    #[test]
    fn entities_in_custom_fields_become_nodes() {
        assert_eq!(
            jsx(json!({ "block": "select", "icon": { "block": "icon", "mods": { "glyph": "x" } } })),
            r#"<Select icon={<Icon glyph="x"/>}/>"#
        );
    }

    #[test]
    fn plugins_see_the_real_depth_of_embedded_entities() {
        let mut processor = Processor::new();
        processor.use_plugin(plugin_fn("depth", |entity, ctx| {
            entity.props.insert("depth".to_string(), json!(ctx.depth));
            Ok(Rewrite::Keep)
        }));
        let result = processor
            .process_value(json!({
                "block": "page",
                "content": { "block": "select", "icon": { "block": "icon" } }
            }))
            .unwrap();
        assert_eq!(
            result.jsx,
            "<Page depth={0}>\n<Select depth={1} icon={<Icon depth={2}/>}/>\n</Page>"
        );
    }

    #[test]
    fn embedded_entities_are_not_filtered() {
        let mut processor = Processor::new();
        processor.use_plugin(WhiteList::with_entities(vec![EntityName::block("select")]));
        let result = processor
            .process_value(json!({ "block": "select", "icon": { "block": "icon" } }))
            .unwrap();
        assert_eq!(result.jsx, "<Select icon={<Icon/>}/>");
    }

    #[test]
    fn plugin_errors_propagate_and_processor_stays_usable() {
        let mut processor = Processor::new();
        processor.use_plugin(plugin_fn("strict", |entity, _| {
            if entity.block.as_deref() == Some("bad") {
                Err(TransformError::plugin("strict", "bad block"))
            } else {
                Ok(Rewrite::Keep)
            }
        }));

        let err = processor.process_value(json!({ "block": "bad" })).unwrap_err();
        assert!(matches!(err, TransformError::Plugin { ref message, .. } if message == "bad block"));

        let ok = processor.process_value(json!({ "block": "good" })).unwrap();
        assert_eq!(ok.jsx, "<Good/>");
    }

    #[test]
    fn splice_replaces_an_entity_with_its_children() {
        let mut processor = Processor::new();
        processor.use_plugin(plugin_fn("unwrap", |entity, _| {
            Ok(if entity.block.as_deref() == Some("wrapper") {
                Rewrite::Splice(entity.content.take().map(Bemjson::into_items).unwrap_or_default())
            } else {
                Rewrite::Keep
            })
        }));
        let result = processor
            .process_value(json!({ "block": "page", "content": { "block": "wrapper", "content": [{ "block": "a" }, "t"] } }))
            .unwrap();
        assert_eq!(result.jsx, "<Page>\n<A/>\n{\"t\"}\n</Page>");
    }

    #[test]
    fn options_read_from_json() {
        let options: ProcessorOptions =
            serde_json::from_value(json!({ "useSimpleComponent": true })).unwrap();
        assert_eq!(options.simple_component_name, "BEM");
        let result = Processor::with_options(options)
            .process_value(json!({ "block": "button2", "elem": "text", "elemMods": { "size": "l" } }))
            .unwrap();
        assert_eq!(
            result.jsx,
            r#"<BEM block="button2" elem="text" attrs={{ 'size': "l" }}/>"#
        );
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(jsx(json!([])), "");
        assert_eq!(jsx(json!(null)), "");
    }
}
