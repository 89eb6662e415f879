//! Entity description model: the BEMJSON tree callers hand to the processor.

use crate::TransformError;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Ordered modifier mapping, modifier name to value.
pub type Mods = Map<String, Value>;

/// A BEMJSON node: text, an entity description, or a sequence of nodes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Bemjson {
    /// `null` content, skipped on render.
    Empty,
    /// A plain text run, rendered verbatim.
    Text(String),
    /// An ordered sequence of nodes.
    List(Vec<Bemjson>),
    /// A component instance.
    Entity(Box<Entity>),
}

impl Bemjson {
    /// Read a tree from an already parsed JSON value.
    ///
    /// # Examples
    ///
    /// ```
    /// use bemjsx_core::Bemjson;
    ///
    /// let tree = Bemjson::from_value(serde_json::json!({ "block": "button2" })).unwrap();
    /// assert_eq!(tree.as_entity().and_then(|e| e.block.as_deref()), Some("button2"));
    /// ```
    pub fn from_value(value: Value) -> Result<Self, TransformError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Parse a tree from JSON source.
    pub fn from_json_str(source: &str) -> Result<Self, TransformError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Returns the entity if this node is one.
    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Bemjson::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    /// Flattens nested sequences into a single ordered list, dropping `null` items.
    ///
    /// Text runs are moved as-is; adjacent strings are never merged.
    pub fn into_items(self) -> Vec<Bemjson> {
        let mut items = Vec::new();
        self.flatten_into(&mut items);
        items
    }

    fn flatten_into(self, out: &mut Vec<Bemjson>) {
        match self {
            Bemjson::Empty => {}
            Bemjson::List(list) => {
                for item in list {
                    item.flatten_into(out);
                }
            }
            other => out.push(other),
        }
    }
}

impl From<&str> for Bemjson {
    fn from(text: &str) -> Self {
        Bemjson::Text(text.to_string())
    }
}

impl From<String> for Bemjson {
    fn from(text: String) -> Self {
        Bemjson::Text(text)
    }
}

impl From<Entity> for Bemjson {
    fn from(entity: Entity) -> Self {
        Bemjson::Entity(Box::new(entity))
    }
}

impl<T: Into<Bemjson>> From<Vec<T>> for Bemjson {
    fn from(items: Vec<T>) -> Self {
        Bemjson::List(items.into_iter().map(Into::into).collect())
    }
}

/// Behavior parameters attached to an entity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Js {
    /// `js: true` / `js: false`, carries no renderable data.
    Flag(bool),
    /// Extra parameters merged into the rendered attributes.
    Params(Map<String, Value>),
}

/// One component instance: block/element identity, modifiers, and content.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Block identifier.
    pub block: Option<String>,
    /// Element identifier; when set, this entity is an element of `block`.
    pub elem: Option<String>,
    /// Block-level modifiers.
    #[serde(default)]
    pub mods: Mods,
    /// Element-level modifiers.
    #[serde(default)]
    pub elem_mods: Mods,
    /// Passthrough mix target(s), rendered as a raw value.
    pub mix: Option<Value>,
    /// Behavior parameters or flag.
    pub js: Option<Js>,
    /// Raw passthrough attributes.
    #[serde(default)]
    pub attrs: Map<String, Value>,
    /// Inline style, either `"prop:value;..."` or a mapping.
    pub style: Option<Value>,
    /// Children.
    pub content: Option<Bemjson>,
    /// Every key not recognized above, in input order.
    #[serde(flatten)]
    pub custom: Map<String, Value>,
    /// Attributes staged by plugins; rendered ahead of every other source.
    #[serde(skip)]
    pub props: Map<String, Value>,
}

impl Entity {
    /// Creates a block entity.
    pub fn new(block: impl Into<String>) -> Self {
        Self {
            block: Some(block.into()),
            ..Self::default()
        }
    }

    /// Turns this entity into an element of its block.
    pub fn with_elem(mut self, elem: impl Into<String>) -> Self {
        self.elem = Some(elem.into());
        self
    }

    /// Adds a block modifier.
    pub fn with_mod(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.mods.insert(name.into(), value.into());
        self
    }

    /// Adds an element modifier.
    pub fn with_elem_mod(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.elem_mods.insert(name.into(), value.into());
        self
    }

    /// Sets the behavior parameters.
    pub fn with_js(mut self, js: Js) -> Self {
        self.js = Some(js);
        self
    }

    /// Adds a raw attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Sets the inline style.
    pub fn with_style(mut self, style: impl Into<Value>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Sets the mix value.
    pub fn with_mix(mut self, mix: Value) -> Self {
        self.mix = Some(mix);
        self
    }

    /// Adds a custom field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom.insert(name.into(), value.into());
        self
    }

    /// Sets the children.
    pub fn with_content(mut self, content: impl Into<Bemjson>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Returns true when this entity is an element rather than a block.
    pub fn is_elem(&self) -> bool {
        self.elem.is_some()
    }

    /// The modifiers describing this entity's own state.
    ///
    /// Elements carry their state in `elemMods`; `mods` at element level is
    /// reserved for a mix target.
    pub fn own_mods(&self) -> &Mods {
        if self.is_elem() {
            &self.elem_mods
        } else {
            &self.mods
        }
    }
}
