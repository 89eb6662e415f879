//! Rendered JSX nodes and tag name derivation.

use crate::value::{PropValue, js_string_literal};
use bemjsx_core::TransformError;
use indexmap::IndexMap;
use std::fmt;

/// How entity identity maps onto tag names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Naming {
    /// `block` + `elem` become a PascalCase component name (`Button2Text`).
    Component,
    /// Every entity renders as the given generic tag, with identity and
    /// attributes passed as props.
    Simple(String),
}

/// Computes the tag name for an entity.
///
/// # Examples
///
/// ```
/// use bemjsx::node::{Naming, derive_tag_name};
///
/// assert_eq!(derive_tag_name("button2", Some("text"), &Naming::Component), "Button2Text");
/// assert_eq!(derive_tag_name("button2", None, &Naming::Simple("BEM".into())), "BEM");
/// ```
pub fn derive_tag_name(block: &str, elem: Option<&str>, naming: &Naming) -> String {
    match naming {
        Naming::Simple(tag) => tag.clone(),
        Naming::Component => {
            let mut name = capitalize(block);
            if let Some(elem) = elem {
                name.push_str(&capitalize(elem));
            }
            name
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// An attribute value after serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// A quoted string literal, emitted as `name="..."`.
    Literal(String),
    /// Any other literal, emitted as `name={...}`.
    Expression(String),
}

impl AttrValue {
    /// Serializes a value into attribute form.
    pub fn from_value(value: &PropValue, path: &str) -> Result<Self, TransformError> {
        let literal = value.to_literal(path)?;
        Ok(if value.is_string() {
            AttrValue::Literal(literal)
        } else {
            AttrValue::Expression(literal)
        })
    }
}

/// A child of a rendered node.
#[derive(Debug, Clone, PartialEq)]
pub enum JsxChild {
    /// A nested node.
    Node(JsxNode),
    /// A text run, emitted verbatim as a string expression.
    Text(String),
}

impl fmt::Display for JsxChild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsxChild::Node(node) => write!(f, "{node}"),
            JsxChild::Text(text) => write!(f, "{{{}}}", js_string_literal(text)),
        }
    }
}

/// A compiled tag with serialized attributes and children.
///
/// Nodes are built once and never mutated afterwards; `Display` renders them.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxNode {
    tag_name: String,
    attributes: IndexMap<String, AttrValue>,
    children: Vec<JsxChild>,
}

impl JsxNode {
    /// Creates a node with no attributes or children.
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Builds the node for an entity.
    ///
    /// In [`Naming::Simple`] mode `block` and `elem` are emitted as string
    /// attributes and every other attribute is folded into one `attrs` object.
    pub fn for_entity(
        block: &str,
        elem: Option<&str>,
        attributes: IndexMap<String, PropValue>,
        children: Vec<JsxChild>,
        naming: &Naming,
    ) -> Result<Self, TransformError> {
        let tag_name = derive_tag_name(block, elem, naming);
        let mut node = JsxNode::new(tag_name);
        node.children = children;

        match naming {
            Naming::Component => {
                for (name, value) in &attributes {
                    let path = format!("{}.{}", node.tag_name, name);
                    node.attributes
                        .insert(name.clone(), AttrValue::from_value(value, &path)?);
                }
            }
            Naming::Simple(_) => {
                node.attributes.insert(
                    "block".to_string(),
                    AttrValue::Literal(js_string_literal(block)),
                );
                if let Some(elem) = elem {
                    node.attributes.insert(
                        "elem".to_string(),
                        AttrValue::Literal(js_string_literal(elem)),
                    );
                }
                if !attributes.is_empty() {
                    let path = format!("{}.attrs", node.tag_name);
                    let attrs = PropValue::Object(attributes).to_literal(&path)?;
                    node.attributes
                        .insert("attrs".to_string(), AttrValue::Expression(attrs));
                }
            }
        }

        Ok(node)
    }

    /// The tag name.
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Serialized attributes in emission order.
    pub fn attributes(&self) -> &IndexMap<String, AttrValue> {
        &self.attributes
    }

    /// Children in emission order.
    pub fn children(&self) -> &[JsxChild] {
        &self.children
    }
}

impl fmt::Display for JsxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag_name)?;
        for (name, value) in &self.attributes {
            match value {
                AttrValue::Literal(literal) => write!(f, " {name}={literal}")?,
                AttrValue::Expression(expr) => write!(f, " {name}={{{expr}}}")?,
            }
        }
        if self.children.is_empty() {
            return f.write_str("/>");
        }
        f.write_str(">\n")?;
        for child in &self.children {
            writeln!(f, "{child}")?;
        }
        write!(f, "</{}>", self.tag_name)
    }
}
