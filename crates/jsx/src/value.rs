//! Value serializer: renders structured values in JS object-literal syntax.

use crate::node::JsxNode;
use bemjsx_core::TransformError;
use indexmap::IndexMap;
use serde_json::Value;

/// A value that can appear inside an attribute expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// `null`.
    Null,
    /// `true` / `false`.
    Bool(bool),
    /// An integer, echoed exactly.
    Int(i64),
    /// An integer above `i64::MAX`, echoed exactly.
    UInt(u64),
    /// A floating point number.
    Number(f64),
    /// A string, rendered double-quoted.
    String(String),
    /// A sequence, rendered as `[a, b]`.
    Array(Vec<PropValue>),
    /// An ordered mapping, rendered as `{ 'key': value }`.
    Object(IndexMap<String, PropValue>),
    /// Rendered markup embedded as a value.
    Node(Box<JsxNode>),
}

impl PropValue {
    /// Converts a JSON value verbatim, without looking for embedded entities.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => PropValue::Null,
            Value::Bool(flag) => PropValue::Bool(flag),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    PropValue::Int(int)
                } else if let Some(uint) = number.as_u64() {
                    PropValue::UInt(uint)
                } else {
                    PropValue::Number(number.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(text) => PropValue::String(text),
            Value::Array(items) => {
                PropValue::Array(items.into_iter().map(PropValue::from_json).collect())
            }
            Value::Object(map) => PropValue::Object(
                map.into_iter()
                    .map(|(key, value)| (key, PropValue::from_json(value)))
                    .collect(),
            ),
        }
    }

    /// Returns true for string values, which render as plain quoted attributes.
    pub fn is_string(&self) -> bool {
        matches!(self, PropValue::String(_))
    }

    /// Renders this value as a literal.
    ///
    /// `path` locates the value for error reporting; nested values extend it
    /// with `.key` and `[index]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bemjsx::PropValue;
    ///
    /// let style = PropValue::Object([("width".to_string(), "200px".into())].into_iter().collect());
    /// assert_eq!(style.to_literal("style").unwrap(), "{ 'width': \"200px\" }");
    /// assert_eq!(PropValue::Array(vec![1.0.into(), true.into()]).to_literal("v").unwrap(), "[1, true]");
    /// ```
    pub fn to_literal(&self, path: &str) -> Result<String, TransformError> {
        match self {
            PropValue::Null => Ok("null".to_string()),
            PropValue::Bool(flag) => Ok(flag.to_string()),
            PropValue::Int(int) => Ok(int.to_string()),
            PropValue::UInt(uint) => Ok(uint.to_string()),
            PropValue::Number(number) => number_literal(*number, path),
            PropValue::String(text) => Ok(js_string_literal(text)),
            PropValue::Array(items) => {
                let parts = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| item.to_literal(&format!("{path}[{index}]")))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("[{}]", parts.join(", ")))
            }
            // Must be checked before generic mapping handling.
            PropValue::Node(node) => Ok(node.to_string()),
            PropValue::Object(map) => {
                if map.is_empty() {
                    return Ok("{}".to_string());
                }
                let parts = map
                    .iter()
                    .map(|(key, value)| {
                        let literal = value.to_literal(&format!("{path}.{key}"))?;
                        Ok(format!("'{}': {}", escape_key(key), literal))
                    })
                    .collect::<Result<Vec<_>, TransformError>>()?;
                Ok(format!("{{ {} }}", parts.join(", ")))
            }
        }
    }
}

/// Serializes a value with `value` as its root location.
pub fn serialize(value: &PropValue) -> Result<String, TransformError> {
    value.to_literal("value")
}

/// Converts a Rust string to a JavaScript string literal.
///
/// Uses JSON serialization to properly escape special characters.
///
/// # Examples
///
/// ```
/// use bemjsx::value::js_string_literal;
///
/// assert_eq!(js_string_literal("hello"), "\"hello\"");
/// assert_eq!(js_string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
/// ```
pub fn js_string_literal(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

fn escape_key(key: &str) -> String {
    key.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Formats a float the way JS `Number#toString` does: shortest round-trip
/// digits, exponent form below `1e-6` and from `1e21` up.
fn number_literal(number: f64, path: &str) -> Result<String, TransformError> {
    if !number.is_finite() {
        return Err(TransformError::unsupported_value(
            path,
            format!("{number} has no literal form"),
        ));
    }
    if number == 0.0 {
        return Ok("0".to_string());
    }
    let magnitude = number.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{number:e}");
        return Ok(match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        });
    }
    Ok(number.to_string())
}

impl From<&str> for PropValue {
    fn from(text: &str) -> Self {
        PropValue::String(text.to_string())
    }
}

impl From<String> for PropValue {
    fn from(text: String) -> Self {
        PropValue::String(text)
    }
}

impl From<bool> for PropValue {
    fn from(flag: bool) -> Self {
        PropValue::Bool(flag)
    }
}

impl From<i64> for PropValue {
    fn from(int: i64) -> Self {
        PropValue::Int(int)
    }
}

impl From<f64> for PropValue {
    fn from(number: f64) -> Self {
        PropValue::Number(number)
    }
}

impl From<JsxNode> for PropValue {
    fn from(node: JsxNode) -> Self {
        PropValue::Node(Box::new(node))
    }
}
