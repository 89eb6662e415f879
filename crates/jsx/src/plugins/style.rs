use super::{Context, Plugin, Rewrite};
use bemjsx_core::{Entity, TransformError};
use serde_json::{Map, Value};

/// Expands `style` strings, on the entity and inside `attrs`, into mappings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StylePropToObj;

impl StylePropToObj {
    /// Registration name.
    pub const NAME: &'static str = "stylePropToObj";
}

impl Plugin for StylePropToObj {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn rewrite(&self, entity: &mut Entity, _ctx: &Context<'_>) -> Result<Rewrite, TransformError> {
        if let Some(style) = entity.style.as_mut() {
            expand(style);
        }
        if let Some(style) = entity.attrs.get_mut("style") {
            expand(style);
        }
        Ok(Rewrite::Keep)
    }
}

fn expand(style: &mut Value) {
    if let Value::String(text) = style {
        *style = Value::Object(style_to_object(text));
    }
}

/// Parses `"prop:value;prop2:value2"` into an ordered mapping.
///
/// Empty segments are skipped, as are segments without a `prop:` part.
///
/// # Examples
///
/// ```
/// use bemjsx::plugins::style::style_to_object;
///
/// let style = style_to_object(" width : 200px ;; color:red");
/// assert_eq!(style["width"], "200px");
/// assert_eq!(style.len(), 2);
/// ```
pub fn style_to_object(style: &str) -> Map<String, Value> {
    let mut declarations = Map::new();
    for segment in style.split(';') {
        if segment.trim().is_empty() {
            continue;
        }
        let Some((prop, value)) = segment.split_once(':') else {
            log::warn!("Skipping style declaration without a value: {:?}", segment);
            continue;
        };
        let prop = prop.trim();
        if prop.is_empty() {
            log::warn!("Skipping style declaration without a property: {:?}", segment);
            continue;
        }
        declarations.insert(prop.to_string(), Value::String(value.trim().to_string()));
    }
    declarations
}
