use super::{Context, Plugin, Rewrite};
use bemjsx_core::{Entity, TransformError};
use serde_json::{Map, Value};

/// Rewrites hyphenated modifier attribute names to camelCase.
///
/// Only attributes whose name comes from the entity's own modifiers are
/// touched; names without a hyphen pass through unchanged. When a rewritten
/// name collides with one already present, the earlier attribute is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct CamelCaseProps;

impl CamelCaseProps {
    /// Registration name.
    pub const NAME: &'static str = "camelCaseProps";
}

impl Plugin for CamelCaseProps {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn rewrite(&self, entity: &mut Entity, _ctx: &Context<'_>) -> Result<Rewrite, TransformError> {
        if !entity.props.keys().any(|name| name.contains('-')) {
            return Ok(Rewrite::Keep);
        }
        let props = std::mem::take(&mut entity.props);
        let own_mods = entity.own_mods();
        let mut renamed: Map<String, Value> = Map::with_capacity(props.len());
        for (name, value) in props {
            let name = if own_mods.contains_key(&name) {
                camel_case(&name)
            } else {
                name
            };
            if renamed.contains_key(&name) {
                log::warn!("camelCaseProps: `{}` is already set, keeping the first value", name);
                continue;
            }
            renamed.insert(name, value);
        }
        entity.props = renamed;
        Ok(Rewrite::Keep)
    }
}

/// Drops each hyphen and uppercases the character after it.
///
/// # Examples
///
/// ```
/// use bemjsx::plugins::camel_case::camel_case;
///
/// assert_eq!(camel_case("has-clear"), "hasClear");
/// assert_eq!(camel_case("hasclear"), "hasclear");
/// ```
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
