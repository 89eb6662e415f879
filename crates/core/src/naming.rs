//! Entity identity: descriptors naming a block, element, or modifier.

use crate::Entity;
use serde::Deserialize;
use serde_json::Value;

/// Names one logical entity: a block, optionally an element, optionally a modifier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityName {
    /// Block identifier.
    pub block: String,
    /// Element identifier.
    #[serde(default)]
    pub elem: Option<String>,
    /// Modifier name.
    #[serde(default)]
    pub mod_name: Option<String>,
    /// Modifier value; `None` with a `mod_name` matches any set value.
    #[serde(default)]
    pub mod_val: Option<Value>,
}

impl EntityName {
    /// Names a block.
    pub fn block(block: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            elem: None,
            mod_name: None,
            mod_val: None,
        }
    }

    /// Names an element of a block.
    pub fn elem(block: impl Into<String>, elem: impl Into<String>) -> Self {
        Self {
            elem: Some(elem.into()),
            ..Self::block(block)
        }
    }

    /// Narrows the name to a modifier value.
    pub fn with_mod(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.mod_name = Some(name.into());
        self.mod_val = Some(value.into());
        self
    }

    /// Returns true when `entity` is the entity this descriptor names.
    ///
    /// # Examples
    ///
    /// ```
    /// use bemjsx_core::{Entity, EntityName};
    ///
    /// let button = Entity::new("button2").with_mod("theme", "normal");
    /// assert!(EntityName::block("button2").identifies(&button));
    /// assert!(EntityName::block("button2").with_mod("theme", "normal").identifies(&button));
    /// assert!(!EntityName::elem("button2", "text").identifies(&button));
    /// ```
    pub fn identifies(&self, entity: &Entity) -> bool {
        if entity.block.as_deref() != Some(self.block.as_str()) || entity.elem != self.elem {
            return false;
        }
        let Some(mod_name) = &self.mod_name else {
            return true;
        };
        match (entity.own_mods().get(mod_name), &self.mod_val) {
            (None, _) | (Some(Value::Null), _) | (Some(Value::Bool(false)), _) => false,
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
        }
    }
}

/// Decides whether a descriptor and an entity description name the same entity.
pub trait IdentityMatcher {
    /// Compare `name` against `entity`.
    fn matches(&self, name: &EntityName, entity: &Entity) -> bool;
}

impl<F> IdentityMatcher for F
where
    F: Fn(&EntityName, &Entity) -> bool,
{
    fn matches(&self, name: &EntityName, entity: &Entity) -> bool {
        (self)(name, entity)
    }
}

/// Matcher backed by [`EntityName::identifies`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NameEquality;

impl IdentityMatcher for NameEquality {
    fn matches(&self, name: &EntityName, entity: &Entity) -> bool {
        name.identifies(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_name_does_not_identify_its_elements() {
        let text = Entity::new("button2").with_elem("text");
        assert!(!EntityName::block("button2").identifies(&text));
        assert!(EntityName::elem("button2", "text").identifies(&text));
    }

    #[test]
    fn modifier_compares_against_own_mods() {
        let text = Entity::new("button2")
            .with_elem("text")
            .with_mod("size", "m")
            .with_elem_mod("size", "l");
        assert!(EntityName::elem("button2", "text").with_mod("size", "l").identifies(&text));
        assert!(!EntityName::elem("button2", "text").with_mod("size", "m").identifies(&text));
    }

    #[test]
    fn closures_are_matchers() {
        let by_block = |name: &EntityName, entity: &Entity| {
            entity.block.as_deref() == Some(name.block.as_str())
        };
        let text = Entity::new("button2").with_elem("text");
        assert!(by_block.matches(&EntityName::block("button2"), &text));
    }

    #[test]
    fn deserializes_from_json() {
        let name: EntityName =
            serde_json::from_value(serde_json::json!({ "block": "menu", "modName": "theme" }))
                .unwrap();
        assert_eq!(name.mod_name.as_deref(), Some("theme"));
        assert_eq!(name.mod_val, None);
    }
}
