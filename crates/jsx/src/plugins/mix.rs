use super::{Context, Plugin, Rewrite};
use bemjsx_core::{Entity, TransformError};
use serde_json::Value;

/// Gives mix targets that only carry `elemMods` a matching `mods` field.
///
/// A sequence of mix targets is normalized per target.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessMixElemMods;

impl ProcessMixElemMods {
    /// Registration name.
    pub const NAME: &'static str = "processMixElemMods";
}

impl Plugin for ProcessMixElemMods {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn rewrite(&self, entity: &mut Entity, _ctx: &Context<'_>) -> Result<Rewrite, TransformError> {
        match entity.mix.as_mut() {
            Some(Value::Array(targets)) => targets.iter_mut().for_each(normalize_target),
            Some(target) => normalize_target(target),
            None => {}
        }
        Ok(Rewrite::Keep)
    }
}

fn normalize_target(target: &mut Value) {
    let Value::Object(map) = target else {
        return;
    };
    if map.contains_key("mods") {
        return;
    }
    if let Some(elem_mods) = map.get("elemMods").cloned() {
        map.insert("mods".to_string(), elem_mods);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::root_context;
    use serde_json::json;

    fn apply(mix: Value) -> Value {
        let mut entity = Entity::new("button2").with_mix(mix);
        ProcessMixElemMods
            .rewrite(&mut entity, &root_context())
            .unwrap();
        entity.mix.unwrap()
    }

    #[test]
    fn mirrors_elem_mods_after_existing_keys() {
        let mix = apply(json!({ "block": "button2", "elem": "icon", "elemMods": { "modName": "modVal" } }));
        let keys: Vec<&String> = mix.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["block", "elem", "elemMods", "mods"]);
        assert_eq!(mix["mods"], json!({ "modName": "modVal" }));
    }

    #[test]
    fn existing_mods_win() {
        let mix = apply(json!({ "block": "b", "elemMods": { "a": 1 }, "mods": { "b": 2 } }));
        assert_eq!(mix["mods"], json!({ "b": 2 }));
    }

    #[test]
    fn sequences_are_normalized_per_target() {
        let mix = apply(json!([
            { "block": "a", "elem": "e", "elemMods": { "x": 1 } },
            { "block": "b" },
            "not-an-entity"
        ]));
        assert_eq!(mix[0]["mods"], json!({ "x": 1 }));
        assert!(mix[1].get("mods").is_none());
        assert_eq!(mix[2], json!("not-an-entity"));
    }
}
