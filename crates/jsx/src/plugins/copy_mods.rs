use super::{Context, Plugin, Rewrite};
use bemjsx_core::{Entity, TransformError};

/// Copies the entity's own modifiers into its attributes.
///
/// Elements take `elemMods`; blocks take `mods`. The unused mapping is left
/// on the entity.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyMods;

impl CopyMods {
    /// Registration name.
    pub const NAME: &'static str = "copyMods";
}

impl Plugin for CopyMods {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn rewrite(&self, entity: &mut Entity, _ctx: &Context<'_>) -> Result<Rewrite, TransformError> {
        let mods = entity.own_mods().clone();
        for (name, value) in mods {
            entity.props.insert(name, value);
        }
        Ok(Rewrite::Keep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::root_context;
    use serde_json::json;

    fn button() -> Entity {
        Entity::new("button2")
            .with_mod("size", "m")
            .with_mod("theme", "normal")
            .with_elem_mod("size", "l")
            .with_elem_mod("theme", "dark")
    }

    #[test]
    fn block_uses_mods() {
        let mut entity = button();
        CopyMods.rewrite(&mut entity, &root_context()).unwrap();
        assert_eq!(
            serde_json::Value::Object(entity.props),
            json!({ "size": "m", "theme": "normal" })
        );
    }

    #[test]
    fn elem_uses_elem_mods_and_keeps_mods() {
        let mut entity = button().with_elem("text");
        CopyMods.rewrite(&mut entity, &root_context()).unwrap();
        assert_eq!(
            serde_json::Value::Object(entity.props.clone()),
            json!({ "size": "l", "theme": "dark" })
        );
        assert_eq!(entity.mods.len(), 2);
    }

    #[test]
    fn reapplying_changes_nothing() {
        let mut entity = button();
        CopyMods.rewrite(&mut entity, &root_context()).unwrap();
        let once = entity.props.clone();
        CopyMods.rewrite(&mut entity, &root_context()).unwrap();
        assert_eq!(entity.props, once);
    }
}
