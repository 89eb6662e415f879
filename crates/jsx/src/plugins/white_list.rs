use super::{Context, Plugin, Position, Rewrite};
use bemjsx_core::{Entity, EntityName, IdentityMatcher, NameEquality, TransformError};

/// Drops child entities that match none of the configured names.
///
/// Without a configured list every entity passes. Top-level entities are
/// never dropped, and neither are entities embedded in attribute values.
/// Block-less entities only group their children, so they pass and each
/// child is judged on its own.
pub struct WhiteList {
    entities: Option<Vec<EntityName>>,
    matcher: Box<dyn IdentityMatcher>,
}

impl WhiteList {
    /// Registration name.
    pub const NAME: &'static str = "whiteList";

    /// An allow-list that lets everything through.
    pub fn new() -> Self {
        Self {
            entities: None,
            matcher: Box::new(NameEquality),
        }
    }

    /// Allows only the given entities, compared with [`EntityName::identifies`].
    pub fn with_entities(entities: Vec<EntityName>) -> Self {
        Self {
            entities: Some(entities),
            ..Self::new()
        }
    }

    /// Replaces the identity comparison.
    pub fn with_matcher<M: IdentityMatcher + 'static>(mut self, matcher: M) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    fn allows(&self, entity: &Entity) -> bool {
        match &self.entities {
            None => true,
            Some(names) => names
                .iter()
                .any(|name| self.matcher.matches(name, entity)),
        }
    }
}

impl Default for WhiteList {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for WhiteList {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn rewrite(&self, entity: &mut Entity, ctx: &Context<'_>) -> Result<Rewrite, TransformError> {
        if ctx.position != Position::Content || entity.block.is_none() || self.allows(entity) {
            return Ok(Rewrite::Keep);
        }
        log::debug!(
            "whiteList: dropping {:?}__{:?} at depth {}",
            entity.block,
            entity.elem,
            ctx.depth
        );
        Ok(Rewrite::Drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::root_context;

    fn child_context() -> Context<'static> {
        Context {
            depth: 1,
            position: Position::Content,
            parent_block: Some("button2"),
        }
    }

    #[test]
    fn unconfigured_passes_everything() {
        let mut entity = Entity::new("menu");
        let verdict = WhiteList::new().rewrite(&mut entity, &child_context()).unwrap();
        assert_eq!(verdict, Rewrite::Keep);
    }

    #[test]
    fn drops_unlisted_children() {
        let list = WhiteList::with_entities(vec![EntityName::block("button2")]);
        let mut menu = Entity::new("menu");
        let mut button = Entity::new("button2");

        assert_eq!(list.rewrite(&mut menu, &child_context()).unwrap(), Rewrite::Drop);
        assert_eq!(list.rewrite(&mut button, &child_context()).unwrap(), Rewrite::Keep);
    }

    #[test]
    fn blockless_groups_pass() {
        let list = WhiteList::with_entities(vec![EntityName::block("button2")]);
        let mut group = Entity::default();
        assert_eq!(list.rewrite(&mut group, &child_context()).unwrap(), Rewrite::Keep);
    }

    #[test]
    fn root_is_never_dropped() {
        let list = WhiteList::with_entities(vec![EntityName::block("button2")]);
        let mut menu = Entity::new("menu");
        assert_eq!(list.rewrite(&mut menu, &root_context()).unwrap(), Rewrite::Keep);
    }

    #[test]
    fn custom_matcher() {
        let list = WhiteList::with_entities(vec![EntityName::block("menu")]).with_matcher(
            |name: &EntityName, entity: &Entity| {
                entity
                    .block
                    .as_deref()
                    .is_some_and(|block| block.starts_with(&name.block))
            },
        );
        let mut item = Entity::new("menu-item");
        assert_eq!(list.rewrite(&mut item, &child_context()).unwrap(), Rewrite::Keep);
    }
}
