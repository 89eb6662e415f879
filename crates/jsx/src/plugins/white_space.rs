use super::{Context, Plugin, Rewrite};
use bemjsx_core::{Bemjson, Entity, TransformError};

/// Lays content out as a flat child list with every text run kept verbatim.
///
/// Whitespace-only strings survive, nothing is trimmed, and adjacent strings
/// stay separate children. The processor always keeps this plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepWhiteSpaces;

impl KeepWhiteSpaces {
    /// Registration name.
    pub const NAME: &'static str = "keepWhiteSpaces";
}

impl Plugin for KeepWhiteSpaces {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn rewrite(&self, entity: &mut Entity, _ctx: &Context<'_>) -> Result<Rewrite, TransformError> {
        entity.content = match entity.content.take() {
            Some(content) => {
                let items = content.into_items();
                (!items.is_empty()).then_some(Bemjson::List(items))
            }
            None => None,
        };
        Ok(Rewrite::Keep)
    }
}
