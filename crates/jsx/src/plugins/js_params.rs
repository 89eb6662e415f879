use super::{Context, Plugin, Rewrite};
use bemjsx_core::{Entity, Js, TransformError};

/// Merges `js` parameters into the attributes after the modifiers.
///
/// A boolean `js` contributes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessJsParams;

impl ProcessJsParams {
    /// Registration name.
    pub const NAME: &'static str = "processJsParams";
}

impl Plugin for ProcessJsParams {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn rewrite(&self, entity: &mut Entity, _ctx: &Context<'_>) -> Result<Rewrite, TransformError> {
        if let Some(Js::Params(params)) = &entity.js {
            for (name, value) in params {
                entity.props.insert(name.clone(), value.clone());
            }
        }
        Ok(Rewrite::Keep)
    }
}
