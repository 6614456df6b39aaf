//! The action pipeline: a left fold of transforms over a surface.

use crate::action::Action;
use crate::surface::Surface;
use crate::transform::{
    apply_crop, apply_extent, apply_flip, apply_resize, apply_rotate, TransformError,
};

/// Apply a single action to `surface`, returning the new surface.
pub fn apply_action(surface: &Surface, action: &Action) -> Result<Surface, TransformError> {
    match action {
        Action::Crop(params) => Ok(apply_crop(surface, params)),
        Action::Extent(params) => apply_extent(surface, params),
        Action::Resize(params) => apply_resize(surface, params),
        Action::Flip(params) => Ok(apply_flip(surface, params)),
        Action::Rotate(degrees) => apply_rotate(surface, *degrees),
    }
}

/// Apply `actions` in order, each to the output of the previous one.
///
/// An empty list returns the input unchanged. The first failing transform
/// aborts the fold and its error is returned as-is.
pub fn apply_actions(surface: Surface, actions: &[Action]) -> Result<Surface, TransformError> {
    actions.iter().try_fold(surface, |current, action| {
        log::debug!(
            "Applying {} to {}x{} surface",
            action.name(),
            current.width,
            current.height
        );
        apply_action(&current, action)
    })
}
