//! Manipulator Core - Image manipulation pipeline
//!
//! This crate loads an image, applies an ordered list of geometric actions
//! (crop, extent, resize, flip, rotate) and encodes the result as a data URI.
//!
//! # Pipeline
//!
//! 1. [`load::load_image`] resolves a URI and decodes it into a [`Surface`]
//! 2. [`pipeline::apply_actions`] folds the actions over the surface, left to right
//! 3. [`encode::encode`] serialises the final surface into an [`ImageResult`]
//!
//! Loading is the only asynchronous step. Each call owns its surface from
//! load to encode, so independent calls can run concurrently.

pub mod action;
pub mod encode;
pub mod load;
pub mod pipeline;
pub mod surface;
pub mod transform;

#[cfg(test)]
mod test_logging;

pub use action::{parse_actions, Action, ActionError, FlipType};
pub use encode::{encode, EncodeError, ImageResult, SaveFormat, SaveOptions};
pub use load::{load_image, LoadError};
pub use pipeline::apply_actions;
pub use surface::Surface;
pub use transform::TransformError;

use thiserror::Error;

/// Any failure of a [`manipulate`] call.
#[derive(Debug, Error)]
pub enum ManipulateError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Load the image at `uri`, apply `actions` in order and encode the result.
///
/// `options` of `None` produces a lossless PNG. The first failure aborts the
/// call; no partial result is returned.
///
/// # Example
///
/// ```ignore
/// use manipulator_core::{manipulate, Action};
///
/// let result = manipulate("photo.png", &[Action::Rotate(90.0)], None).await?;
/// println!("{}x{}", result.width, result.height);
/// ```
pub async fn manipulate(
    uri: &str,
    actions: &[Action],
    options: Option<&SaveOptions>,
) -> Result<ImageResult, ManipulateError> {
    let surface = load_image(uri).await?;
    let surface = apply_actions(surface, actions)?;
    Ok(encode(&surface, options)?)
}
