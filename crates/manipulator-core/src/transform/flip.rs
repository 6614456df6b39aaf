//! Mirror the surface horizontally, vertically, or both.

use image::imageops;

use crate::action::FlipParams;
use crate::surface::Surface;

/// Flip `surface` along the selected axes.
///
/// Flipping both axes is equivalent to a 180° rotation; selecting neither
/// returns an unchanged copy.
pub fn apply_flip(surface: &Surface, params: &FlipParams) -> Surface {
    if !params.horizontal && !params.vertical {
        return surface.clone();
    }

    let mut img = surface.to_rgba_image();
    if params.horizontal {
        imageops::flip_horizontal_in_place(&mut img);
    }
    if params.vertical {
        imageops::flip_vertical_in_place(&mut img);
    }
    Surface::from_rgba_image(img)
}
