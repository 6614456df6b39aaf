//! The pixel surface threaded through the manipulation pipeline.

/// Bytes per pixel in a [`Surface`] buffer (RGBA8).
pub const CHANNELS: usize = 4;

/// Largest width or height a transform may produce.
pub const MAX_DIMENSION: u32 = 32_767;

/// Largest pixel count a transform may produce (a 1 GiB RGBA buffer).
pub const MAX_PIXELS: u64 = 1 << 28;

/// An RGBA raster with straight (non-premultiplied) alpha.
///
/// Either dimension may be zero: a crop to an empty region or a resize to
/// zero pixels produces an empty surface rather than an error, the same way a
/// zero-sized canvas is still a valid canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length is always width * height * 4.
    pub pixels: Vec<u8>,
}

impl Surface {
    /// Create a fully transparent surface of the given size.
    ///
    /// # Panics
    ///
    /// Panics if the buffer length overflows `usize`. Transforms check
    /// [`Surface::fits`] before allocating.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; allocation_len(width, height)],
        }
    }

    /// Create a surface filled with a single RGBA colour.
    ///
    /// # Panics
    ///
    /// Same conditions as [`Surface::new`].
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(allocation_len(width, height))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap an existing RGBA buffer.
    ///
    /// Returns `None` when the buffer length does not match the dimensions.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if Some(pixels.len()) != buffer_len(width, height) {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a surface from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an `image::RgbaImage` for use with `image::imageops`.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        // Length is an invariant of the type, so from_raw cannot fail here.
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    /// Read the pixel at (x, y), or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        let px = &self.pixels[idx..idx + CHANNELS];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Overwrite the pixel at (x, y). Out-of-bounds writes are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        self.pixels[idx..idx + CHANNELS].copy_from_slice(&rgba);
    }

    /// Byte offset of pixel (x, y) in the buffer.
    #[inline]
    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// True when the surface has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether a `width` x `height` surface is within [`MAX_DIMENSION`] and
    /// [`MAX_PIXELS`].
    ///
    /// Takes `f64` so callers can check requested sizes before converting
    /// them to pixels. NaN never fits.
    pub fn fits(width: f64, height: f64) -> bool {
        let max = MAX_DIMENSION as f64;
        (0.0..=max).contains(&width)
            && (0.0..=max).contains(&height)
            && width * height <= MAX_PIXELS as f64
    }
}

/// Byte length of a `width` x `height` buffer, `None` on overflow.
fn buffer_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
}

fn allocation_len(width: u32, height: u32) -> usize {
    match buffer_len(width, height) {
        Some(len) => len,
        None => panic!("surface of {width}x{height} pixels overflows the address space"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let s = Surface::new(3, 2);
        assert_eq!(s.byte_size(), 3 * 2 * 4);
        assert!(s.pixels.iter().all(|&b| b == 0));
        assert!(!s.is_empty());
    }

    #[test]
    fn test_filled() {
        let s = Surface::filled(2, 2, [1, 2, 3, 4]);
        assert_eq!(s.pixel(1, 1), Some([1, 2, 3, 4]));
        assert_eq!(s.pixels.len(), 16);
    }

    #[test]
    fn test_from_rgba_rejects_wrong_length() {
        assert!(Surface::from_rgba(2, 2, vec![0; 15]).is_none());
        assert!(Surface::from_rgba(2, 2, vec![0; 16]).is_some());
    }

    #[test]
    fn test_from_rgba_overflowing_dimensions() {
        assert!(Surface::from_rgba(u32::MAX, u32::MAX, Vec::new()).is_none());
    }

    #[test]
    fn test_fits() {
        assert!(Surface::fits(0.0, 0.0));
        assert!(Surface::fits(MAX_DIMENSION as f64, 8192.0));
        assert!(Surface::fits(16384.0, 16384.0));

        // One side too long
        assert!(!Surface::fits(MAX_DIMENSION as f64 + 1.0, 1.0));
        assert!(!Surface::fits(1.0, 1e12));
        // Each side allowed, area too large
        assert!(!Surface::fits(MAX_DIMENSION as f64, MAX_DIMENSION as f64));
        assert!(!Surface::fits(f64::NAN, 1.0));
        assert!(!Surface::fits(-1.0, 1.0));
    }

    #[test]
    fn test_zero_sized_surface() {
        let s = Surface::new(0, 10);
        assert!(s.is_empty());
        assert_eq!(s.byte_size(), 0);
        assert_eq!(s.pixel(0, 0), None);
    }

    #[test]
    fn test_put_and_read_pixel() {
        let mut s = Surface::new(4, 4);
        s.put_pixel(2, 3, [9, 8, 7, 6]);
        assert_eq!(s.pixel(2, 3), Some([9, 8, 7, 6]));
        assert_eq!(s.pixel(3, 2), Some([0, 0, 0, 0]));

        // Out of bounds is a no-op
        s.put_pixel(4, 0, [1, 1, 1, 1]);
        assert_eq!(s.pixel(4, 0), None);
    }

    #[test]
    fn test_rgba_image_conversion() {
        let mut s = Surface::new(5, 3);
        s.put_pixel(4, 2, [255, 0, 0, 255]);
        let img = s.to_rgba_image();
        assert_eq!(img.dimensions(), (5, 3));
        assert_eq!(img.get_pixel(4, 2).0, [255, 0, 0, 255]);

        let back = Surface::from_rgba_image(img);
        assert_eq!(back, s);
    }
}
