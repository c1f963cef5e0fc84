//! Local image handling: provider output validation and the fallback
//! placeholder illustration.

mod font;
mod placeholder;

pub use placeholder::PlaceholderRenderer;

use image::{ImageFormat, ImageResult};
use std::io::Cursor;

/// A decoded-and-verified PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngImage {
    /// PNG-encoded bytes
    pub bytes: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Decode provider output and return it as PNG.
///
/// PNG input is kept byte-for-byte once it decodes; JPEG and WebP are
/// re-encoded so every illustration on disk matches its `.png` name.
pub fn normalize_to_png(bytes: &[u8]) -> ImageResult<PngImage> {
    let decoded = image::load_from_memory(bytes)?;
    let (width, height) = (decoded.width(), decoded.height());

    let png = if image::guess_format(bytes)? == ImageFormat::Png {
        bytes.to_vec()
    } else {
        let mut out = Vec::new();
        decoded.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
        out
    };

    Ok(PngImage {
        bytes: png,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_jpeg_is_converted() {
        let mut jpeg = Vec::new();
        RgbImage::from_pixel(8, 6, Rgb([10, 20, 30]))
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .unwrap();

        let png = normalize_to_png(&jpeg).unwrap();
        assert_eq!((png.width, png.height), (8, 6));
        assert_eq!(image::guess_format(&png.bytes).unwrap(), ImageFormat::Png);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(normalize_to_png(b"<html>quota exceeded</html>").is_err());
        assert!(normalize_to_png(&[]).is_err());
    }
}
