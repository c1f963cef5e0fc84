//! Locally rendered fallback illustration.

use super::font::{GLYPH_HEIGHT, GLYPH_WIDTH, digit_cells};
use image::{ImageFormat, ImageResult, Rgb, RgbImage};
use picturebook_config::PlaceholderConfig;
use std::io::Cursor;

const PALETTE: [[u8; 3]; 5] = [
    [255, 228, 225],
    [224, 240, 255],
    [230, 255, 230],
    [255, 250, 205],
    [240, 230, 255],
];

const SUN: Rgb<u8> = Rgb([255, 214, 102]);

fn shade(color: [u8; 3], factor: f32) -> Rgb<u8> {
    Rgb(color.map(|c| (c as f32 * factor).clamp(0.0, 255.0) as u8))
}

fn tint(color: [u8; 3], toward_white: f32) -> Rgb<u8> {
    Rgb(color.map(|c| (c as f32 + (255.0 - c as f32) * toward_white) as u8))
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x_end = x.saturating_add(w).min(img.width());
    let y_end = y.saturating_add(h).min(img.height());
    for py in y.min(y_end)..y_end {
        for px in x.min(x_end)..x_end {
            img.put_pixel(px, py, color);
        }
    }
}

fn fill_circle(img: &mut RgbImage, cx: u32, cy: u32, r: u32, color: Rgb<u8>) {
    let r2 = (r as i64) * (r as i64);
    for py in cy.saturating_sub(r)..(cy + r).min(img.height()) {
        for px in cx.saturating_sub(r)..(cx + r).min(img.width()) {
            let dx = px as i64 - cx as i64;
            let dy = py as i64 - cy as i64;
            if dx * dx + dy * dy <= r2 {
                img.put_pixel(px, py, color);
            }
        }
    }
}

/// Draws a framed pastel card with a simple landscape band and the page
/// number, for pages where every image provider failed.
///
/// # Examples
///
/// ```
/// use picturebook_config::PlaceholderConfig;
/// use picturebook_models::PlaceholderRenderer;
///
/// let renderer = PlaceholderRenderer::new(PlaceholderConfig { width: 320, height: 240 });
/// let png = renderer.render(3).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderRenderer {
    width: u32,
    height: u32,
}

impl PlaceholderRenderer {
    /// Create a renderer for the configured size.
    pub fn new(config: PlaceholderConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
        }
    }

    /// Render the placeholder for `page` (1-based) as PNG bytes.
    pub fn render(&self, page: usize) -> ImageResult<Vec<u8>> {
        let (w, h) = (self.width, self.height);
        let base = PALETTE[page.saturating_sub(1) % PALETTE.len()];
        let ink = shade(base, 0.45);
        let mut img = RgbImage::from_pixel(w, h, Rgb(base));

        // Frame
        let border = (w.min(h) / 48).max(4);
        fill_rect(&mut img, 0, 0, w, border, ink);
        fill_rect(&mut img, 0, h - border, w, border, ink);
        fill_rect(&mut img, 0, 0, border, h, ink);
        fill_rect(&mut img, w - border, 0, border, h, ink);

        // Landscape band: sun and ground
        fill_circle(&mut img, w * 4 / 5, h / 4, w.min(h) / 11, SUN);
        let ground_top = h * 3 / 4;
        fill_rect(
            &mut img,
            border,
            ground_top,
            w - 2 * border,
            h - border - ground_top,
            tint(shade(base, 0.8).0, 0.2),
        );

        // Page number, centred above the ground
        let digits = page.to_string();
        let cell = (h * 2 / 5 / GLYPH_HEIGHT).max(1);
        let glyph_advance = (GLYPH_WIDTH + 1) * cell;
        let text_width = glyph_advance * digits.len() as u32 - cell;
        let origin_x = w.saturating_sub(text_width) / 2;
        let origin_y = ground_top.saturating_sub(GLYPH_HEIGHT * cell + cell);
        for (i, c) in digits.chars().enumerate() {
            let Some(cells) = digit_cells(c) else {
                continue;
            };
            let glyph_x = origin_x + i as u32 * glyph_advance;
            for (col, row) in cells {
                fill_rect(
                    &mut img,
                    glyph_x + col * cell,
                    origin_y + row * cell,
                    cell,
                    cell,
                    ink,
                );
            }
        }

        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_decodes_at_configured_size() {
        let renderer = PlaceholderRenderer::new(PlaceholderConfig {
            width: 400,
            height: 300,
        });
        let png = renderer.render(12).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (400, 300));
    }

    #[test]
    fn test_pages_get_different_backgrounds() {
        let renderer = PlaceholderRenderer::new(PlaceholderConfig {
            width: 128,
            height: 96,
        });
        let first = image::load_from_memory(&renderer.render(1).unwrap())
            .unwrap()
            .to_rgb8();
        let second = image::load_from_memory(&renderer.render(2).unwrap())
            .unwrap()
            .to_rgb8();
        // Just inside the frame, away from the sun and the digits
        let probe = (10, 10);
        assert_ne!(
            first.get_pixel(probe.0, probe.1),
            second.get_pixel(probe.0, probe.1)
        );
    }
}
