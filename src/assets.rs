//! Font and zodiac image loading.
//!
//! Nothing here fails: a missing or unreadable asset is logged and replaced
//! by a generated stand-in so the clock always renders.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use rusttype::Font;

use crate::config::{ClockConfig, SYSTEM_FONT_CANDIDATES, WARNING};
use crate::zodiac::ZodiacSignRecord;

/// Border width of the placeholder square drawn for a missing sign image.
const PLACEHOLDER_BORDER: u32 = 2;

/// Resources the renderer draws with, loaded once at startup.
pub struct RenderContext {
    pub font: Option<Font<'static>>,
    /// One image per ring slot, already scaled to the sign size.
    pub signs: Vec<RgbaImage>,
}

impl RenderContext {
    pub fn load(config: &ClockConfig, signs: &[ZodiacSignRecord]) -> Self {
        Self {
            font: load_font(config.font_path.as_deref()),
            signs: signs
                .iter()
                .map(|sign| load_sign_image(&config.asset_dir, sign, config.sign_size))
                .collect(),
        }
    }
}

pub fn load_font(path: Option<&Path>) -> Option<Font<'static>> {
    let candidates: Vec<PathBuf> = match path {
        Some(path) => vec![path.to_path_buf()],
        None => SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
    };

    for candidate in &candidates {
        let Ok(bytes) = fs::read(candidate) else {
            continue;
        };
        match Font::try_from_vec(bytes) {
            Some(font) => {
                log::info!("using font {}", candidate.display());
                return Some(font);
            }
            None => log::warn!("{} is not a usable font", candidate.display()),
        }
    }

    log::warn!("no usable font found, text will render as placeholder boxes");
    None
}

pub fn load_sign_image(dir: &Path, sign: &ZodiacSignRecord, size: u32) -> RgbaImage {
    let path = dir.join(sign.asset);
    match image::open(&path) {
        Ok(img) => imageops::resize(&img.to_rgba8(), size, size, FilterType::Triangle),
        Err(err) => {
            log::warn!(
                "could not load image for {} from {}: {err}",
                sign.name,
                path.display()
            );
            placeholder(size)
        }
    }
}

/// A transparent square with a red outline.
pub fn placeholder(size: u32) -> RgbaImage {
    let (r, g, b) = WARNING.as_tuple();
    let border = PLACEHOLDER_BORDER.min(size);
    RgbaImage::from_fn(size, size, |x, y| {
        let edge = x < border || y < border || x + border >= size || y + border >= size;
        if edge {
            Rgba([r, g, b, 0xff])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zodiac::SIGNS;

    #[test]
    fn placeholder_is_an_outlined_square() {
        let img = placeholder(50);
        assert_eq!(img.dimensions(), (50, 50));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(49, 25).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(25, 25).0[3], 0);
    }

    #[test]
    fn missing_image_degrades_to_placeholder() {
        let dir = Path::new("/nonexistent/zodiac-assets");
        let img = load_sign_image(dir, &SIGNS[5], 32);
        assert_eq!(img, placeholder(32));
    }

    #[test]
    fn missing_font_is_not_an_error() {
        assert!(load_font(Some(Path::new("/nonexistent/font.ttf"))).is_none());
    }
}
