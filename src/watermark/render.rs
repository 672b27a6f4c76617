//! Text watermark rendering.
//!
//! The text is drawn onto a fully transparent RGBA layer the size of the
//! source image, the layer is alpha-composited over the source, and the
//! result is flattened to opaque RGB before encoding, since the output
//! formats in play do not preserve transparency.

use ab_glyph::{FontRef, PxScale};
use anyhow::{Context, Result};
use image::{imageops, DynamicImage, Rgba, RgbImage, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Platform default font candidates, tried in order when no custom font is
/// configured or the custom font fails to parse.
const DEFAULT_FONT_PATHS: [&str; 7] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf", // Linux
    "/usr/share/fonts/TTF/DejaVuSans.ttf",             // Linux alt
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/local/share/fonts/DejaVuSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc", // macOS
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/mnt/c/Windows/Fonts/arial.ttf", // Windows via WSL
];

/// Lazily resolved font shared by all workers of a run.
///
/// The resolution chain runs once: custom font path if configured, then the
/// platform candidates. A candidate that fails to read or parse falls
/// through to the next; only exhausting the chain is an error, surfaced as a
/// per-file processing failure by the caller.
pub struct FontSource {
    custom: Option<PathBuf>,
    cell: OnceLock<FontRef<'static>>,
}

impl FontSource {
    pub fn new(custom: Option<PathBuf>) -> Self {
        Self {
            custom,
            cell: OnceLock::new(),
        }
    }

    pub fn get(&self) -> Result<&FontRef<'static>> {
        if let Some(font) = self.cell.get() {
            return Ok(font);
        }
        let font = resolve_font(self.custom.as_deref())?;
        Ok(self.cell.get_or_init(|| font))
    }
}

fn resolve_font(custom: Option<&Path>) -> Result<FontRef<'static>> {
    if let Some(path) = custom {
        if let Ok(font) = load_font_from_path(path) {
            return Ok(font);
        }
    }

    for path in DEFAULT_FONT_PATHS {
        if let Ok(font) = load_font_from_path(Path::new(path)) {
            return Ok(font);
        }
    }

    Err(anyhow::anyhow!(
        "no usable font found; install a system font or pass --custom-font <PATH>"
    ))
}

fn load_font_from_path(path: &Path) -> Result<FontRef<'static>> {
    let font_data = std::fs::read(path)
        .with_context(|| format!("Failed to read font file: {}", path.display()))?;

    let font = FontRef::try_from_slice(Box::leak(font_data.into_boxed_slice()))
        .with_context(|| format!("Failed to parse font file: {}", path.display()))?;

    Ok(font)
}

/// Bounding box of `text` at `font_size`, in pixels.
pub fn measure_text(font: &FontRef<'static>, font_size: u32, text: &str) -> (u32, u32) {
    let scale = PxScale::from(font_size as f32);
    text_size(scale, font, text)
}

/// Composite `text` onto `image` at `position` and flatten to RGB.
pub fn apply_watermark(
    image: &DynamicImage,
    text: &str,
    font: &FontRef<'static>,
    font_size: u32,
    color: Rgba<u8>,
    position: (i32, i32),
) -> RgbImage {
    let base = image.to_rgba8();
    let mut layer = RgbaImage::from_pixel(base.width(), base.height(), Rgba([0, 0, 0, 0]));

    let scale = PxScale::from(font_size as f32);
    draw_text_mut(&mut layer, color, position.0, position.1, scale, font, text);

    composite_and_flatten(base, &layer)
}

/// Alpha-composite `layer` over `base`, then drop the alpha channel.
fn composite_and_flatten(mut base: RgbaImage, layer: &RgbaImage) -> RgbImage {
    imageops::overlay(&mut base, layer, 0, 0);
    DynamicImage::ImageRgba8(base).to_rgb8()
}
