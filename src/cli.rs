use clap::Parser;
use image::Rgba;
use std::path::PathBuf;

use crate::watermark::position::Anchor;

#[derive(Parser, Debug)]
#[command(
    name = "photomark",
    about = "Stamp a capture-date watermark onto photos",
    long_about = "
photomark - EXIF date watermark tool

Stamps a date watermark onto a photo or a directory of photos. The date is
read from the EXIF capture metadata (DateTime, DateTimeOriginal,
DateTimeDigitized); photos without a usable capture timestamp get a
configurable placeholder text instead.

Output files keep their original names and are written to a generated
directory next to the input, named '<dir>_watermark'. Existing files are
overwritten without prompting.

Example Usage:
  # Stamp every photo in a directory (output in ~/Photos_watermark)
  photomark ~/Photos

  # Single file
  photomark ~/Photos/IMG_001.jpg

  # Red semi-transparent text in the top-left corner
  photomark ~/Photos --font-color 255,0,0,96 --position top-left

  # Custom font, bigger text, European date format
  photomark ~/Photos --custom-font ~/fonts/Roboto.ttf --font-size 48 \\
    --date-format '%d/%m/%Y'

  # Parallel batch over 8 workers
  photomark ~/Photos --parallel --workers 8

  # Simulate a run without writing any file
  photomark ~/Photos --dry-run --verbose"
)]
pub struct Args {
    /// Input image file or directory of images
    #[arg(value_name = "FILE|DIR")]
    pub input_path: PathBuf,

    /// Watermark font size in pixels
    #[arg(long = "font-size", default_value = "36", value_name = "SIZE")]
    pub font_size: u32,

    /// Watermark color as "r,g,b" or "r,g,b,a" (omitted alpha defaults to 128)
    #[arg(
        long = "font-color",
        default_value = "255,255,255,128",
        value_name = "R,G,B[,A]",
        value_parser = parse_color
    )]
    pub font_color: Rgba<u8>,

    /// Watermark position on the image
    #[arg(long = "position", value_enum, default_value = "bottom-right")]
    pub position: Anchor,

    /// Path to a TrueType/OpenType font file (error if it does not exist)
    #[arg(long = "custom-font", value_name = "FILE")]
    pub custom_font: Option<PathBuf>,

    /// strftime-style template for the stamped date
    #[arg(long = "date-format", default_value = "%Y-%m-%d", value_name = "TEMPLATE")]
    pub date_format: String,

    /// Text stamped when no capture date can be extracted
    #[arg(long = "unknown-text", default_value = "unknown date", value_name = "TEXT")]
    pub unknown_text: String,

    /// Distance from the image edge in pixels
    #[arg(long = "padding", default_value = "20", value_name = "PIXELS")]
    pub padding: u32,

    /// Process files through a worker pool instead of sequentially
    #[arg(long = "parallel")]
    pub parallel: bool,

    /// Worker count for --parallel (default: available CPU cores)
    #[arg(long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Comma-separated list of image extensions to process
    #[arg(
        long = "extensions",
        default_value = "jpg,jpeg,png,tiff,bmp",
        value_name = "LIST"
    )]
    pub extensions_str: String,

    /// JSON config file; explicit command-line arguments take precedence
    #[arg(long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Perform a dry run: simulate processing without writing files
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Enable verbose output with per-file progress information
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Args {
    /// Parse the extensions string into a lowercase vector
    pub fn parse_extensions(&self) -> Vec<String> {
        self.extensions_str
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Parse an "r,g,b" or "r,g,b,a" color string. Omitted alpha defaults to a
/// half-transparent 128.
pub fn parse_color(color_str: &str) -> Result<Rgba<u8>, String> {
    let parts: Result<Vec<u8>, _> = color_str
        .split(',')
        .map(|part| part.trim().parse::<u8>())
        .collect();

    let parts = parts.map_err(|_| {
        format!(
            "Invalid color '{}'. Components must be integers in 0-255",
            color_str
        )
    })?;

    match parts.len() {
        3 => Ok(Rgba([parts[0], parts[1], parts[2], 128])),
        4 => Ok(Rgba([parts[0], parts[1], parts[2], parts[3]])),
        _ => Err(format!(
            "Invalid color '{}'. Expected 'r,g,b' or 'r,g,b,a', e.g. '255,255,255,128'",
            color_str
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_rgb_defaults_alpha() {
        assert_eq!(parse_color("255,255,255").unwrap(), Rgba([255, 255, 255, 128]));
        assert_eq!(parse_color("0,0,0").unwrap(), Rgba([0, 0, 0, 128]));
    }

    #[test]
    fn test_parse_color_rgba() {
        assert_eq!(parse_color("10,20,30,40").unwrap(), Rgba([10, 20, 30, 40]));
        assert_eq!(parse_color(" 1, 2 , 3 , 4 ").unwrap(), Rgba([1, 2, 3, 4]));
    }

    #[test]
    fn test_parse_color_invalid() {
        assert!(parse_color("1,2").is_err());
        assert!(parse_color("1,2,3,4,5").is_err());
        assert!(parse_color("a,b,c").is_err());
        assert!(parse_color("256,0,0").is_err());
        assert!(parse_color("").is_err());
    }

    #[test]
    fn test_parse_extensions() {
        let args = Args {
            extensions_str: "jpg,png,tiff".to_string(),
            ..Default::default()
        };
        assert_eq!(args.parse_extensions(), vec!["jpg", "png", "tiff"]);

        let args = Args {
            extensions_str: "JPG, PNG , BMP ".to_string(),
            ..Default::default()
        };
        assert_eq!(args.parse_extensions(), vec!["jpg", "png", "bmp"]);
    }

    #[test]
    fn test_default_position_is_bottom_right() {
        let args = Args::default();
        assert_eq!(args.position, Anchor::BottomRight);
    }
}

// Default implementation for tests
#[cfg(test)]
impl Default for Args {
    fn default() -> Self {
        Self {
            input_path: PathBuf::new(),
            font_size: 36,
            font_color: Rgba([255, 255, 255, 128]),
            position: Anchor::BottomRight,
            custom_font: None,
            date_format: "%Y-%m-%d".to_string(),
            unknown_text: "unknown date".to_string(),
            padding: 20,
            parallel: false,
            workers: None,
            extensions_str: "jpg,jpeg,png,tiff,bmp".to_string(),
            config_file: None,
            dry_run: false,
            verbose: false,
        }
    }
}
