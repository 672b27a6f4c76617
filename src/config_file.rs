use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::cli::{parse_color, Args};
use crate::watermark::position::Anchor;

/// JSON config file format. Every field is optional; values only fill in
/// arguments that were not given explicitly on the command line.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFileJson {
    pub font_size: Option<u32>,
    pub font_color: Option<String>,
    pub position: Option<String>,
    pub custom_font: Option<String>,
    pub date_format: Option<String>,
    pub unknown_text: Option<String>,
    pub padding: Option<u32>,
    pub parallel: Option<bool>,
    pub workers: Option<usize>,
    pub extensions: Option<String>,
}

impl Args {
    /// Load configuration from a JSON file and merge with command-line
    /// arguments. Command-line arguments take precedence over config file
    /// values.
    pub fn load_and_merge_config(&mut self) -> Result<()> {
        if let Some(config_path) = self.config_file.clone() {
            let contents = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

            let config: ConfigFileJson = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

            let cli_args: Vec<String> = std::env::args().collect();
            self.merge_from_config(config, &cli_args)?;

            if self.verbose {
                eprintln!("Loaded configuration from: {:?}", config_path);
            }
        }
        Ok(())
    }

    fn merge_from_config(&mut self, config: ConfigFileJson, cli_args: &[String]) -> Result<()> {
        // An argument counts as explicit when its flag appears on the
        // command line, either as "--flag value" or "--flag=value".
        let explicit = |flag: &str| {
            cli_args
                .iter()
                .any(|a| a == flag || a.starts_with(&format!("{}=", flag)))
        };

        if !explicit("--font-size") {
            if let Some(font_size) = config.font_size {
                self.font_size = font_size;
            }
        }

        if !explicit("--font-color") {
            if let Some(ref color) = config.font_color {
                self.font_color = parse_color(color).map_err(|e| anyhow::anyhow!(e))?;
            }
        }

        // The config-file position goes through the lenient parser: unknown
        // names silently become bottom-right.
        if !explicit("--position") {
            if let Some(ref position) = config.position {
                self.position = Anchor::from_name(position);
            }
        }

        if !explicit("--custom-font") {
            if let Some(ref custom_font) = config.custom_font {
                self.custom_font = Some(PathBuf::from(custom_font));
            }
        }

        if !explicit("--date-format") {
            if let Some(date_format) = config.date_format {
                self.date_format = date_format;
            }
        }

        if !explicit("--unknown-text") {
            if let Some(unknown_text) = config.unknown_text {
                self.unknown_text = unknown_text;
            }
        }

        if !explicit("--padding") {
            if let Some(padding) = config.padding {
                self.padding = padding;
            }
        }

        if !explicit("--parallel") {
            if let Some(parallel) = config.parallel {
                self.parallel = parallel;
            }
        }

        if !explicit("--workers") {
            if let Some(workers) = config.workers {
                self.workers = Some(workers);
            }
        }

        if !explicit("--extensions") {
            if let Some(extensions) = config.extensions {
                self.extensions_str = extensions;
            }
        }

        Ok(())
    }
}
