use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

use crate::cli::Args;

/// Create a styled progress bar
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.blue} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg} ({eta})",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb
}

/// Format duration in a human-readable way
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 60 {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{}m {}s", mins, secs)
    } else if total_secs > 0 {
        format!("{}.{:03}s", total_secs, millis)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

/// Validate command line arguments before any file is touched
pub fn validate_inputs(args: &Args) -> Result<()> {
    if !args.input_path.exists() {
        return Err(anyhow::anyhow!(
            "Input path does not exist: {}",
            args.input_path.display()
        ));
    }
    if !args.input_path.is_dir() && !args.input_path.is_file() {
        return Err(anyhow::anyhow!(
            "Input path is neither a file nor a directory: {}",
            args.input_path.display()
        ));
    }

    // Validate extensions
    let extensions = args.parse_extensions();
    if extensions.is_empty() {
        return Err(anyhow::anyhow!("No valid extensions specified"));
    }

    // Validate font size
    if args.font_size == 0 || args.font_size > 200 {
        return Err(anyhow::anyhow!(
            "Font size must be between 1 and 200 pixels, got: {}",
            args.font_size
        ));
    }

    // Validate worker count
    if let Some(workers) = args.workers {
        if workers == 0 || workers > 32 {
            return Err(anyhow::anyhow!(
                "Worker count must be between 1 and 32, got: {}",
                workers
            ));
        }
    }

    // A custom font must at least exist; parse failures later fall through
    // the font chain instead.
    if let Some(ref font_path) = args.custom_font {
        if !font_path.is_file() {
            return Err(anyhow::anyhow!(
                "Custom font file does not exist: {}",
                font_path.display()
            ));
        }
    }

    validate_date_format(&args.date_format)?;

    Ok(())
}

/// Validate a strftime-style template by trial-formatting the current time.
pub fn validate_date_format(template: &str) -> Result<()> {
    use std::fmt::Write;

    let mut rendered = String::new();
    write!(rendered, "{}", chrono::Local::now().format(template)).map_err(|_| {
        anyhow::anyhow!(
            "Invalid date format template: '{}'. Use strftime specifiers like %Y-%m-%d",
            template
        )
    })?;
    Ok(())
}

/// Get file extension in lowercase
pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Check if a file has one of the specified extensions
pub fn has_valid_extension(path: &Path, extensions: &[String]) -> bool {
    if let Some(ext) = get_file_extension(path) {
        extensions.contains(&ext)
    } else {
        false
    }
}

/// Print verbose information if verbose mode is enabled
pub fn verbose_println(verbose: bool, message: &str) {
    if verbose {
        println!("{} {}", style("[VERBOSE]").dim(), message);
    }
}

/// Print warning message
pub fn warn_println(message: &str) {
    println!("{} {}", style("[WARNING]").yellow().bold(), message);
}

/// Print error message
pub fn error_println(message: &str) {
    eprintln!("{} {}", style("[ERROR]").red().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_secs(1)), "1.000s");
        assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
    }

    #[test]
    fn test_get_file_extension() {
        assert_eq!(
            get_file_extension(Path::new("photo.JPG")),
            Some("jpg".to_string())
        );
        assert_eq!(get_file_extension(Path::new("no_extension")), None);
    }

    #[test]
    fn test_has_valid_extension() {
        let extensions = vec!["jpg".to_string(), "png".to_string()];
        assert!(has_valid_extension(Path::new("a.jpg"), &extensions));
        assert!(has_valid_extension(Path::new("a.JPG"), &extensions));
        assert!(!has_valid_extension(Path::new("a.gif"), &extensions));
        assert!(!has_valid_extension(Path::new("a"), &extensions));
    }

    #[test]
    fn test_validate_date_format() {
        assert!(validate_date_format("%Y-%m-%d").is_ok());
        assert!(validate_date_format("%d/%m/%Y %H:%M").is_ok());
        assert!(validate_date_format("plain text").is_ok());

        assert!(validate_date_format("%Q").is_err());
    }

    #[test]
    fn test_validate_inputs_rejects_missing_path() {
        let args = Args {
            input_path: "/nonexistent/path".into(),
            ..Default::default()
        };
        assert!(validate_inputs(&args).is_err());
    }

    #[test]
    fn test_validate_inputs_rejects_bad_font_size() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            input_path: dir.path().to_path_buf(),
            font_size: 0,
            ..Default::default()
        };
        assert!(validate_inputs(&args).is_err());

        let args = Args {
            input_path: dir.path().to_path_buf(),
            font_size: 500,
            ..Default::default()
        };
        assert!(validate_inputs(&args).is_err());
    }

    #[test]
    fn test_validate_inputs_rejects_missing_custom_font() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            input_path: dir.path().to_path_buf(),
            custom_font: Some("/nonexistent/font.ttf".into()),
            ..Default::default()
        };
        assert!(validate_inputs(&args).is_err());
    }

    #[test]
    fn test_validate_inputs_accepts_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            input_path: dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(validate_inputs(&args).is_ok());
    }
}
