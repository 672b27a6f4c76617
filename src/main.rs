use clap::Parser;
use console::style;
use std::process::ExitCode;
use std::time::Instant;

mod cli;
mod config_file;
mod utils;
mod watermark;

use cli::Args;
use utils::{create_progress_bar, error_println, format_duration};
use watermark::batch::BatchSummary;
use watermark::{ProcessingConfig, WatermarkEngine};

fn main() -> ExitCode {
    let start_time = Instant::now();
    let mut args = Args::parse();

    // Print banner
    println!("{}", style("photomark - EXIF date watermark tool").bold().blue());
    println!("{}", style("Stamps capture dates onto photos").dim());
    println!();

    // Merge optional config file beneath explicit CLI arguments
    if let Err(err) = args.load_and_merge_config() {
        error_println(&format!("{:#}", err));
        return ExitCode::FAILURE;
    }

    // Validate and assemble the immutable processing configuration
    let config = match ProcessingConfig::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            error_println(&format!("{:#}", err));
            return ExitCode::FAILURE;
        }
    };

    if config.verbose {
        println!("{}", style("Configuration:").bold());
        println!("  Font size: {}", config.font_size);
        println!(
            "  Font color: {},{},{},{}",
            config.font_color[0], config.font_color[1], config.font_color[2], config.font_color[3]
        );
        println!("  Position: {}", config.anchor.name());
        println!("  Padding: {}", config.padding);
        println!("  Date format: {}", config.date_format);
        println!("  Fallback text: {}", config.fallback_text);
        println!("  Extensions: {:?}", config.extensions);
        if let Some(ref font) = config.custom_font {
            println!("  Custom font: {}", font.display());
        }
        println!(
            "  Parallel: {}",
            if config.parallel {
                format!("enabled ({} workers)", config.workers)
            } else {
                "disabled".to_string()
            }
        );
        if config.dry_run {
            println!("  Dry run mode: enabled (simulation only - no files will be created)");
        }
        println!();
    }

    let dry_run = config.dry_run;
    let engine = WatermarkEngine::new(config);

    let summary = if args.input_path.is_file() {
        engine.process_single_file(&args.input_path)
    } else {
        let progress = create_progress_bar(0);
        progress.set_message("Stamping photos");
        let result = engine.process_directory(&args.input_path, &progress);
        progress.finish_and_clear();
        result
    };

    let summary = match summary {
        Ok(summary) => summary,
        Err(err) => {
            error_println(&format!("{:#}", err));
            return ExitCode::FAILURE;
        }
    };

    print_summary(&summary, dry_run, start_time);

    if summary.succeeded > 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_summary(summary: &BatchSummary, dry_run: bool, start_time: Instant) {
    println!();
    let header = if dry_run {
        style("Dry Run Results Summary:").bold().cyan()
    } else {
        style("Results Summary:").bold().green()
    };
    println!("{}", header);

    let processed_label = if dry_run {
        "Would be processed"
    } else {
        "Successfully processed"
    };
    println!("  Total files: {}", style(summary.total).bold());
    println!(
        "  {}: {}",
        processed_label,
        style(summary.succeeded).bold().green()
    );

    if summary.failed() > 0 {
        println!("  Failed: {}", style(summary.failed()).bold().red());

        println!();
        println!("{}", style("Failed files:").bold().red());
        let (shown, remaining) = summary.capped_failures();
        for (i, path) in shown.iter().enumerate() {
            println!(
                "  {}: {}",
                style(format!("#{}", i + 1)).dim(),
                style(path.display()).red()
            );
        }
        if remaining > 0 {
            println!("  {}", style(format!("... and {} more", remaining)).dim());
        }
    }

    println!();
    println!(
        "  Total processing time: {}",
        style(format_duration(start_time.elapsed())).bold()
    );
}
