pub mod batch;
pub mod exif_date;
pub mod position;
pub mod render;

use anyhow::{Context, Result};
use image::Rgba;
use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::utils::{has_valid_extension, verbose_println, warn_println};
use batch::BatchSummary;
use position::{calculate_position, Anchor};
use render::FontSource;

/// Directory-name suffix for generated output directories.
const OUTPUT_DIR_SUFFIX: &str = "_watermark";

/// Immutable processing configuration, assembled once per run.
#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    pub font_size: u32,
    pub custom_font: Option<PathBuf>,
    pub font_color: Rgba<u8>,
    pub anchor: Anchor,
    pub padding: u32,
    pub date_format: String,
    pub fallback_text: String,
    pub extensions: Vec<String>,
    pub parallel: bool,
    pub workers: usize,
    pub verbose: bool,
    pub dry_run: bool,
}

impl ProcessingConfig {
    /// Validate-then-construct factory over the parsed CLI arguments.
    pub fn from_args(args: &crate::cli::Args) -> Result<Self> {
        crate::utils::validate_inputs(args)?;

        Ok(Self {
            font_size: args.font_size,
            custom_font: args.custom_font.clone(),
            font_color: args.font_color,
            anchor: args.position,
            padding: args.padding,
            date_format: args.date_format.clone(),
            fallback_text: args.unknown_text.clone(),
            extensions: args.parse_extensions(),
            parallel: args.parallel,
            workers: args.workers.unwrap_or_else(num_cpus::get),
            verbose: args.verbose,
            dry_run: args.dry_run,
        })
    }
}

/// One file's unit of work: input location paired with the computed output
/// location. Created during enumeration, consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTask {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Output directory for a directory batch: `<name>_watermark` next to the
/// input directory.
pub fn output_dir_for_directory(input_dir: &Path) -> PathBuf {
    let name = input_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("images");
    input_dir
        .parent()
        .unwrap_or(input_dir)
        .join(format!("{}{}", name, OUTPUT_DIR_SUFFIX))
}

/// Output directory for a single file: `<parentName>_watermark` inside the
/// file's parent directory.
pub fn output_dir_for_file(input_file: &Path) -> PathBuf {
    let parent = input_file.parent().unwrap_or_else(|| Path::new("."));
    let name = parent
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("images");
    parent.join(format!("{}{}", name, OUTPUT_DIR_SUFFIX))
}

pub struct WatermarkEngine {
    config: ProcessingConfig,
    font: FontSource,
}

impl WatermarkEngine {
    pub fn new(config: ProcessingConfig) -> Self {
        let font = FontSource::new(config.custom_font.clone());
        Self { config, font }
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Enumerate eligible files directly inside `input_dir` (non-recursive)
    /// and pair each with its output location. Sorted for a deterministic
    /// processing order.
    pub fn discover_tasks(&self, input_dir: &Path, output_dir: &Path) -> Result<Vec<ImageTask>> {
        let mut tasks = Vec::new();

        let walker = WalkDir::new(input_dir)
            .follow_links(false)
            .min_depth(1)
            .max_depth(1);

        for entry in walker {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && has_valid_extension(path, &self.config.extensions) {
                let file_name = entry.file_name();
                tasks.push(ImageTask {
                    input: path.to_path_buf(),
                    output: output_dir.join(file_name),
                });
            }
        }

        tasks.sort_by(|a, b| a.input.cmp(&b.input));

        verbose_println(
            self.config.verbose,
            &format!("Found {} eligible files", tasks.len()),
        );
        Ok(tasks)
    }

    /// Run the full extract -> render -> persist pipeline for one task.
    pub fn process_file(&self, task: &ImageTask) -> Result<()> {
        verbose_println(
            self.config.verbose,
            &format!("Processing: {}", task.input.display()),
        );

        let text = match exif_date::extract_capture_date(&task.input, &self.config.date_format) {
            Some(date) => date,
            None => {
                warn_println(&format!(
                    "No capture date in {}, using fallback text",
                    task.input.display()
                ));
                self.config.fallback_text.clone()
            }
        };

        let img = image::open(&task.input)
            .with_context(|| format!("Failed to open image: {}", task.input.display()))?;

        let font = self.font.get()?;
        let (text_width, text_height) = render::measure_text(font, self.config.font_size, &text);
        let coord = calculate_position(
            self.config.anchor,
            img.width(),
            img.height(),
            text_width,
            text_height,
            self.config.padding,
        );

        let stamped = render::apply_watermark(
            &img,
            &text,
            font,
            self.config.font_size,
            self.config.font_color,
            coord,
        );

        if self.config.dry_run {
            verbose_println(
                self.config.verbose,
                &format!("Dry run: would save {}", task.output.display()),
            );
            return Ok(());
        }

        if let Some(parent) = task.output.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
        stamped
            .save(&task.output)
            .with_context(|| format!("Failed to save image: {}", task.output.display()))?;

        verbose_println(
            self.config.verbose,
            &format!("Saved: {}", task.output.display()),
        );
        Ok(())
    }

    /// Process every eligible file in `input_dir`.
    ///
    /// The output directory is created up front even when no file turns out
    /// to be eligible. Per-file failures are recorded in the summary and
    /// never abort sibling tasks.
    pub fn process_directory(
        &self,
        input_dir: &Path,
        progress: &ProgressBar,
    ) -> Result<BatchSummary> {
        let output_dir = output_dir_for_directory(input_dir);
        if !self.config.dry_run {
            std::fs::create_dir_all(&output_dir).with_context(|| {
                format!("Failed to create output directory: {}", output_dir.display())
            })?;
        }

        let tasks = self.discover_tasks(input_dir, &output_dir)?;
        progress.set_length(tasks.len() as u64);

        let results = self.run_tasks(&tasks, progress)?;
        Ok(BatchSummary::from_results(results))
    }

    /// Process a single input file.
    pub fn process_single_file(&self, input_file: &Path) -> Result<BatchSummary> {
        let output_dir = output_dir_for_file(input_file);
        let file_name = input_file
            .file_name()
            .context("Input file has no file name")?;

        let task = ImageTask {
            input: input_file.to_path_buf(),
            output: output_dir.join(file_name),
        };

        let mut summary = BatchSummary::new();
        match self.process_file(&task) {
            Ok(()) => summary.record_success(),
            Err(err) => {
                crate::utils::error_println(&format!("{}: {:#}", task.input.display(), err));
                summary.record_failure(task.input);
            }
        }
        Ok(summary)
    }

    /// Execute tasks through the worker pool when concurrency is on and
    /// there is more than one task; strictly sequentially otherwise.
    ///
    /// Tasks share nothing but the fan-in of the parallel iterator, so
    /// completion order is not guaranteed to match submission order.
    fn run_tasks(
        &self,
        tasks: &[ImageTask],
        progress: &ProgressBar,
    ) -> Result<Vec<(PathBuf, Result<()>)>> {
        let run_one = |task: &ImageTask| {
            let result = self.process_file(task);
            if let Err(ref err) = result {
                crate::utils::error_println(&format!("{}: {:#}", task.input.display(), err));
            }
            progress.inc(1);
            (task.input.clone(), result)
        };

        if self.config.parallel && tasks.len() > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.workers)
                .build()
                .context("Failed to initialize thread pool")?;

            Ok(pool.install(|| tasks.par_iter().map(run_one).collect()))
        } else {
            Ok(tasks.iter().map(run_one).collect())
        }
    }
}
