// Library exports for reuse by integration tests and other applications
pub mod cli;
pub mod config_file;
pub mod utils;
pub mod watermark;

// Re-export commonly used types
pub use cli::Args;
pub use watermark::batch::BatchSummary;
pub use watermark::position::Anchor;
pub use watermark::{ImageTask, ProcessingConfig, WatermarkEngine};
