/// Command-line interface and batch processing
pub mod cli;
/// Navigation constants and output settings
pub mod configuration;
/// Error types and result alias
pub mod error;
/// Raster loading and PNG export
pub mod image;
/// Progress display for batch runs
pub mod progress;
/// Recorded paths and their persistence
pub mod recording;
/// Solve capture and GIF export
pub mod visualization;
