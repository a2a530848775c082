//! Presentation layer for translation-comparator
//!
//! This crate contains CLI definitions, the comparison board, output
//! formatters and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::board::{ComparisonBoard, Slot, SlotState};
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
