//! Output formatting

pub mod board;
pub mod console;
