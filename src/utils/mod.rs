//! Utility functions and helpers for dlna-cast

pub mod formatting;

pub use formatting::{format_progress_line, format_renderer_description};
