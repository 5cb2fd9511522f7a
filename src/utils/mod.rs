// Utility functions
// Helper functions for common operations

pub mod data_state;
pub mod format;
pub mod time;

pub use data_state::DataState;
pub use format::{format_count, format_duration, format_file_size, mask_email};
pub use time::{format_datetime, format_relative_time};
