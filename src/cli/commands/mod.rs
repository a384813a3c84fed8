//! Command implementation modules
//!
//! Each command is implemented as a separate module.

pub mod find;
pub mod summarize;
pub mod vectorize;

pub use find::{run_find_command, FindParams};
pub use summarize::{run_summarize_command, SummarizeParams};
pub use vectorize::run_vectorize_command;
