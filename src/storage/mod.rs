//! Persistence of computed summaries

pub mod store;

pub use store::{MergeReport, SummaryStore};
