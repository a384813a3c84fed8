//! Replay input collaborator
//!
//! Parsing the binary replay format is someone else's job; this module
//! describes the data the summarizer needs and reads the dumps a parser
//! produces.

pub mod loader;
pub mod sources;
pub mod types;

pub use loader::{JsonReplayLoader, ReplayLoader};
pub use sources::{directory_pattern, is_replay_file, replay_files};
pub use types::{EventKind, PlayerRecord, Replay, ReplayEvent, Team, ONE_VS_ONE};
