//! Pure summarization logic
//!
//! Nothing in here performs I/O. Every function takes the replay data and
//! the configuration it needs as arguments, so matches can be summarized
//! independently on any number of workers.
//!
//! Pipeline per seat: [`events`] selects build commands, [`aggregate`]
//! groups them by action inside the opening window, [`weight`] rolls each
//! action up, and [`summary`] assembles the seat's [`MatchSummary`].
//! [`vectorize`] turns a collection of summaries into feature rows.

pub mod aggregate;
pub mod events;
pub mod summary;
pub mod vectorize;
pub mod weight;

pub use aggregate::{aggregate_actions, ActionOccurrences};
pub use events::{build_events, canonical_action_name, BuildEvent, BuildEvents};
pub use summary::{
    build_replay_id, parse_seat_replay_id, seat_replay_id, summarize_match, summarize_seat,
    MatchSummary, PlayerIdentity, Race, Skip,
};
pub use vectorize::{start_score, vectorize, Cell, FeatureFrame};
pub use weight::{decayed_weight, rollup, rollup_actions, ActionRollup};
