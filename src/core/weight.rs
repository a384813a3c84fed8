//! Time-decayed commitment weight of an action

use super::aggregate::ActionOccurrences;
use serde::{Deserialize, Serialize};

/// When an action was first performed and how hard the player committed to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRollup {
    pub name: String,
    pub first_event_time: u32,
    pub weight: f64,
}

/// Sum of `0.5 ^ ((t - t0) / half_life)` over every timestamp
///
/// `t0` is the earliest timestamp and contributes exactly 1.0; input order
/// does not matter. An empty slice weighs nothing.
pub fn decayed_weight(times: &[u32], half_life_seconds: f64) -> f64 {
    let Some(&start) = times.iter().min() else {
        return 0.0;
    };
    times
        .iter()
        .map(|&time| 0.5_f64.powf(f64::from(time - start) / half_life_seconds))
        .sum()
}

pub fn rollup(action: &ActionOccurrences, half_life_seconds: f64) -> ActionRollup {
    let times = action.sorted_timestamps();
    debug_assert!(!times.is_empty(), "admitted action without occurrences");
    ActionRollup {
        name: action.name().to_string(),
        first_event_time: times.first().copied().unwrap_or_default(),
        weight: decayed_weight(&times, half_life_seconds),
    }
}

/// Roll up every action, sorted by name
pub fn rollup_actions<'a, I>(actions: I, half_life_seconds: f64) -> Vec<ActionRollup>
where
    I: IntoIterator<Item = &'a ActionOccurrences>,
{
    let mut rollups: Vec<ActionRollup> = actions
        .into_iter()
        .map(|action| rollup(action, half_life_seconds))
        .collect();
    rollups.sort_by(|a, b| a.name.cmp(&b.name));
    rollups
}
