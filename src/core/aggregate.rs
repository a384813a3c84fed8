//! Grouping of build events by action within the opening window

use super::events::BuildEvent;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Every time one admitted action was performed
///
/// Always holds at least one timestamp: entries are only created from a
/// first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOccurrences {
    name: String,
    timestamps: Vec<u32>,
}

impl ActionOccurrences {
    pub fn new(name: impl Into<String>, first: u32) -> Self {
        Self {
            name: name.into(),
            timestamps: vec![first],
        }
    }

    pub fn push(&mut self, second: u32) {
        self.timestamps.push(second);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timestamps(&self) -> &[u32] {
        &self.timestamps
    }

    /// Timestamps in ascending order
    pub fn sorted_timestamps(&self) -> Vec<u32> {
        let mut times = self.timestamps.clone();
        times.sort_unstable();
        times
    }
}

/// Admit actions first seen at or before `initial_window_seconds`
///
/// Admission is decided once, on the first occurrence of a name. Later
/// occurrences of an admitted name are kept no matter how late they are;
/// a name first seen after the window is ignored for the rest of the
/// stream. Events are put in time order first if they are not already.
pub fn aggregate_actions<I>(events: I, initial_window_seconds: u32) -> HashMap<String, ActionOccurrences>
where
    I: IntoIterator<Item = BuildEvent>,
{
    let mut events: Vec<BuildEvent> = events.into_iter().collect();
    if !is_time_ordered(&events) {
        events.sort_by_key(|event| event.second);
    }

    // Once sorted, a name whose first occurrence missed the window can
    // never be admitted by a later one.
    let mut actions: HashMap<String, ActionOccurrences> = HashMap::new();
    for event in events {
        if let Some(occurrences) = actions.get_mut(&event.name) {
            occurrences.push(event.second);
        } else if event.second <= initial_window_seconds {
            actions.insert(
                event.name.clone(),
                ActionOccurrences::new(event.name, event.second),
            );
        }
    }

    actions
}

fn is_time_ordered(events: &[BuildEvent]) -> bool {
    events.windows(2).all(|pair| pair[0].second <= pair[1].second)
}
