//! Selection of production and tech commands from a player's event stream

use crate::config::SummaryConfig;
use crate::replay::ReplayEvent;
use serde::{Deserialize, Serialize};

/// A production or tech command, reduced to its canonical action name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildEvent {
    pub second: u32,
    pub name: String,
}

impl BuildEvent {
    pub fn new(second: u32, name: impl Into<String>) -> Self {
        Self {
            second,
            name: name.into(),
        }
    }
}

/// Strip the category prefix from an ability name
///
/// Returns `None` when no prefix matches, when nothing is left after the
/// prefix, or when the remaining name is banned.
pub fn canonical_action_name<'a>(ability_name: &'a str, config: &SummaryConfig) -> Option<&'a str> {
    let name = config
        .action_prefixes
        .iter()
        .find_map(|prefix| ability_name.strip_prefix(prefix.as_str()))?;
    if name.is_empty() || config.banned_actions.contains(name) {
        return None;
    }
    Some(name)
}

/// Lazily filters an event stream down to [`BuildEvent`]s
///
/// Order of the underlying stream is preserved. The sequence is single
/// pass; call [`build_events`] again on the same events to restart it.
#[derive(Debug, Clone)]
pub struct BuildEvents<'a, I> {
    events: I,
    config: &'a SummaryConfig,
}

impl<'a, 'e, I> Iterator for BuildEvents<'a, I>
where
    I: Iterator<Item = &'e ReplayEvent>,
{
    type Item = BuildEvent;

    fn next(&mut self) -> Option<Self::Item> {
        for event in self.events.by_ref() {
            if !event.has_ability() {
                continue;
            }
            let Some(ability) = event.ability_name.as_deref() else {
                continue;
            };
            if let Some(name) = canonical_action_name(ability, self.config) {
                return Some(BuildEvent::new(event.second, name));
            }
        }
        None
    }
}

pub fn build_events<'a, 'e, I>(events: I, config: &'a SummaryConfig) -> BuildEvents<'a, I::IntoIter>
where
    I: IntoIterator<Item = &'e ReplayEvent>,
{
    BuildEvents {
        events: events.into_iter(),
        config,
    }
}
