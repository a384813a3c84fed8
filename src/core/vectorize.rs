//! Feature rows built from a collection of same-race summaries

use super::summary::{MatchSummary, Race};
use crate::config::VectorizeConfig;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::fmt;

pub const START_TIME_COL: &str = "game_start";
pub const DURATION_COL: &str = "game_duration";
pub const SELF_NAME_COL: &str = "self_name";
pub const OPPONENT_NAME_COL: &str = "opponent_name";

pub fn self_race_col(race: Race) -> String {
    format!("self_race_is_{}", race)
}

pub fn opponent_race_col(race: Race) -> String {
    format!("opponent_race_is_{}", race)
}

pub fn start_col(action: &str) -> String {
    format!("{}_start", action)
}

pub fn weight_col(action: &str) -> String {
    format!("{}_weight", action)
}

/// A single value in a feature row
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Timestamp(DateTime<Utc>),
    Integer(u64),
    Text(String),
    Float(f64),
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Integer(value) => Some(*value as f64),
            Cell::Float(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Timestamp(time) => write!(f, "{}", time.to_rfc3339()),
            Cell::Integer(value) => write!(f, "{}", value),
            Cell::Text(text) => f.write_str(text),
            Cell::Float(value) => write!(f, "{}", value),
        }
    }
}

/// Columns, replay-id index and one row per summary
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFrame {
    pub race: Option<Race>,
    pub columns: Vec<String>,
    pub index: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl FeatureFrame {
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Value of `column` in the row indexed by `replay_id`
    pub fn get(&self, replay_id: &str, column: &str) -> Option<&Cell> {
        let row = self.index.iter().position(|id| id == replay_id)?;
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Inverse start score: near zero for absent or late actions
pub fn start_score(first_event_time: Option<u32>, config: &VectorizeConfig) -> f64 {
    let raw = first_event_time
        .map(f64::from)
        .unwrap_or(config.infinity_seconds);
    config.infinity_seconds / raw.max(config.epsilon_seconds)
}

/// Every action name seen in any summary, sorted
pub fn action_names(summaries: &[MatchSummary]) -> BTreeSet<String> {
    summaries
        .iter()
        .flat_map(|summary| summary.actions.iter().map(|action| action.name.clone()))
        .collect()
}

pub fn feature_columns(actions: &BTreeSet<String>) -> Vec<String> {
    let mut columns = vec![
        START_TIME_COL.to_string(),
        DURATION_COL.to_string(),
        SELF_NAME_COL.to_string(),
    ];
    columns.extend(Race::ALL.iter().map(|&race| self_race_col(race)));
    columns.push(OPPONENT_NAME_COL.to_string());
    columns.extend(Race::ALL.iter().map(|&race| opponent_race_col(race)));
    for action in actions {
        columns.push(start_col(action));
        columns.push(weight_col(action));
    }
    columns
}

fn race_flags(race: Race) -> impl Iterator<Item = Cell> {
    Race::ALL
        .into_iter()
        .map(move |candidate| Cell::Float(if candidate == race { 1.0 } else { 0.0 }))
}

fn feature_row(summary: &MatchSummary, actions: &BTreeSet<String>, config: &VectorizeConfig) -> Vec<Cell> {
    let mut row = vec![
        Cell::Timestamp(summary.start_time),
        Cell::Integer(summary.real_duration_seconds),
        Cell::Text(summary.self_player.name.clone()),
    ];
    row.extend(race_flags(summary.self_player.race));
    row.push(Cell::Text(summary.opponent.name.clone()));
    row.extend(race_flags(summary.opponent.race));

    for name in actions {
        let action = summary.action(name);
        row.push(Cell::Float(start_score(
            action.map(|a| a.first_event_time),
            config,
        )));
        row.push(Cell::Float(action.map(|a| a.weight).unwrap_or(0.0)));
    }
    row
}

/// Build the feature frame for summaries that share a self race
pub fn vectorize(summaries: &[MatchSummary], config: &VectorizeConfig) -> Result<FeatureFrame> {
    let race = match summaries.first() {
        Some(first) => {
            let race = first.self_player.race;
            if let Some(other) = summaries.iter().find(|s| s.self_player.race != race) {
                return Err(Error::MixedRaces(
                    race.to_string(),
                    other.self_player.race.to_string(),
                ));
            }
            Some(race)
        }
        None => None,
    };

    let actions = action_names(summaries);
    Ok(FeatureFrame {
        race,
        columns: feature_columns(&actions),
        index: summaries.iter().map(|s| s.replay_id.clone()).collect(),
        rows: summaries
            .iter()
            .map(|summary| feature_row(summary, &actions, config))
            .collect(),
    })
}
