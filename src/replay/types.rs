//! Replay data as handed over by an external replay parser

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Game type string the parser reports for one-versus-one matches
pub const ONE_VS_ONE: &str = "1v1";

/// One recorded match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    /// Game client release, e.g. `4.10.1.75800`
    pub release_string: String,
    /// Match type as reported by the parser (`1v1`, `2v2`, `FFA`, ...)
    pub game_type: String,
    pub map_name: String,
    pub start_time: DateTime<Utc>,
    /// Real (not game-clock) match length
    pub real_length_seconds: u64,
    pub teams: Vec<Team>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub number: u32,
    pub players: Vec<PlayerRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// 1-based player id within the match
    pub pid: u32,
    pub name: String,
    /// Race as chosen in the lobby, free-form
    pub play_race: String,
    /// `Win`, `Loss`, `Tie` or unknown
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub events: Vec<ReplayEvent>,
}

impl PlayerRecord {
    pub fn is_winner(&self) -> bool {
        self.result.as_deref() == Some("Win")
    }
}

/// Identity string used when hashing a match
impl fmt::Display for PlayerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {} - {} ({})", self.pid, self.name, self.play_race)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Command,
    Selection,
    Camera,
    #[serde(other)]
    Other,
}

/// A single entry in a player's event stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayEvent {
    pub kind: EventKind,
    /// Game second the event happened at
    pub second: u32,
    #[serde(default)]
    pub ability_name: Option<String>,
}

impl ReplayEvent {
    pub fn command(second: u32, ability_name: impl Into<String>) -> Self {
        Self {
            kind: EventKind::Command,
            second,
            ability_name: Some(ability_name.into()),
        }
    }

    /// A command carrying an ability name
    pub fn has_ability(&self) -> bool {
        self.kind == EventKind::Command && self.ability_name.is_some()
    }
}

impl Replay {
    /// Players in team order, then in the order the team lists them
    pub fn players(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.teams.iter().flat_map(|team| team.players.iter())
    }

    /// Look a player up by 1-based player id
    pub fn player(&self, pid: u32) -> Option<&PlayerRecord> {
        self.players().find(|player| player.pid == pid)
    }

    pub fn player_count(&self) -> usize {
        self.teams.iter().map(|team| team.players.len()).sum()
    }

    /// Exactly two participants in a match reported as one-versus-one
    pub fn is_one_vs_one(&self) -> bool {
        self.game_type == ONE_VS_ONE && self.player_count() == 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_event_kinds_deserialize_as_other() {
        let event: ReplayEvent =
            serde_json::from_value(json!({"kind": "player_leave", "second": 90})).unwrap();
        assert_eq!(event.kind, EventKind::Other);
        assert!(!event.has_ability());
    }

    #[test]
    fn test_command_without_ability_has_no_ability() {
        let event: ReplayEvent =
            serde_json::from_value(json!({"kind": "command", "second": 3})).unwrap();
        assert!(!event.has_ability());
        assert!(ReplayEvent::command(3, "TrainProbe").has_ability());
    }

    #[test]
    fn test_player_identity_string() {
        let player = PlayerRecord {
            pid: 2,
            name: "Serral".to_string(),
            play_race: "Zerg".to_string(),
            result: Some("Win".to_string()),
            events: vec![],
        };
        assert_eq!(player.to_string(), "Player 2 - Serral (Zerg)");
        assert!(player.is_winner());
    }
}
