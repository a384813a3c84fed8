//! Per-seat match summaries

use super::aggregate::aggregate_actions;
use super::events::build_events;
use super::weight::{rollup_actions, ActionRollup};
use crate::config::SummaryConfig;
use crate::replay::{PlayerRecord, Replay};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Race {
    Protoss,
    Zerg,
    Terran,
}

impl Race {
    /// Column order used by the vectorizer
    pub const ALL: [Race; 3] = [Race::Protoss, Race::Zerg, Race::Terran];

    pub fn as_str(&self) -> &'static str {
        match self {
            Race::Protoss => "protoss",
            Race::Zerg => "zerg",
            Race::Terran => "terran",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Race {
    type Err = Skip;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "protoss" => Ok(Race::Protoss),
            "zerg" => Ok(Race::Zerg),
            "terran" => Ok(Race::Terran),
            _ => Err(Skip::UnknownRace(s.to_string())),
        }
    }
}

/// Why a match produced no summaries
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Skip {
    #[error("not a 1v1 match ({game_type} with {players} players)")]
    NotOneVsOne { game_type: String, players: usize },

    #[error("invalid race: {0}")]
    UnknownRace(String),

    #[error("player {0} missing from replay")]
    MissingPlayer(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub name: String,
    pub race: Race,
    pub winner: bool,
}

impl PlayerIdentity {
    fn from_record(record: &PlayerRecord) -> Result<Self, Skip> {
        Ok(Self {
            name: record.name.clone(),
            race: record.play_race.parse()?,
            winner: record.is_winner(),
        })
    }
}

/// One seat's view of one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// `<sha256 of the match>_<seat>`
    pub replay_id: String,
    pub start_time: DateTime<Utc>,
    pub real_duration_seconds: u64,
    #[serde(rename = "self")]
    pub self_player: PlayerIdentity,
    pub opponent: PlayerIdentity,
    /// Sorted by action name
    pub actions: Vec<ActionRollup>,
}

impl MatchSummary {
    pub fn action(&self, name: &str) -> Option<&ActionRollup> {
        self.actions.iter().find(|action| action.name == name)
    }
}

/// Content hash identifying a physical match
///
/// Built from the release string, the match description and every
/// player's identity in team order, so both seats hash identically.
pub fn build_replay_id(replay: &Replay) -> String {
    let mut hasher = Sha256::new();
    hasher.update(replay.release_string.as_bytes());
    hasher.update(
        format!(
            "{} on {} at {}",
            replay.game_type,
            replay.map_name,
            replay.start_time.format("%Y-%m-%d %H:%M:%S")
        )
        .as_bytes(),
    );
    for player in replay.players() {
        hasher.update(player.to_string().as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// Suffix a base id with the seat it was summarized from
pub fn seat_replay_id(base_id: &str, seat: usize) -> String {
    format!("{}_{}", base_id, seat)
}

/// Split `<hash>_<seat>` back into its parts
pub fn parse_seat_replay_id(replay_id: &str) -> Option<(&str, usize)> {
    let (base, seat) = replay_id.rsplit_once('_')?;
    let seat: usize = seat.parse().ok()?;
    if base.is_empty() || seat > 1 {
        return None;
    }
    Some((base, seat))
}

/// Opening actions of one player
pub fn summarize_actions(player: &PlayerRecord, config: &SummaryConfig) -> Vec<ActionRollup> {
    let actions = aggregate_actions(
        build_events(&player.events, config),
        config.initial_window_seconds,
    );
    rollup_actions(actions.values(), config.half_life_seconds)
}

/// Summarize a match from the point of view of `seat` (0 or 1)
pub fn summarize_seat(
    replay: &Replay,
    seat: usize,
    replay_id: String,
    config: &SummaryConfig,
) -> Result<MatchSummary, Skip> {
    let self_pid = seat as u32 + 1;
    let opponent_pid = (1 - seat.min(1)) as u32 + 1;
    let self_record = replay.player(self_pid).ok_or(Skip::MissingPlayer(self_pid))?;
    let opponent_record = replay
        .player(opponent_pid)
        .ok_or(Skip::MissingPlayer(opponent_pid))?;

    let self_player = PlayerIdentity::from_record(self_record)?;
    let opponent = PlayerIdentity::from_record(opponent_record)?;

    Ok(MatchSummary {
        replay_id,
        start_time: replay.start_time,
        real_duration_seconds: replay.real_length_seconds,
        self_player,
        opponent,
        actions: summarize_actions(self_record, config),
    })
}

/// Both seat summaries of a 1v1 match, or the reason there are none
pub fn summarize_match(replay: &Replay, config: &SummaryConfig) -> Result<Vec<MatchSummary>, Skip> {
    if !replay.is_one_vs_one() {
        return Err(Skip::NotOneVsOne {
            game_type: replay.game_type.clone(),
            players: replay.player_count(),
        });
    }

    let base_id = build_replay_id(replay);
    (0..2)
        .map(|seat| summarize_seat(replay, seat, seat_replay_id(&base_id, seat), config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::{ReplayEvent, Team};
    use chrono::TimeZone;

    fn player(pid: u32, name: &str, race: &str, result: &str, events: Vec<ReplayEvent>) -> PlayerRecord {
        PlayerRecord {
            pid,
            name: name.to_string(),
            play_race: race.to_string(),
            result: Some(result.to_string()),
            events,
        }
    }

    fn replay(players: Vec<PlayerRecord>) -> Replay {
        Replay {
            release_string: "4.10.1.75800".to_string(),
            game_type: "1v1".to_string(),
            map_name: "Cyber Forest LE".to_string(),
            start_time: Utc.with_ymd_and_hms(2019, 8, 1, 12, 0, 0).unwrap(),
            real_length_seconds: 734,
            teams: players
                .into_iter()
                .enumerate()
                .map(|(i, p)| Team {
                    number: i as u32 + 1,
                    players: vec![p],
                })
                .collect(),
        }
    }

    fn marine_match() -> Replay {
        replay(vec![
            player(
                1,
                "Maru",
                "Terran",
                "Win",
                vec![
                    ReplayEvent::command(10, "TrainMarine"),
                    ReplayEvent::command(10, "TrainMarine"),
                    ReplayEvent::command(130, "TrainMarine"),
                    ReplayEvent::command(500, "BuildPylon"),
                    ReplayEvent::command(60, "BuildCreepTumor"),
                ],
            ),
            player(2, "Serral", "zerg", "Loss", vec![ReplayEvent::command(20, "TrainDrone")]),
        ])
    }

    #[test]
    fn test_race_parsing_is_case_insensitive() {
        assert_eq!("PROTOSS".parse::<Race>().unwrap(), Race::Protoss);
        assert_eq!("Zerg".parse::<Race>().unwrap(), Race::Zerg);
        assert_eq!(
            "Random".parse::<Race>(),
            Err(Skip::UnknownRace("Random".to_string()))
        );
    }

    #[test]
    fn test_summarize_match_yields_one_summary_per_seat() {
        let config = SummaryConfig::default();
        let summaries = summarize_match(&marine_match(), &config).unwrap();
        assert_eq!(summaries.len(), 2);

        let maru = &summaries[0];
        assert!(maru.replay_id.ends_with("_0"));
        assert_eq!(maru.self_player.name, "Maru");
        assert_eq!(maru.self_player.race, Race::Terran);
        assert!(maru.self_player.winner);
        assert_eq!(maru.opponent.race, Race::Zerg);
        assert!(!maru.opponent.winner);
        assert_eq!(maru.real_duration_seconds, 734);

        assert_eq!(maru.actions.len(), 1);
        let marine = maru.action("Marine").unwrap();
        assert_eq!(marine.first_event_time, 10);
        assert!((marine.weight - 2.5).abs() < 1e-12);
        assert!(maru.action("Pylon").is_none());
        assert!(maru.action("CreepTumor").is_none());

        let serral = &summaries[1];
        assert!(serral.replay_id.ends_with("_1"));
        assert_eq!(serral.self_player.name, "Serral");
        assert_eq!(serral.actions[0].name, "Drone");
    }

    #[test]
    fn test_seats_share_base_id() {
        let config = SummaryConfig::default();
        let summaries = summarize_match(&marine_match(), &config).unwrap();
        let base_0 = parse_seat_replay_id(&summaries[0].replay_id).unwrap().0;
        let base_1 = parse_seat_replay_id(&summaries[1].replay_id).unwrap().0;
        assert_eq!(base_0, base_1);
        assert_eq!(base_0, build_replay_id(&marine_match()));
        assert_eq!(base_0.len(), 64);
    }

    #[test]
    fn test_replay_id_ignores_event_streams() {
        let mut other = marine_match();
        other.teams[0].players[0].events.clear();
        assert_eq!(build_replay_id(&other), build_replay_id(&marine_match()));

        other.map_name = "Triton LE".to_string();
        assert_ne!(build_replay_id(&other), build_replay_id(&marine_match()));
    }

    #[test]
    fn test_three_players_yield_nothing() {
        let mut three = marine_match();
        three.teams.push(Team {
            number: 3,
            players: vec![player(3, "Third", "Protoss", "Loss", vec![])],
        });
        let skip = summarize_match(&three, &SummaryConfig::default()).unwrap_err();
        assert!(matches!(skip, Skip::NotOneVsOne { players: 3, .. }));
    }

    #[test]
    fn test_non_1v1_game_type_is_skipped() {
        let mut team_game = marine_match();
        team_game.game_type = "2v2".to_string();
        assert!(summarize_match(&team_game, &SummaryConfig::default()).is_err());
    }

    #[test]
    fn test_unknown_race_skips_whole_match() {
        let mut random = marine_match();
        random.teams[1].players[0].play_race = "Random".to_string();
        let skip = summarize_match(&random, &SummaryConfig::default()).unwrap_err();
        assert_eq!(skip, Skip::UnknownRace("Random".to_string()));
    }

    #[test]
    fn test_parse_seat_replay_id() {
        assert_eq!(parse_seat_replay_id("abc_1"), Some(("abc", 1)));
        assert_eq!(parse_seat_replay_id("abc_2"), None);
        assert_eq!(parse_seat_replay_id("abc"), None);
        assert_eq!(parse_seat_replay_id("_0"), None);
    }

    #[test]
    fn test_summary_serializes_self_field() {
        let summaries = summarize_match(&marine_match(), &SummaryConfig::default()).unwrap();
        let value = serde_json::to_value(&summaries[0]).unwrap();
        assert_eq!(value["self"]["race"], "terran");
        let back: MatchSummary = serde_json::from_value(value).unwrap();
        assert_eq!(back, summaries[0]);
    }
}
