//! Common test utilities and helpers

#![allow(dead_code)]

use anyhow::Result;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builder for a replay dump as an external parser would write it
pub struct ReplayFixture {
    map_name: String,
    game_type: String,
    start_time: String,
    players: Vec<Value>,
}

impl ReplayFixture {
    pub fn one_vs_one(map_name: &str) -> Self {
        Self {
            map_name: map_name.to_string(),
            game_type: "1v1".to_string(),
            start_time: "2019-08-01T12:00:00Z".to_string(),
            players: Vec::new(),
        }
    }

    pub fn game_type(mut self, game_type: &str) -> Self {
        self.game_type = game_type.to_string();
        self
    }

    /// Add a player; `commands` are `(second, ability name)` pairs
    pub fn player(mut self, name: &str, race: &str, result: &str, commands: &[(u32, &str)]) -> Self {
        let pid = self.players.len() + 1;
        let events: Vec<Value> = commands
            .iter()
            .map(|(second, ability)| {
                json!({"kind": "command", "second": second, "ability_name": ability})
            })
            .chain(std::iter::once(json!({"kind": "camera", "second": 1})))
            .collect();
        self.players.push(json!({
            "pid": pid,
            "name": name,
            "play_race": race,
            "result": result,
            "events": events,
        }));
        self
    }

    pub fn to_json(&self) -> Value {
        let teams: Vec<Value> = self
            .players
            .iter()
            .enumerate()
            .map(|(i, player)| json!({"number": i + 1, "players": [player]}))
            .collect();
        json!({
            "release_string": "4.10.1.75800",
            "game_type": self.game_type,
            "map_name": self.map_name,
            "start_time": self.start_time,
            "real_length_seconds": 812,
            "teams": teams,
        })
    }
}

/// Temporary data directory laid out as `raw/replays`, `interim`, `processed`
pub struct TestData {
    temp_dir: TempDir,
}

impl TestData {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        fs::create_dir_all(temp_dir.path().join("data").join("raw").join("replays"))?;
        Ok(Self { temp_dir })
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root().join("data")
    }

    pub fn add_replay(&self, file_name: &str, replay: &ReplayFixture) -> Result<PathBuf> {
        let path = self.data_dir().join("raw").join("replays").join(file_name);
        fs::write(&path, serde_json::to_string_pretty(&replay.to_json())?)?;
        Ok(path)
    }

    pub fn add_raw_file(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        let path = self.data_dir().join("raw").join("replays").join(file_name);
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn interim(&self, file_name: &str) -> PathBuf {
        self.data_dir().join("interim").join(file_name)
    }

    pub fn processed(&self, file_name: &str) -> PathBuf {
        self.data_dir().join("processed").join(file_name)
    }
}

/// A PvT and a ZvP match plus a 2v2 that must be ignored
pub fn standard_replays(data: &TestData) -> Result<()> {
    data.add_replay(
        "pvt.json",
        &ReplayFixture::one_vs_one("Acropolis LE")
            .player(
                "Stats",
                "Protoss",
                "Win",
                &[
                    (0, "TrainProbe"),
                    (12, "TrainProbe"),
                    (18, "BuildPylon"),
                    (40, "BuildGateway"),
                    (160, "BuildPylon"),
                    (500, "BuildRoboticsFacility"),
                ],
            )
            .player(
                "Maru",
                "Terran",
                "Loss",
                &[(10, "TrainMarine"), (10, "TrainMarine"), (130, "TrainMarine")],
            ),
    )?;
    data.add_replay(
        "zvp.json",
        &ReplayFixture::one_vs_one("Triton LE")
            .player(
                "Serral",
                "Zerg",
                "Win",
                &[(0, "TrainDrone"), (30, "BuildCreepTumor"), (45, "MorphToOverseer")],
            )
            .player("Zest", "protoss", "Loss", &[(20, "BuildPylon")]),
    )?;
    data.add_replay(
        "team.json",
        &ReplayFixture::one_vs_one("Team Map")
            .game_type("2v2")
            .player("A", "Zerg", "Win", &[])
            .player("B", "Zerg", "Win", &[])
            .player("C", "Terran", "Loss", &[])
            .player("D", "Terran", "Loss", &[]),
    )?;
    Ok(())
}
