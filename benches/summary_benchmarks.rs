//! Summarization pipeline benchmarks
//! Measures filter/aggregate/weight throughput and vectorization of large collections

use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use replay_summaries::config::{SummaryConfig, VectorizeConfig};
use replay_summaries::core::{summarize_match, vectorize};
use replay_summaries::replay::{PlayerRecord, Replay, ReplayEvent, Team};
use std::hint::black_box;

const ABILITIES: [&str; 8] = [
    "TrainProbe",
    "BuildPylon",
    "BuildGateway",
    "TrainZealot",
    "ResearchWarpGate",
    "SmartMove",
    "BuildAssimilator",
    "TrainStalker",
];

fn create_replay(events_per_player: usize, seed: usize) -> Replay {
    let player = |pid: u32, race: &str| PlayerRecord {
        pid,
        name: format!("Player{}", pid),
        play_race: race.to_string(),
        result: Some(if pid == 1 { "Win" } else { "Loss" }.to_string()),
        events: (0..events_per_player)
            .map(|i| ReplayEvent::command((i / 4) as u32, ABILITIES[(i + seed) % ABILITIES.len()]))
            .collect(),
    };
    Replay {
        release_string: "4.10.1.75800".to_string(),
        game_type: "1v1".to_string(),
        map_name: format!("Map {}", seed),
        start_time: Utc.with_ymd_and_hms(2019, 8, 1, 12, 0, 0).unwrap(),
        real_length_seconds: 900,
        teams: vec![
            Team {
                number: 1,
                players: vec![player(1, "Protoss")],
            },
            Team {
                number: 2,
                players: vec![player(2, "Protoss")],
            },
        ],
    }
}

fn bench_summarize_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize_match");
    let config = SummaryConfig::default();

    for events in [100, 1_000, 10_000] {
        let replay = create_replay(events, 0);
        group.bench_with_input(BenchmarkId::from_parameter(events), &replay, |b, replay| {
            b.iter(|| summarize_match(black_box(replay), &config))
        });
    }
    group.finish();
}

fn bench_vectorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("vectorize");
    let summary_config = SummaryConfig::default();
    let config = VectorizeConfig::default();

    for matches in [10, 100, 1_000] {
        let summaries: Vec<_> = (0..matches)
            .flat_map(|seed| summarize_match(&create_replay(400, seed), &summary_config).unwrap())
            .collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(matches),
            &summaries,
            |b, summaries| b.iter(|| vectorize(black_box(summaries), &config)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_summarize_match, bench_vectorize);
criterion_main!(benches);
