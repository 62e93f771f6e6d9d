use std::fs;

use skidsteer_sitl::route::write_json_lines;
use skidsteer_sitl::{BridgeMode, Route, RouteError, RoutePlayer, SimConfig, StateRecord};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("skidsteer_{}_{}", std::process::id(), name))
}

fn config() -> SimConfig {
    SimConfig {
        seed: Some(3),
        ..Default::default()
    }
}

#[test]
fn test_square_returns_near_start() {
    let mut player = RoutePlayer::new(Route::square(1.0, 0.628), config()).unwrap();
    let records = player.run_to_end().unwrap();

    let last = records.last().unwrap();
    assert!(last.handbrake);
    assert_eq!(last.left_track, 0.0);
    assert_eq!(last.speed_ms, 0.0);
    assert!(
        last.x_m.abs() < 0.1 && last.y_m.abs() < 0.1,
        "ended at ({}, {})",
        last.x_m,
        last.y_m
    );

    // The first leg heads along +X
    let first_leg = &records[99];
    assert!(first_leg.x_m > 1.0 && first_leg.y_m.abs() < 1e-3);
}

#[test]
fn test_route_file_playback_and_recording() {
    let route_path = temp_path("route.json");
    fs::write(
        &route_path,
        r#"{
            "name": "out_and_back",
            "hold_s": 0.5,
            "steps": [
                { "at_s": 0.0, "action": { "command": { "throttle": 0.5 } } },
                { "at_s": 1.0, "action": { "command": { "throttle": -0.5, "manual_gear": -1 } } },
                { "at_s": 2.0, "action": { "command": { "brake": 1.0 } } }
            ]
        }"#,
    )
    .unwrap();

    let route = Route::from_file(&route_path).unwrap();
    let mut player = RoutePlayer::new(route, config()).unwrap();
    let records = player.run_to_end().unwrap();
    assert_eq!(records.len(), 250);
    assert_eq!(player.bridge().mode(), BridgeMode::Active);

    let reversing = &records[150];
    assert_eq!(reversing.gear, -1);
    assert!(reversing.speed_ms < 0.0);

    let last = records.last().unwrap();
    assert!(last.x_m.abs() < 0.05, "x {}", last.x_m);

    let out_path = temp_path("records.jsonl");
    write_json_lines(&records, fs::File::create(&out_path).unwrap()).unwrap();
    let text = fs::read_to_string(&out_path).unwrap();
    let parsed: Vec<StateRecord> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(parsed, records);

    let _ = fs::remove_file(route_path);
    let _ = fs::remove_file(out_path);
}

#[test]
fn test_missing_route_file() {
    let err = Route::from_file(temp_path("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, RouteError::Io(_)));
}

#[test]
fn test_malformed_route() {
    let err = Route::from_json_str(r#"{ "steps": [ { "at_s": 0.0, "action": "fly" } ] }"#)
        .unwrap_err();
    assert!(matches!(err, RouteError::Serde(_)));
}
