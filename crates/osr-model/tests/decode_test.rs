use chrono::{TimeZone, Utc};
use osr_model::{DecodeError, GameMode, InputEvent, ReplayRecord};
use tempfile::tempdir;

fn mania_record() -> ReplayRecord {
    ReplayRecord {
        mode: GameMode::Mania,
        version: 20231102,
        beatmap_hash: "9e107d9d372bb6826bd81d3542a419d6".to_string(),
        username: "TestPlayer".to_string(),
        score: 912_345,
        timestamp: Utc.with_ymd_and_hms(2023, 11, 5, 18, 30, 0).unwrap(),
        events: vec![
            InputEvent::new(0, 0),
            InputEvent::new(1000, 0b0001),
            InputEvent::new(120, 0b0011),
            InputEvent::new(30, 0b0010),
            InputEvent::new(45, 0),
        ],
        online_score_id: Some(0),
        ..Default::default()
    }
}

#[test]
fn test_load_from_path() {
    let dir = tempdir().expect("failed to create temp directory");
    let path = dir.path().join("play.osr");
    let record = mania_record();
    std::fs::write(&path, record.to_bytes().unwrap()).expect("failed to write replay");

    let loaded = ReplayRecord::from_path(&path).unwrap();
    assert_eq!(loaded.mode, GameMode::Mania);
    assert_eq!(loaded.username, "TestPlayer");
    assert_eq!(loaded.score, 912_345);
    assert_eq!(loaded.events, record.events);
    assert_eq!(loaded.duration_ms(), 1195);
}

#[test]
fn test_load_nonexistent_file() {
    let dir = tempdir().expect("failed to create temp directory");
    let path = dir.path().join("missing.osr");

    let err = ReplayRecord::from_path(&path).unwrap_err();
    assert!(matches!(err, DecodeError::FileRead { .. }));
    assert!(err.to_string().contains("missing.osr"));
}

#[test]
fn test_load_garbage_file() {
    let dir = tempdir().expect("failed to create temp directory");
    let path = dir.path().join("garbage.osr");
    std::fs::write(&path, b"not a replay at all").expect("failed to write file");

    assert!(ReplayRecord::from_path(&path).is_err());
}

#[test]
fn test_load_empty_file() {
    let dir = tempdir().expect("failed to create temp directory");
    let path = dir.path().join("empty.osr");
    std::fs::write(&path, b"").expect("failed to write file");

    let err = ReplayRecord::from_path(&path).unwrap_err();
    assert!(matches!(err, DecodeError::UnexpectedEof { field: "mode" }));
}
