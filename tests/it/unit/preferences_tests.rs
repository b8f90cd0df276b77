//! Preferences persistence.

use editor_canvas::playback::{PlaybackDirection, StopBehavior};
use editor_canvas::preferences::Preferences;
use editor_canvas::types::{FlagName, ZoomBehavior};
use tempfile::TempDir;

#[test]
fn snapshot_default_preferences() {
    insta::assert_json_snapshot!(Preferences::default(), @r###"
    {
      "zoom_behavior": "center",
      "zoom_with_wheel": false,
      "auto_scroll": true,
      "right_click_mode": "paint_background",
      "playback": {
        "direction": "forward",
        "play_once": false,
        "stop_behavior": "rewind"
      },
      "default_flags": [
        "grid",
        "mask",
        "onionskin",
        "outside",
        "decorators"
      ],
      "grid_size": {
        "w": 16,
        "h": 16
      },
      "marching_ants_interval_ms": 100,
      "show_brush_preview": true
    }
    "###);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("editor.json");

    let mut prefs = Preferences::default();
    prefs.zoom_behavior = ZoomBehavior::Mouse;
    prefs.zoom_with_wheel = true;
    prefs.playback.direction = PlaybackDirection::PingPong;
    prefs.playback.stop_behavior = StopBehavior::Hold;
    prefs.default_flags = vec![FlagName::Grid];
    prefs.save_to(&path).unwrap();

    let loaded = Preferences::load_from(&path).unwrap();
    assert_eq!(loaded, prefs);
}

#[test]
fn test_missing_keys_take_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.json");
    std::fs::write(&path, r#"{ "zoom_with_wheel": true, "playback": { "play_once": true } }"#).unwrap();

    let loaded = Preferences::load_from(&path).unwrap();
    assert!(loaded.zoom_with_wheel);
    assert!(loaded.playback.play_once);
    assert_eq!(loaded.playback.direction, PlaybackDirection::Forward);
    assert_eq!(loaded.zoom_behavior, ZoomBehavior::Center);
    assert_eq!(loaded.default_flags.len(), 5);
}

#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("editor.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Preferences::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("editor.json"));
    assert_eq!(Preferences::load_or_default(&path), Preferences::default());
    assert_eq!(Preferences::load_or_default(&dir.path().join("missing.json")), Preferences::default());
}
