//! Renderer and snapshot-format tests across all three exportable domains.

use yabset::state::animations::{self, AnimationsState};
use yabset::state::skhd::{self, SkhdState};
use yabset::state::yabai::{self, YabaiState};

/// What: The default window-manager document contains one config line per
/// rendered option and parses as a shell script shape.
///
/// Inputs:
/// - `YabaiState::default()`.
///
/// Output:
/// - Shebang first; every non-comment line starts with `yabai -m config`.
#[test]
fn default_yabai_document_shape() {
    let doc = yabai::render(&YabaiState::default());
    let mut lines = doc.lines();
    assert_eq!(lines.next(), Some("#!/usr/bin/env sh"));
    for line in lines.filter(|l| !l.is_empty() && !l.starts_with('#')) {
        assert!(
            line.starts_with("yabai -m config "),
            "unexpected line: {line}"
        );
    }
    assert!(doc.contains("yabai -m config layout float\n"));
    assert!(doc.contains("yabai -m config window_gap 30\n"));
}

/// What: The default hotkey document binds every shortcut with a ` : `
/// separated chord/command pair.
///
/// Inputs:
/// - `SkhdState::default()`.
///
/// Output:
/// - 19 binding lines, each containing ` : yabai`.
#[test]
fn default_skhd_document_binds_everything() {
    let doc = skhd::render(&SkhdState::default());
    let bindings: Vec<_> = doc.lines().filter(|l| l.contains(" : ")).collect();
    assert_eq!(bindings.len(), 19);
    assert!(doc.contains("alt + shift - r : yabai --restart-service\n"));
    assert!(doc.contains("ctrl - up : yabai -m window --focus north\n"));
    assert!(doc.contains("ctrl + alt + cmd - left : yabai -m window --warp west\n"));
}

/// What: The animations script only ever writes `defaults` keys and restarts
/// the Dock once.
///
/// Inputs:
/// - `AnimationsState::default()`.
///
/// Output:
/// - Every command line is `defaults write ...` or the final `killall Dock`.
#[test]
fn default_animations_script_shape() {
    let doc = animations::render(&AnimationsState::default());
    let commands: Vec<_> = doc
        .lines()
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect();
    let (last, body) = commands.split_last().expect("non-empty script");
    assert_eq!(*last, "killall Dock");
    for line in body {
        assert!(line.starts_with("defaults write "), "unexpected line: {line}");
    }
}

/// What: Hotkey snapshots survive a JSON round trip, including the
/// enum-keyed binding map.
///
/// Inputs:
/// - A default table with one shortcut rebound.
///
/// Output:
/// - Deserialized state equals the original.
#[test]
fn skhd_snapshot_json_round_trip() {
    use yabset::hotkeys::ShortcutName;
    use yabset::state::types::{KeyCombo, Modifier};

    let mut state = SkhdState::default();
    state.bindings.insert(
        ShortcutName::ToggleSplit,
        KeyCombo::new(&[Modifier::Cmd], "s"),
    );
    let json = serde_json::to_string(&state).expect("serialize");
    assert!(json.contains("\"toggle-split\""));
    let back: SkhdState = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, state);
}

/// What: Animation snapshots tolerate missing fields (forward-compatible
/// addition) by defaulting them.
///
/// Inputs:
/// - A JSON object with only `dock_autohide_delay`.
///
/// Output:
/// - Load succeeds; other fields equal defaults.
#[test]
fn animations_snapshot_defaults_missing_fields() {
    let back: AnimationsState =
        serde_json::from_str(r#"{ "dock_autohide_delay": 0.1 }"#).expect("deserialize");
    assert!((back.dock_autohide_delay - 0.1).abs() < f64::EPSILON);
    assert_eq!(
        back.window_resize_time,
        AnimationsState::default().window_resize_time
    );
}
