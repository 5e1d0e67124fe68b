//! Named hotkey shortcuts and their default key combinations.
//!
//! Every logical shortcut the hotkey daemon manages has a stable name. The
//! default name→combination table is explicit data, and applying it to an
//! external binding service is a single idempotent operation: no state is
//! kept here beyond what the service itself owns.

use std::fmt;

use crate::state::types::{KeyCombo, Modifier};

/// Stable identifiers for every managed shortcut.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ShortcutName {
    /// Restart the yabai daemon.
    RestartYabai,
    /// Toggle space padding.
    TogglePadding,
    /// Toggle window gaps.
    ToggleGaps,
    /// Toggle the split orientation of the focused window.
    ToggleSplit,
    /// Switch the space layout to float.
    ToggleFloat,
    /// Switch the space layout to bsp.
    ToggleBsp,
    /// Switch the space layout to stack.
    ToggleStack,
    /// Focus the window to the north.
    FocusNorth,
    /// Focus the window to the south.
    FocusSouth,
    /// Focus the window to the east.
    FocusEast,
    /// Focus the window to the west.
    FocusWest,
    /// Grow the focused window upward.
    ResizeTop,
    /// Grow the focused window downward.
    ResizeBottom,
    /// Grow the focused window rightward.
    ResizeRight,
    /// Grow the focused window leftward.
    ResizeLeft,
    /// Move the focused window north.
    MoveNorth,
    /// Move the focused window south.
    MoveSouth,
    /// Move the focused window east.
    MoveEast,
    /// Move the focused window west.
    MoveWest,
}

impl ShortcutName {
    /// Every shortcut, in the canonical order used for rendering and reset.
    pub const ALL: [Self; 19] = [
        Self::RestartYabai,
        Self::TogglePadding,
        Self::ToggleGaps,
        Self::ToggleSplit,
        Self::ToggleFloat,
        Self::ToggleBsp,
        Self::ToggleStack,
        Self::FocusNorth,
        Self::FocusSouth,
        Self::FocusEast,
        Self::FocusWest,
        Self::ResizeTop,
        Self::ResizeBottom,
        Self::ResizeRight,
        Self::ResizeLeft,
        Self::MoveNorth,
        Self::MoveSouth,
        Self::MoveEast,
        Self::MoveWest,
    ];

    /// The shell command the hotkey daemon runs for this shortcut.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::RestartYabai => "yabai --restart-service",
            Self::TogglePadding => "yabai -m space --toggle padding",
            Self::ToggleGaps => "yabai -m space --toggle gap",
            Self::ToggleSplit => "yabai -m window --toggle split",
            Self::ToggleFloat => "yabai -m space --layout float",
            Self::ToggleBsp => "yabai -m space --layout bsp",
            Self::ToggleStack => "yabai -m space --layout stack",
            Self::FocusNorth => "yabai -m window --focus north",
            Self::FocusSouth => "yabai -m window --focus south",
            Self::FocusEast => "yabai -m window --focus east",
            Self::FocusWest => "yabai -m window --focus west",
            Self::ResizeTop => "yabai -m window --resize top:0:-50",
            Self::ResizeBottom => "yabai -m window --resize bottom:0:50",
            Self::ResizeRight => "yabai -m window --resize right:50:0",
            Self::ResizeLeft => "yabai -m window --resize left:-50:0",
            Self::MoveNorth => "yabai -m window --warp north",
            Self::MoveSouth => "yabai -m window --warp south",
            Self::MoveEast => "yabai -m window --warp east",
            Self::MoveWest => "yabai -m window --warp west",
        }
    }
}

impl fmt::Display for ShortcutName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::RestartYabai => "restart-yabai",
            Self::TogglePadding => "toggle-padding",
            Self::ToggleGaps => "toggle-gaps",
            Self::ToggleSplit => "toggle-split",
            Self::ToggleFloat => "toggle-float",
            Self::ToggleBsp => "toggle-bsp",
            Self::ToggleStack => "toggle-stack",
            Self::FocusNorth => "focus-north",
            Self::FocusSouth => "focus-south",
            Self::FocusEast => "focus-east",
            Self::FocusWest => "focus-west",
            Self::ResizeTop => "resize-top",
            Self::ResizeBottom => "resize-bottom",
            Self::ResizeRight => "resize-right",
            Self::ResizeLeft => "resize-left",
            Self::MoveNorth => "move-north",
            Self::MoveSouth => "move-south",
            Self::MoveEast => "move-east",
            Self::MoveWest => "move-west",
        };
        f.write_str(s)
    }
}

/// The full default name→combination table, in canonical order.
#[must_use]
pub fn default_bindings() -> Vec<(ShortcutName, KeyCombo)> {
    use Modifier::{Alt, Cmd, Ctrl, Shift};
    vec![
        (
            ShortcutName::RestartYabai,
            KeyCombo::new(&[Alt, Shift], "r"),
        ),
        (
            ShortcutName::TogglePadding,
            KeyCombo::new(&[Ctrl, Alt], "9"),
        ),
        (ShortcutName::ToggleGaps, KeyCombo::new(&[Ctrl, Alt], "0")),
        (ShortcutName::ToggleSplit, KeyCombo::new(&[Ctrl, Alt], "x")),
        (ShortcutName::ToggleFloat, KeyCombo::new(&[Ctrl, Alt], "1")),
        (ShortcutName::ToggleBsp, KeyCombo::new(&[Ctrl, Alt], "2")),
        (ShortcutName::ToggleStack, KeyCombo::new(&[Ctrl, Alt], "3")),
        (ShortcutName::FocusNorth, KeyCombo::new(&[Ctrl], "up")),
        (ShortcutName::FocusSouth, KeyCombo::new(&[Ctrl], "down")),
        (ShortcutName::FocusEast, KeyCombo::new(&[Ctrl], "right")),
        (ShortcutName::FocusWest, KeyCombo::new(&[Ctrl], "left")),
        (ShortcutName::ResizeTop, KeyCombo::new(&[Ctrl, Alt], "up")),
        (
            ShortcutName::ResizeBottom,
            KeyCombo::new(&[Ctrl, Alt], "down"),
        ),
        (
            ShortcutName::ResizeRight,
            KeyCombo::new(&[Ctrl, Alt], "right"),
        ),
        (
            ShortcutName::ResizeLeft,
            KeyCombo::new(&[Ctrl, Alt], "left"),
        ),
        (
            ShortcutName::MoveNorth,
            KeyCombo::new(&[Ctrl, Alt, Cmd], "up"),
        ),
        (
            ShortcutName::MoveSouth,
            KeyCombo::new(&[Ctrl, Alt, Cmd], "down"),
        ),
        (
            ShortcutName::MoveEast,
            KeyCombo::new(&[Ctrl, Alt, Cmd], "right"),
        ),
        (
            ShortcutName::MoveWest,
            KeyCombo::new(&[Ctrl, Alt, Cmd], "left"),
        ),
    ]
}

/// External hotkey registration service.
///
/// The engine only ever registers bindings by stable name; whatever process-
/// wide table exists belongs to the implementor.
pub trait BindingService: Send + Sync {
    /// Register (or re-register) one named shortcut to a combination.
    fn register(&self, name: ShortcutName, combo: &KeyCombo);
}

/// A binding service that only logs registrations.
///
/// Stands in when no real registration backend is attached (CLI runs, tests,
/// platforms without one).
pub struct NullBindingService;

impl BindingService for NullBindingService {
    fn register(&self, name: ShortcutName, combo: &KeyCombo) {
        tracing::debug!(shortcut = %name, chord = %combo.to_skhd(), "binding registered");
    }
}

/// Re-register every shortcut in `table` with the service.
///
/// Idempotent: applying the same table twice leaves the service in the same
/// state as applying it once.
pub fn apply_bindings(service: &dyn BindingService, table: &[(ShortcutName, KeyCombo)]) {
    for (name, combo) in table {
        service.register(*name, combo);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::{BindingService, ShortcutName, apply_bindings, default_bindings};
    use crate::state::types::KeyCombo;

    /// Recording fake for the external binding service.
    struct Recorder {
        /// Registered (name, combo) pairs in call order.
        calls: Mutex<Vec<(ShortcutName, KeyCombo)>>,
    }

    impl BindingService for Recorder {
        fn register(&self, name: ShortcutName, combo: &KeyCombo) {
            self.calls
                .lock()
                .expect("Recorder mutex poisoned")
                .push((name, combo.clone()));
        }
    }

    /// What: The default table covers every shortcut name exactly once.
    ///
    /// Inputs:
    /// - `default_bindings()` and `ShortcutName::ALL`.
    ///
    /// Output:
    /// - Same length, same order.
    #[test]
    fn default_table_covers_all_shortcuts() {
        let table = default_bindings();
        assert_eq!(table.len(), ShortcutName::ALL.len());
        for (entry, name) in table.iter().zip(ShortcutName::ALL) {
            assert_eq!(entry.0, name);
        }
    }

    /// What: Applying the default table twice registers the same bindings
    /// both times (idempotence from the service's point of view).
    ///
    /// Inputs:
    /// - A recording fake service; two `apply_bindings` calls.
    ///
    /// Output:
    /// - The second pass repeats the first pass exactly.
    #[test]
    fn apply_bindings_is_idempotent() {
        let rec = Recorder {
            calls: Mutex::new(Vec::new()),
        };
        let table = default_bindings();
        apply_bindings(&rec, &table);
        apply_bindings(&rec, &table);
        let calls = rec.calls.lock().expect("Recorder mutex poisoned");
        assert_eq!(calls.len(), table.len() * 2);
        assert_eq!(calls[..table.len()], calls[table.len()..]);
    }
}
