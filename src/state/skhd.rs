//! Hotkey-daemon (skhd) domain: one key combination per named shortcut, and
//! the `.skhdrc` renderer.

use std::collections::BTreeMap;

use crate::effects::Effect;
use crate::hotkeys::{ShortcutName, default_bindings};
use crate::state::types::KeyCombo;

/// Hotkey-daemon settings: the name→combination table.
///
/// Stored as a `BTreeMap` so snapshots serialize with stable key order;
/// rendering walks [`ShortcutName::ALL`] so document order is canonical
/// regardless of map contents.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SkhdState {
    /// Key combination per shortcut. A shortcut absent from the map renders
    /// as a commented-out line (unbound).
    pub bindings: BTreeMap<ShortcutName, KeyCombo>,
}

impl Default for SkhdState {
    fn default() -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
        }
    }
}

/// Hotkey-daemon action vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkhdAction {
    /// Bind one shortcut to a combination.
    SetBinding(ShortcutName, KeyCombo),
    /// Remove one shortcut's binding.
    ClearBinding(ShortcutName),
}

/// Apply one hotkey-daemon action. Pure; write-through saves come from the
/// root.
pub fn reduce(state: &mut SkhdState, action: &SkhdAction) -> Vec<Effect> {
    match action {
        SkhdAction::SetBinding(name, combo) => {
            state.bindings.insert(*name, combo.clone());
        }
        SkhdAction::ClearBinding(name) => {
            state.bindings.remove(name);
        }
    }
    Vec::new()
}

/// Render the full `.skhdrc` document for this state.
#[must_use]
pub fn render(state: &SkhdState) -> String {
    let mut out = String::from("# Written by yabset. Manual edits will be overwritten.\n\n");
    for name in ShortcutName::ALL {
        match state.bindings.get(&name) {
            Some(combo) => {
                out.push_str(&format!("{} : {}\n", combo.to_skhd(), name.command()));
            }
            None => {
                out.push_str(&format!("# {name} unbound\n"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{SkhdAction, SkhdState, reduce, render};
    use crate::hotkeys::ShortcutName;
    use crate::state::types::{KeyCombo, Modifier};

    /// What: Default state binds every shortcut from the default table.
    ///
    /// Inputs:
    /// - `SkhdState::default()`.
    ///
    /// Output:
    /// - One binding per shortcut name; rendered document has no unbound
    ///   lines.
    #[test]
    fn default_state_binds_every_shortcut() {
        let state = SkhdState::default();
        assert_eq!(state.bindings.len(), ShortcutName::ALL.len());
        assert!(!render(&state).contains("unbound"));
    }

    /// What: Rebinding and clearing shortcuts shows up in the document.
    ///
    /// Inputs:
    /// - Rebind restart-yabai to `cmd + shift - y`; clear move-west.
    ///
    /// Output:
    /// - The new chord appears on the restart line; move-west renders as a
    ///   commented unbound line.
    #[test]
    fn rebind_and_clear_render_accordingly() {
        let mut state = SkhdState::default();
        let _ = reduce(
            &mut state,
            &SkhdAction::SetBinding(
                ShortcutName::RestartYabai,
                KeyCombo::new(&[Modifier::Cmd, Modifier::Shift], "y"),
            ),
        );
        let _ = reduce(&mut state, &SkhdAction::ClearBinding(ShortcutName::MoveWest));
        let doc = render(&state);
        assert!(doc.contains("cmd + shift - y : yabai --restart-service\n"));
        assert!(doc.contains("# move-west unbound\n"));
    }
}
