//! Package-manager status domain: which daemons are installed (version
//! strings resolved by an external query) and restart/apply actions.
//!
//! This domain is neither persisted nor exported; it mirrors the state of the
//! outside world and forwards restart requests to it.

use crate::command::{ExternalCommand, Tool};
use crate::effects::Effect;

/// Observed daemon install status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BrewState {
    /// Installed yabai version, `None` when absent or not yet queried.
    pub yabai_version: Option<String>,
    /// Installed skhd version, `None` when absent or not yet queried.
    pub skhd_version: Option<String>,
}

/// Package-manager action vocabulary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrewAction {
    /// Query both daemons' versions.
    QueryVersions,
    /// A version query resolved (absence means not installed).
    VersionResolved(Tool, Option<String>),
    /// Restart the window-manager daemon.
    RestartYabai,
    /// Restart the hotkey daemon.
    RestartSkhd,
    /// Execute the exported animation script.
    ApplyAnimations,
}

/// Apply one package-manager action.
pub fn reduce(state: &mut BrewState, action: &BrewAction) -> Vec<Effect> {
    match action {
        BrewAction::QueryVersions => vec![
            Effect::QueryVersion(Tool::Yabai),
            Effect::QueryVersion(Tool::Skhd),
        ],
        BrewAction::VersionResolved(tool, version) => {
            match tool {
                Tool::Yabai => state.yabai_version.clone_from(version),
                Tool::Skhd => state.skhd_version.clone_from(version),
            }
            Vec::new()
        }
        BrewAction::RestartYabai => vec![Effect::Run(ExternalCommand::RestartYabai)],
        BrewAction::RestartSkhd => vec![Effect::Run(ExternalCommand::RestartSkhd)],
        BrewAction::ApplyAnimations => vec![Effect::Run(ExternalCommand::ApplyAnimations)],
    }
}

#[cfg(test)]
mod tests {
    use super::{BrewAction, BrewState, reduce};
    use crate::command::{ExternalCommand, Tool};
    use crate::effects::Effect;

    /// What: Version resolution stores the observed value per tool.
    ///
    /// Inputs:
    /// - Resolved yabai 7.1.4; unresolved skhd.
    ///
    /// Output:
    /// - State mirrors both outcomes; no effects emitted.
    #[test]
    fn version_resolution_updates_state() {
        let mut state = BrewState::default();
        let fx = reduce(
            &mut state,
            &BrewAction::VersionResolved(Tool::Yabai, Some("yabai-v7.1.4".into())),
        );
        assert!(fx.is_empty());
        let _ = reduce(&mut state, &BrewAction::VersionResolved(Tool::Skhd, None));
        assert_eq!(state.yabai_version.as_deref(), Some("yabai-v7.1.4"));
        assert_eq!(state.skhd_version, None);
    }

    /// What: Restart actions emit exactly one command effect and leave state
    /// untouched.
    ///
    /// Inputs:
    /// - `RestartYabai` on a default state.
    ///
    /// Output:
    /// - One `Run(RestartYabai)` effect; state unchanged.
    #[test]
    fn restart_emits_single_command_effect() {
        let mut state = BrewState::default();
        let fx = reduce(&mut state, &BrewAction::RestartYabai);
        assert_eq!(fx, vec![Effect::Run(ExternalCommand::RestartYabai)]);
        assert_eq!(state, BrewState::default());
    }
}
