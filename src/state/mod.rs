//! Root state and action types, composed from the per-domain modules.
//!
//! The root state is the ordered composition of every domain state plus a
//! transient UI block that is never serialized. Actions form one closed
//! tagged union: either a domain-scoped action wrapping that domain's own
//! vocabulary, or a root-scoped action (load/export requests, reset
//! confirmation, effect completions, global toggles).

pub mod animations;
pub mod brew;
pub mod onboarding;
pub mod skhd;
pub mod types;
pub mod yabai;

use std::fmt;

use crate::command::CommandError;
use crate::persist::{ExportError, LoadError, SaveError};

pub use animations::{AnimationsAction, AnimationsState};
pub use brew::{BrewAction, BrewState};
pub use onboarding::{OnboardingAction, OnboardingState};
pub use skhd::{SkhdAction, SkhdState};
pub use yabai::{YabaiAction, YabaiState};

/// The persisted/exportable domains.
///
/// Package-manager status and onboarding are deliberately absent: they have
/// no snapshot and no export target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Window-manager settings.
    Yabai,
    /// Hotkey-daemon settings.
    Skhd,
    /// macOS animation settings.
    Animations,
}

impl Domain {
    /// All persisted domains in canonical order.
    pub const ALL: [Self; 3] = [Self::Yabai, Self::Skhd, Self::Animations];
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Yabai => "yabai",
            Self::Skhd => "skhd",
            Self::Animations => "animations",
        };
        f.write_str(s)
    }
}

/// A fully decoded domain snapshot, carried by a successful load completion.
///
/// A load either yields a complete typed value or fails; there is no partial
/// decode that could half-overwrite in-memory state.
#[derive(Clone, Debug, PartialEq)]
pub enum Snapshot {
    /// Window-manager snapshot.
    Yabai(YabaiState),
    /// Hotkey-daemon snapshot.
    Skhd(SkhdState),
    /// Animations snapshot.
    Animations(AnimationsState),
}

/// Ephemeral root-level fields. Never serialized: a restart must not
/// resurrect a stale alert or error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransientUi {
    /// A reset confirmation is pending.
    pub confirming_reset: bool,
    /// Most recent error message; empty when the last operation succeeded.
    pub error: String,
    /// An apply-changes run is in flight.
    pub applying_changes: bool,
    /// Global enabled flag; disabled renders every export target empty.
    pub enabled: bool,
}

impl Default for TransientUi {
    fn default() -> Self {
        Self {
            confirming_reset: false,
            error: String::new(),
            applying_changes: false,
            enabled: true,
        }
    }
}

/// The composed root state. Owned exclusively by the store; mutated only
/// inside reducer invocations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RootState {
    /// Window-manager domain.
    pub yabai: YabaiState,
    /// Hotkey-daemon domain.
    pub skhd: SkhdState,
    /// Animations domain.
    pub animations: AnimationsState,
    /// Package-manager status domain.
    pub brew: BrewState,
    /// Onboarding domain.
    pub onboarding: OnboardingState,
    /// Transient root-level fields.
    pub ui: TransientUi,
}

/// The closed root action union.
///
/// Reducers treat actions not addressed to them as no-ops, never errors.
#[derive(Clone, Debug, PartialEq)]
pub enum RootAction {
    /// Window-manager domain action.
    Yabai(YabaiAction),
    /// Hotkey-daemon domain action.
    Skhd(SkhdAction),
    /// Animations domain action.
    Animations(AnimationsAction),
    /// Package-manager domain action.
    Brew(BrewAction),
    /// Onboarding domain action.
    Onboarding(OnboardingAction),
    /// Load a domain's snapshot from disk.
    RequestLoad(Domain),
    /// Render and export a domain's document.
    RequestExport(Domain),
    /// Ask for reset confirmation.
    ShowResetConfirmation,
    /// Confirm the reset: defaults for yabai/skhd/animations, default hotkey
    /// bindings re-registered.
    ConfirmReset,
    /// Dismiss the reset confirmation without touching domain state.
    DismissReset,
    /// Flip the applying-changes flag.
    ToggleApplying,
    /// Flip the global enabled flag and re-export every domain.
    ToggleEnabled,
    /// A load effect finished.
    LoadCompleted(Domain, Result<Snapshot, LoadError>),
    /// A save effect finished.
    SaveCompleted(Domain, Result<(), SaveError>),
    /// An export effect finished.
    ExportCompleted(Domain, Result<(), ExportError>),
    /// An external command finished.
    CommandCompleted(Result<(), CommandError>),
}

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

/// Serializes tests that shim process-wide environment (HOME).
#[cfg(test)]
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
