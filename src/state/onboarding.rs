//! Onboarding domain: first-run walkthrough progress. Ephemeral, never
//! persisted.

use crate::effects::Effect;

/// Number of walkthrough steps.
pub const STEP_COUNT: usize = 4;

/// Onboarding progress.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OnboardingState {
    /// Current walkthrough step (0-based).
    pub step: usize,
    /// Walkthrough finished or skipped.
    pub completed: bool,
}

/// Onboarding action vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnboardingAction {
    /// Advance one step; completes on the last step.
    Next,
    /// Go back one step.
    Back,
    /// Skip the rest of the walkthrough.
    Skip,
}

/// Apply one onboarding action.
pub fn reduce(state: &mut OnboardingState, action: &OnboardingAction) -> Vec<Effect> {
    match action {
        OnboardingAction::Next => {
            if state.step + 1 >= STEP_COUNT {
                state.completed = true;
            } else {
                state.step += 1;
            }
        }
        OnboardingAction::Back => {
            state.step = state.step.saturating_sub(1);
        }
        OnboardingAction::Skip => {
            state.completed = true;
        }
    }
    Vec::new()
}
