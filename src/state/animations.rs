//! macOS animation domain: settings rendered as a `defaults write` shell
//! script, applied on demand by an external command.

use crate::effects::Effect;

/// Animation settings. Each field maps to one `defaults` key.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationsState {
    /// Animate window open/close (`NSAutomaticWindowAnimationsEnabled`).
    pub window_animations: bool,
    /// Window resize animation duration in seconds (`NSWindowResizeTime`).
    pub window_resize_time: f64,
    /// Delay before the hidden Dock reveals itself, in seconds.
    pub dock_autohide_delay: f64,
    /// Duration of the Dock hide/show animation, in seconds.
    pub dock_autohide_time: f64,
    /// Duration of the Mission Control animation, in seconds.
    pub expose_animation_duration: f64,
    /// Animate Quick Look panels.
    pub quick_look_animations: bool,
}

impl Default for AnimationsState {
    fn default() -> Self {
        Self {
            window_animations: true,
            window_resize_time: 0.2,
            dock_autohide_delay: 0.5,
            dock_autohide_time: 0.5,
            expose_animation_duration: 0.25,
            quick_look_animations: true,
        }
    }
}

/// Animation action vocabulary.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationsAction {
    /// Enable or disable window open/close animations.
    SetWindowAnimations(bool),
    /// Set the window resize animation duration.
    SetWindowResizeTime(f64),
    /// Set the Dock autohide delay.
    SetDockAutohideDelay(f64),
    /// Set the Dock autohide animation duration.
    SetDockAutohideTime(f64),
    /// Set the Mission Control animation duration.
    SetExposeAnimationDuration(f64),
    /// Enable or disable Quick Look animations.
    SetQuickLookAnimations(bool),
}

/// Apply one animation action. Pure; saves come from the root.
pub fn reduce(state: &mut AnimationsState, action: &AnimationsAction) -> Vec<Effect> {
    match action {
        AnimationsAction::SetWindowAnimations(v) => state.window_animations = *v,
        AnimationsAction::SetWindowResizeTime(v) => state.window_resize_time = *v,
        AnimationsAction::SetDockAutohideDelay(v) => state.dock_autohide_delay = *v,
        AnimationsAction::SetDockAutohideTime(v) => state.dock_autohide_time = *v,
        AnimationsAction::SetExposeAnimationDuration(v) => state.expose_animation_duration = *v,
        AnimationsAction::SetQuickLookAnimations(v) => state.quick_look_animations = *v,
    }
    Vec::new()
}

/// Render the animation shell script for this state.
///
/// Restarting the Dock is part of the script because the Dock only re-reads
/// these keys on launch.
#[must_use]
pub fn render(state: &AnimationsState) -> String {
    let mut out = String::from("#!/bin/sh\n# Written by yabset. Manual edits will be overwritten.\n\n");
    out.push_str(&format!(
        "defaults write NSGlobalDomain NSAutomaticWindowAnimationsEnabled -bool {}\n",
        state.window_animations
    ));
    out.push_str(&format!(
        "defaults write NSGlobalDomain NSWindowResizeTime -float {:.2}\n",
        state.window_resize_time
    ));
    out.push_str(&format!(
        "defaults write com.apple.dock autohide-delay -float {:.2}\n",
        state.dock_autohide_delay
    ));
    out.push_str(&format!(
        "defaults write com.apple.dock autohide-time-modifier -float {:.2}\n",
        state.dock_autohide_time
    ));
    out.push_str(&format!(
        "defaults write com.apple.dock expose-animation-duration -float {:.2}\n",
        state.expose_animation_duration
    ));
    out.push_str(&format!(
        "defaults write -g QLPanelAnimationDuration -float {}\n",
        if state.quick_look_animations { "0.2" } else { "0" }
    ));
    out.push_str("\nkillall Dock\n");
    out
}

#[cfg(test)]
mod tests {
    use super::{AnimationsAction, AnimationsState, reduce, render};

    /// What: Edits land in the rendered script.
    ///
    /// Inputs:
    /// - Disable window animations, zero the Dock autohide delay.
    ///
    /// Output:
    /// - Both `defaults write` lines carry the new values and the script
    ///   still restarts the Dock.
    #[test]
    fn render_reflects_edits() {
        let mut state = AnimationsState::default();
        let _ = reduce(&mut state, &AnimationsAction::SetWindowAnimations(false));
        let _ = reduce(&mut state, &AnimationsAction::SetDockAutohideDelay(0.0));
        let doc = render(&state);
        assert!(doc.contains("NSAutomaticWindowAnimationsEnabled -bool false\n"));
        assert!(doc.contains("autohide-delay -float 0.00\n"));
        assert!(doc.ends_with("killall Dock\n"));
    }
}
