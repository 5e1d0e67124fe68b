//! Window-manager (yabai) domain: state, actions, reducer, and `.yabairc`
//! renderer.
//!
//! Every field has a default so the state is always constructible with no
//! external input. The reducer stores any structurally valid update; whether a
//! control is greyed out behind a parent toggle is a presentation concern and
//! never rejected here.

use crate::effects::Effect;
use crate::state::types::Rgba;

/// External status-bar mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalBar {
    /// No external bar.
    Off,
    /// External bar on every screen.
    #[default]
    All,
    /// External bar on the main screen only.
    Main,
}

/// Focus-follows-mouse behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusFollowsMouse {
    /// Disabled.
    #[default]
    Off,
    /// Focus windows on hover.
    Autofocus,
    /// Focus and raise windows on hover.
    Autoraise,
}

/// Where a new window lands when a node splits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowPlacement {
    /// New window becomes the first child.
    FirstChild,
    /// New window becomes the second child.
    #[default]
    SecondChild,
}

/// Which windows have their shadows disabled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowShadow {
    /// Disable shadows for all windows.
    #[default]
    Off,
    /// Disable shadows for non-floating windows only.
    Float,
}

/// How new windows share space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowBalance {
    /// New window takes half the space.
    #[default]
    Normal,
    /// All windows occupy equal space.
    Auto,
    /// New windows take a custom split ratio.
    Custom,
}

/// Modifier key used for mouse window operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseModifier {
    /// The `fn` key.
    #[default]
    Fn,
    /// Shift.
    Shift,
    /// Control.
    Ctrl,
    /// Option/Alt.
    Alt,
    /// Command.
    Cmd,
}

/// Action bound to a mouse button while the modifier is held.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseAction {
    /// Move the window under the cursor.
    Move,
    /// Resize the window under the cursor.
    Resize,
}

/// What happens when one window is dropped onto another.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseDropAction {
    /// Swap the two windows.
    #[default]
    Swap,
    /// Stack the two windows.
    Stack,
}

/// Space layout algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Default macOS window behavior.
    #[default]
    Float,
    /// Binary-space-partition tiling.
    Bsp,
    /// Full-screen stacking.
    Stack,
}

/// Window-manager settings, one field per yabai config option.
///
/// Missing fields in an old snapshot fall back to their defaults via
/// `#[serde(default)]`; unknown fields are ignored.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct YabaiState {
    /// System Integrity Protection still enabled (limits some options).
    pub sip_enabled: bool,
    /// Emit debug output from the daemon.
    pub debug_output: bool,
    /// External status-bar mode.
    pub external_bar: ExternalBar,
    /// Whether the external bar settings are exported at all.
    pub external_bar_enabled: bool,
    /// Top padding reserved for the external bar, in points.
    pub external_bar_padding_top: u32,
    /// Bottom padding reserved for the external bar, in points.
    pub external_bar_padding_bottom: u32,
    /// Mouse warps to the focused window.
    pub mouse_follows_focus: bool,
    /// Focus-follows-mouse behavior.
    pub focus_follows_mouse: FocusFollowsMouse,
    /// Placement of new windows on split.
    pub window_placement: WindowPlacement,
    /// Keep floating windows on top.
    pub window_topmost: bool,
    /// Master toggle for shadow disabling.
    pub disable_shadows: bool,
    /// Which windows lose their shadows when disabled.
    pub window_shadow: WindowShadow,
    /// Opacity fade duration in seconds.
    pub window_opacity_duration: f64,
    /// Opacity of the focused window (0.0–1.0).
    pub active_window_opacity: f64,
    /// Opacity of unfocused windows (0.0–1.0).
    pub normal_window_opacity: f64,
    /// Space-sharing policy for new windows.
    pub window_balance: WindowBalance,
    /// Custom split ratio as a percentage (used with `WindowBalance::Custom`).
    pub split_ratio: f32,
    /// Rebalance all windows after every change.
    pub auto_balance: bool,
    /// Border width in points (0 disables borders).
    pub window_border_width: f32,
    /// Border color of the focused window.
    pub active_window_border_color: Rgba,
    /// Border color of unfocused windows.
    pub normal_window_border_color: Rgba,
    /// Modifier key for mouse operations.
    pub mouse_modifier: MouseModifier,
    /// Action for mouse button one.
    pub mouse_action1: MouseAction,
    /// Action for mouse button two.
    pub mouse_action2: MouseAction,
    /// Drop behavior when dragging a window onto another.
    pub mouse_drop_action: MouseDropAction,
    /// Space layout algorithm.
    pub layout: Layout,
    /// Space padding in points.
    pub padding: u32,
    /// Gap between windows in points.
    pub window_gap: u32,
}

impl Default for YabaiState {
    fn default() -> Self {
        Self {
            sip_enabled: false,
            debug_output: false,
            external_bar: ExternalBar::default(),
            external_bar_enabled: false,
            external_bar_padding_top: 0,
            external_bar_padding_bottom: 0,
            mouse_follows_focus: false,
            focus_follows_mouse: FocusFollowsMouse::default(),
            window_placement: WindowPlacement::default(),
            window_topmost: false,
            disable_shadows: false,
            window_shadow: WindowShadow::default(),
            window_opacity_duration: 1.0,
            active_window_opacity: 1.0,
            normal_window_opacity: 1.0,
            window_balance: WindowBalance::default(),
            split_ratio: 50.0,
            auto_balance: false,
            window_border_width: 0.0,
            active_window_border_color: Rgba::rgb(0x00, 0x7a, 0xff),
            normal_window_border_color: Rgba::rgb(0x8e, 0x8e, 0x93),
            mouse_modifier: MouseModifier::default(),
            mouse_action1: MouseAction::Move,
            mouse_action2: MouseAction::Resize,
            mouse_drop_action: MouseDropAction::default(),
            layout: Layout::default(),
            padding: 30,
            window_gap: 30,
        }
    }
}

/// Window-manager action vocabulary, one variant per editable option.
#[derive(Clone, Debug, PartialEq)]
pub enum YabaiAction {
    /// Flip the SIP-enabled flag.
    ToggleSip,
    /// Set debug output.
    SetDebugOutput(bool),
    /// Set the external bar mode.
    SetExternalBar(ExternalBar),
    /// Enable or disable exporting external bar settings.
    SetExternalBarEnabled(bool),
    /// Set top padding for the external bar.
    SetExternalBarPaddingTop(u32),
    /// Set bottom padding for the external bar.
    SetExternalBarPaddingBottom(u32),
    /// Set mouse-follows-focus.
    SetMouseFollowsFocus(bool),
    /// Set focus-follows-mouse behavior.
    SetFocusFollowsMouse(FocusFollowsMouse),
    /// Set new-window placement.
    SetWindowPlacement(WindowPlacement),
    /// Keep floating windows on top.
    SetWindowTopmost(bool),
    /// Master toggle for shadow disabling.
    SetDisableShadows(bool),
    /// Set which windows lose shadows.
    SetWindowShadow(WindowShadow),
    /// Set the opacity fade duration.
    SetWindowOpacityDuration(f64),
    /// Set focused-window opacity.
    SetActiveWindowOpacity(f64),
    /// Set unfocused-window opacity.
    SetNormalWindowOpacity(f64),
    /// Set the space-sharing policy.
    SetWindowBalance(WindowBalance),
    /// Set the custom split ratio percentage.
    SetSplitRatio(f32),
    /// Set auto-balance.
    SetAutoBalance(bool),
    /// Set the border width.
    SetWindowBorderWidth(f32),
    /// Set the focused-window border color.
    SetActiveWindowBorderColor(Rgba),
    /// Set the unfocused-window border color.
    SetNormalWindowBorderColor(Rgba),
    /// Set the mouse modifier key.
    SetMouseModifier(MouseModifier),
    /// Set mouse button one's action.
    SetMouseAction1(MouseAction),
    /// Set mouse button two's action.
    SetMouseAction2(MouseAction),
    /// Set the drop action.
    SetMouseDropAction(MouseDropAction),
    /// Set the space layout.
    SetLayout(Layout),
    /// Set space padding.
    SetPadding(u32),
    /// Set the window gap.
    SetWindowGap(u32),
}

/// Apply one window-manager action. Pure; never emits effects of its own
/// (write-through saves are scheduled at the root).
pub fn reduce(state: &mut YabaiState, action: &YabaiAction) -> Vec<Effect> {
    match action {
        YabaiAction::ToggleSip => state.sip_enabled = !state.sip_enabled,
        YabaiAction::SetDebugOutput(v) => state.debug_output = *v,
        YabaiAction::SetExternalBar(v) => state.external_bar = *v,
        YabaiAction::SetExternalBarEnabled(v) => state.external_bar_enabled = *v,
        YabaiAction::SetExternalBarPaddingTop(v) => state.external_bar_padding_top = *v,
        YabaiAction::SetExternalBarPaddingBottom(v) => state.external_bar_padding_bottom = *v,
        YabaiAction::SetMouseFollowsFocus(v) => state.mouse_follows_focus = *v,
        YabaiAction::SetFocusFollowsMouse(v) => state.focus_follows_mouse = *v,
        YabaiAction::SetWindowPlacement(v) => state.window_placement = *v,
        YabaiAction::SetWindowTopmost(v) => state.window_topmost = *v,
        YabaiAction::SetDisableShadows(v) => state.disable_shadows = *v,
        YabaiAction::SetWindowShadow(v) => state.window_shadow = *v,
        YabaiAction::SetWindowOpacityDuration(v) => state.window_opacity_duration = *v,
        YabaiAction::SetActiveWindowOpacity(v) => state.active_window_opacity = *v,
        YabaiAction::SetNormalWindowOpacity(v) => state.normal_window_opacity = *v,
        YabaiAction::SetWindowBalance(v) => state.window_balance = *v,
        YabaiAction::SetSplitRatio(v) => state.split_ratio = *v,
        YabaiAction::SetAutoBalance(v) => state.auto_balance = *v,
        YabaiAction::SetWindowBorderWidth(v) => state.window_border_width = *v,
        YabaiAction::SetActiveWindowBorderColor(v) => state.active_window_border_color = *v,
        YabaiAction::SetNormalWindowBorderColor(v) => state.normal_window_border_color = *v,
        YabaiAction::SetMouseModifier(v) => state.mouse_modifier = *v,
        YabaiAction::SetMouseAction1(v) => state.mouse_action1 = *v,
        YabaiAction::SetMouseAction2(v) => state.mouse_action2 = *v,
        YabaiAction::SetMouseDropAction(v) => state.mouse_drop_action = *v,
        YabaiAction::SetLayout(v) => state.layout = *v,
        YabaiAction::SetPadding(v) => state.padding = *v,
        YabaiAction::SetWindowGap(v) => state.window_gap = *v,
    }
    Vec::new()
}

/// Format a bool in yabai's on/off notation.
const fn on_off(v: bool) -> &'static str {
    if v { "on" } else { "off" }
}

/// Render the full `.yabairc` document for this state.
///
/// Pure and deterministic: no timestamps, no environment reads.
#[must_use]
pub fn render(state: &YabaiState) -> String {
    let mut out = String::from("#!/usr/bin/env sh\n# Written by yabset. Manual edits will be overwritten.\n\n");

    if state.external_bar_enabled {
        let mode = match state.external_bar {
            ExternalBar::Off => "off",
            ExternalBar::All => "all",
            ExternalBar::Main => "main",
        };
        out.push_str(&format!(
            "yabai -m config external_bar {mode}:{}:{}\n",
            state.external_bar_padding_top, state.external_bar_padding_bottom
        ));
    }
    out.push_str(&format!(
        "yabai -m config debug_output {}\n",
        on_off(state.debug_output)
    ));
    out.push_str(&format!(
        "yabai -m config mouse_follows_focus {}\n",
        on_off(state.mouse_follows_focus)
    ));
    out.push_str(&format!(
        "yabai -m config focus_follows_mouse {}\n",
        match state.focus_follows_mouse {
            FocusFollowsMouse::Off => "off",
            FocusFollowsMouse::Autofocus => "autofocus",
            FocusFollowsMouse::Autoraise => "autoraise",
        }
    ));
    out.push_str(&format!(
        "yabai -m config window_placement {}\n",
        match state.window_placement {
            WindowPlacement::FirstChild => "first_child",
            WindowPlacement::SecondChild => "second_child",
        }
    ));
    out.push_str(&format!(
        "yabai -m config window_topmost {}\n",
        on_off(state.window_topmost)
    ));
    out.push_str(&format!(
        "yabai -m config window_shadow {}\n",
        if state.disable_shadows {
            match state.window_shadow {
                WindowShadow::Off => "off",
                WindowShadow::Float => "float",
            }
        } else {
            "on"
        }
    ));
    out.push_str(&format!(
        "yabai -m config window_opacity_duration {:.2}\n",
        state.window_opacity_duration
    ));
    out.push_str(&format!(
        "yabai -m config active_window_opacity {:.2}\n",
        state.active_window_opacity
    ));
    out.push_str(&format!(
        "yabai -m config normal_window_opacity {:.2}\n",
        state.normal_window_opacity
    ));
    match state.window_balance {
        WindowBalance::Normal => out.push_str("yabai -m config split_ratio 0.50\n"),
        WindowBalance::Custom => out.push_str(&format!(
            "yabai -m config split_ratio {:.2}\n",
            f64::from(state.split_ratio) / 100.0
        )),
        WindowBalance::Auto => {}
    }
    out.push_str(&format!(
        "yabai -m config auto_balance {}\n",
        on_off(state.auto_balance || state.window_balance == WindowBalance::Auto)
    ));
    out.push_str(&format!(
        "yabai -m config window_border_width {:.0}\n",
        state.window_border_width
    ));
    out.push_str(&format!(
        "yabai -m config active_window_border_color {}\n",
        state.active_window_border_color.to_argb_hex()
    ));
    out.push_str(&format!(
        "yabai -m config normal_window_border_color {}\n",
        state.normal_window_border_color.to_argb_hex()
    ));
    out.push_str(&format!(
        "yabai -m config mouse_modifier {}\n",
        match state.mouse_modifier {
            MouseModifier::Fn => "fn",
            MouseModifier::Shift => "shift",
            MouseModifier::Ctrl => "ctrl",
            MouseModifier::Alt => "alt",
            MouseModifier::Cmd => "cmd",
        }
    ));
    let mouse_action = |a: MouseAction| match a {
        MouseAction::Move => "move",
        MouseAction::Resize => "resize",
    };
    out.push_str(&format!(
        "yabai -m config mouse_action1 {}\n",
        mouse_action(state.mouse_action1)
    ));
    out.push_str(&format!(
        "yabai -m config mouse_action2 {}\n",
        mouse_action(state.mouse_action2)
    ));
    out.push_str(&format!(
        "yabai -m config mouse_drop_action {}\n",
        match state.mouse_drop_action {
            MouseDropAction::Swap => "swap",
            MouseDropAction::Stack => "stack",
        }
    ));
    out.push_str(&format!(
        "yabai -m config layout {}\n",
        match state.layout {
            Layout::Float => "float",
            Layout::Bsp => "bsp",
            Layout::Stack => "stack",
        }
    ));
    out.push_str(&format!("yabai -m config top_padding {}\n", state.padding));
    out.push_str(&format!(
        "yabai -m config bottom_padding {}\n",
        state.padding
    ));
    out.push_str(&format!("yabai -m config left_padding {}\n", state.padding));
    out.push_str(&format!(
        "yabai -m config right_padding {}\n",
        state.padding
    ));
    out.push_str(&format!("yabai -m config window_gap {}\n", state.window_gap));
    out
}

#[cfg(test)]
mod tests {
    use super::{Layout, WindowBalance, YabaiAction, YabaiState, reduce, render};

    /// What: The reducer stores an update even when its UI control would be
    /// dependent-disabled.
    ///
    /// Inputs:
    /// - Default state (external bar disabled); padding update for the bar.
    ///
    /// Output:
    /// - The padding field changes; enablement is presentation-only.
    #[test]
    fn disabled_dependent_field_still_stores_update() {
        let mut state = YabaiState::default();
        assert!(!state.external_bar_enabled);
        let fx = reduce(&mut state, &YabaiAction::SetExternalBarPaddingTop(24));
        assert!(fx.is_empty());
        assert_eq!(state.external_bar_padding_top, 24);
    }

    /// What: Rendering is deterministic and reflects field edits.
    ///
    /// Inputs:
    /// - A state with bsp layout, gap 10, and a custom split ratio.
    ///
    /// Output:
    /// - Identical output across calls; edited values appear verbatim.
    #[test]
    fn render_reflects_state_and_is_deterministic() {
        let mut state = YabaiState::default();
        let _ = reduce(&mut state, &YabaiAction::SetLayout(Layout::Bsp));
        let _ = reduce(&mut state, &YabaiAction::SetWindowGap(10));
        let _ = reduce(&mut state, &YabaiAction::SetWindowBalance(WindowBalance::Custom));
        let _ = reduce(&mut state, &YabaiAction::SetSplitRatio(35.0));
        let doc = render(&state);
        assert_eq!(doc, render(&state));
        assert!(doc.contains("yabai -m config layout bsp\n"));
        assert!(doc.contains("yabai -m config window_gap 10\n"));
        assert!(doc.contains("yabai -m config split_ratio 0.35\n"));
    }

    /// What: The external bar line is omitted until its enable flag is set.
    ///
    /// Inputs:
    /// - Default state, then the same state with the bar enabled.
    ///
    /// Output:
    /// - `external_bar` appears only in the second document.
    #[test]
    fn external_bar_line_gated_by_enable_flag() {
        let mut state = YabaiState::default();
        assert!(!render(&state).contains("external_bar"));
        let _ = reduce(&mut state, &YabaiAction::SetExternalBarEnabled(true));
        let _ = reduce(&mut state, &YabaiAction::SetExternalBarPaddingTop(26));
        assert!(render(&state).contains("yabai -m config external_bar all:26:0\n"));
    }
}
