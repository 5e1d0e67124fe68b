//! Root reducer: pullback composition of the domain reducers plus the
//! root-level cases.
//!
//! Each domain reducer is lifted into the root via an explicit
//! (state-accessor, action-filter, reducer) triple and the lifted reducers
//! are applied in a fixed order from a static dispatch table. A lifted
//! reducer only ever touches its own substate and only fires for its own
//! action tag; everything else is a no-op by construction.

use std::sync::OnceLock;

use crate::effects::Effect;
use crate::hotkeys;
use crate::state::{
    AnimationsState, Domain, RootAction, RootState, SkhdState, Snapshot, YabaiState, animations,
    brew, onboarding, skhd, yabai,
};

/// A domain reducer lifted to root scope. Returns `None` when the action is
/// not addressed to the domain.
type Lifted = Box<dyn Fn(&mut RootState, &RootAction) -> Option<Vec<Effect>> + Send + Sync>;

/// Lift a domain reducer into the root via a state accessor and an action
/// prism.
///
/// The returned reducer mutates only the substate the accessor exposes, and
/// only when the prism matches the action tag.
fn pullback<S: 'static, A: 'static>(
    accessor: fn(&mut RootState) -> &mut S,
    prism: fn(&RootAction) -> Option<&A>,
    reduce: fn(&mut S, &A) -> Vec<Effect>,
) -> Lifted {
    Box::new(move |root, action| prism(action).map(|sub| reduce(accessor(root), sub)))
}

/// The ordered dispatch table of lifted domain reducers.
fn dispatch_table() -> &'static [Lifted] {
    static TABLE: OnceLock<Vec<Lifted>> = OnceLock::new();
    TABLE.get_or_init(|| {
        vec![
            pullback(
                |root| &mut root.yabai,
                |action| match action {
                    RootAction::Yabai(a) => Some(a),
                    _ => None,
                },
                yabai::reduce,
            ),
            pullback(
                |root| &mut root.skhd,
                |action| match action {
                    RootAction::Skhd(a) => Some(a),
                    _ => None,
                },
                skhd::reduce,
            ),
            pullback(
                |root| &mut root.animations,
                |action| match action {
                    RootAction::Animations(a) => Some(a),
                    _ => None,
                },
                animations::reduce,
            ),
            pullback(
                |root| &mut root.brew,
                |action| match action {
                    RootAction::Brew(a) => Some(a),
                    _ => None,
                },
                brew::reduce,
            ),
            pullback(
                |root| &mut root.onboarding,
                |action| match action {
                    RootAction::Onboarding(a) => Some(a),
                    _ => None,
                },
                onboarding::reduce,
            ),
        ]
    })
}

/// Which persisted domain, if any, a domain-scoped action belongs to.
const fn persisted_target(action: &RootAction) -> Option<Domain> {
    match action {
        RootAction::Yabai(_) => Some(Domain::Yabai),
        RootAction::Skhd(_) => Some(Domain::Skhd),
        RootAction::Animations(_) => Some(Domain::Animations),
        _ => None,
    }
}

/// Clone the current value of a persisted domain as a typed snapshot.
fn snapshot_of(state: &RootState, domain: Domain) -> Snapshot {
    match domain {
        Domain::Yabai => Snapshot::Yabai(state.yabai.clone()),
        Domain::Skhd => Snapshot::Skhd(state.skhd.clone()),
        Domain::Animations => Snapshot::Animations(state.animations.clone()),
    }
}

/// Render a domain's document under the global enabled policy.
///
/// Disabled means every export target gets the empty document; the files are
/// neither deleted nor renamed.
#[must_use]
pub fn render_document(state: &RootState, domain: Domain) -> String {
    if !state.ui.enabled {
        return String::new();
    }
    match domain {
        Domain::Yabai => yabai::render(&state.yabai),
        Domain::Skhd => skhd::render(&state.skhd),
        Domain::Animations => animations::render(&state.animations),
    }
}

/// Reduce one action against the root state, returning the effects to
/// schedule.
///
/// Deterministic and free of I/O: every side effect is expressed as a
/// returned descriptor. Domain reducers run first (each behind its own
/// pullback), then write-through save detection, then the root-level case.
pub fn reduce(state: &mut RootState, action: &RootAction) -> Vec<Effect> {
    let mut effects = Vec::new();

    let target = persisted_target(action);
    let before = target.map(|d| snapshot_of(state, d));

    for lifted in dispatch_table() {
        if let Some(fx) = lifted(state, action) {
            effects.extend(fx);
        }
    }

    // Write-through: persist a domain whenever one of its actions changed it.
    if let (Some(domain), Some(before)) = (target, before) {
        let after = snapshot_of(state, domain);
        if after != before {
            effects.push(Effect::Save {
                domain,
                snapshot: after,
            });
        }
    }

    effects.extend(reduce_root(state, action));
    effects
}

/// The root-level reducer case: load/export requests, reset confirmation,
/// the global toggles, and effect completions.
fn reduce_root(state: &mut RootState, action: &RootAction) -> Vec<Effect> {
    match action {
        RootAction::RequestLoad(domain) => vec![Effect::Load(*domain)],

        RootAction::RequestExport(domain) => vec![Effect::Export {
            domain: *domain,
            text: render_document(state, *domain),
        }],

        RootAction::ShowResetConfirmation => {
            state.ui.confirming_reset = true;
            Vec::new()
        }

        RootAction::DismissReset => {
            state.ui.confirming_reset = false;
            Vec::new()
        }

        RootAction::ConfirmReset => {
            state.yabai = YabaiState::default();
            state.skhd = SkhdState::default();
            state.animations = AnimationsState::default();
            state.ui.confirming_reset = false;
            state.ui.error.clear();
            let mut effects = vec![Effect::ApplyBindings(hotkeys::default_bindings())];
            for domain in Domain::ALL {
                effects.push(Effect::Save {
                    domain,
                    snapshot: snapshot_of(state, domain),
                });
            }
            effects
        }

        RootAction::ToggleApplying => {
            state.ui.applying_changes = !state.ui.applying_changes;
            Vec::new()
        }

        RootAction::ToggleEnabled => {
            state.ui.enabled = !state.ui.enabled;
            let mut effects: Vec<Effect> = Domain::ALL
                .into_iter()
                .map(|domain| Effect::Export {
                    domain,
                    text: render_document(state, domain),
                })
                .collect();
            effects.push(Effect::Run(crate::command::ExternalCommand::RestartYabai));
            effects
        }

        RootAction::LoadCompleted(_, Ok(snapshot)) => {
            match snapshot {
                Snapshot::Yabai(s) => state.yabai = s.clone(),
                Snapshot::Skhd(s) => state.skhd = s.clone(),
                Snapshot::Animations(s) => state.animations = s.clone(),
            }
            state.ui.error.clear();
            Vec::new()
        }
        RootAction::LoadCompleted(domain, Err(e)) => {
            state.ui.error = format!("load {domain}: {e}");
            Vec::new()
        }

        RootAction::SaveCompleted(_, Ok(())) | RootAction::ExportCompleted(_, Ok(())) => {
            state.ui.error.clear();
            Vec::new()
        }
        RootAction::SaveCompleted(domain, Err(e)) => {
            state.ui.error = format!("save {domain}: {e}");
            Vec::new()
        }
        RootAction::ExportCompleted(domain, Err(e)) => {
            state.ui.error = format!("export {domain}: {e}");
            Vec::new()
        }

        RootAction::CommandCompleted(Ok(())) => {
            state.ui.error.clear();
            Vec::new()
        }
        RootAction::CommandCompleted(Err(e)) => {
            state.ui.error = e.to_string();
            Vec::new()
        }

        // Domain-scoped actions were already handled by the dispatch table.
        RootAction::Yabai(_)
        | RootAction::Skhd(_)
        | RootAction::Animations(_)
        | RootAction::Brew(_)
        | RootAction::Onboarding(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{reduce, render_document};
    use crate::effects::Effect;
    use crate::persist::LoadError;
    use crate::state::yabai::Layout;
    use crate::state::{
        Domain, OnboardingAction, RootAction, RootState, Snapshot, YabaiAction, YabaiState,
    };

    /// What: A domain action that changes state schedules exactly one
    /// write-through save carrying the new snapshot.
    ///
    /// Inputs:
    /// - `SetWindowBorderWidth(12.0)` against defaults.
    ///
    /// Output:
    /// - One `Save` effect for the yabai domain whose snapshot has the new
    ///   width.
    #[test]
    fn changed_domain_action_schedules_save() {
        let mut state = RootState::default();
        let fx = reduce(
            &mut state,
            &RootAction::Yabai(YabaiAction::SetWindowBorderWidth(12.0)),
        );
        assert_eq!(fx.len(), 1);
        match &fx[0] {
            Effect::Save {
                domain: Domain::Yabai,
                snapshot: Snapshot::Yabai(s),
            } => assert!((s.window_border_width - 12.0).abs() < f32::EPSILON),
            other => panic!("expected yabai save, got {other:?}"),
        }
    }

    /// What: A domain action that leaves state unchanged schedules nothing.
    ///
    /// Inputs:
    /// - `SetLayout(Float)` when the layout already is float.
    ///
    /// Output:
    /// - No effects.
    #[test]
    fn unchanged_domain_action_schedules_nothing() {
        let mut state = RootState::default();
        let fx = reduce(&mut state, &RootAction::Yabai(YabaiAction::SetLayout(Layout::Float)));
        assert!(fx.is_empty());
    }

    /// What: Actions of one domain never leak into another (no cross-domain
    /// state changes).
    ///
    /// Inputs:
    /// - An onboarding action.
    ///
    /// Output:
    /// - Only the onboarding substate differs from defaults afterwards.
    #[test]
    fn foreign_actions_leave_other_domains_unchanged() {
        let mut state = RootState::default();
        let _ = reduce(&mut state, &RootAction::Onboarding(OnboardingAction::Next));
        let defaults = RootState::default();
        assert_ne!(state.onboarding, defaults.onboarding);
        assert_eq!(state.yabai, defaults.yabai);
        assert_eq!(state.skhd, defaults.skhd);
        assert_eq!(state.animations, defaults.animations);
        assert_eq!(state.brew, defaults.brew);
        assert_eq!(state.ui, defaults.ui);
    }

    /// What: Disabled rendering yields the empty document for every domain,
    /// regardless of state.
    ///
    /// Inputs:
    /// - A heavily edited state with `ui.enabled = false`.
    ///
    /// Output:
    /// - All three rendered documents are empty.
    #[test]
    fn disabled_policy_renders_empty_documents() {
        let mut state = RootState::default();
        let _ = reduce(&mut state, &RootAction::Yabai(YabaiAction::SetLayout(Layout::Bsp)));
        state.ui.enabled = false;
        for domain in Domain::ALL {
            assert_eq!(render_document(&state, domain), "");
        }
    }

    /// What: Toggling enabled re-exports every domain under the new policy
    /// and schedules exactly one restart command.
    ///
    /// Inputs:
    /// - `ToggleEnabled` from the default (enabled) state, then again.
    ///
    /// Output:
    /// - First toggle: three empty exports plus a run effect. Second toggle:
    ///   three non-empty exports reflecting current state plus a run effect.
    #[test]
    fn toggle_enabled_reexports_all_domains() {
        let mut state = RootState::default();
        let fx = reduce(&mut state, &RootAction::ToggleEnabled);
        assert!(!state.ui.enabled);
        let exports: Vec<_> = fx
            .iter()
            .filter_map(|e| match e {
                Effect::Export { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(exports, vec!["", "", ""]);
        assert_eq!(
            fx.iter().filter(|e| matches!(e, Effect::Run(_))).count(),
            1
        );

        let fx = reduce(&mut state, &RootAction::ToggleEnabled);
        assert!(state.ui.enabled);
        assert!(fx.iter().all(|e| match e {
            Effect::Export { text, .. } => !text.is_empty(),
            Effect::Run(_) => true,
            _ => false,
        }));
    }

    /// What: Confirm-reset restores exact defaults for the three persisted
    /// domains and clears the confirmation flag and any prior error.
    ///
    /// Inputs:
    /// - A state with an edited layout, a pending confirmation, and an error.
    ///
    /// Output:
    /// - Domain states equal defaults; flag and error cleared; the default
    ///   binding table and three saves are scheduled.
    #[test]
    fn confirm_reset_restores_defaults_and_clears_ui() {
        let mut state = RootState::default();
        let _ = reduce(&mut state, &RootAction::Yabai(YabaiAction::SetLayout(Layout::Stack)));
        let _ = reduce(&mut state, &RootAction::ShowResetConfirmation);
        state.ui.error = "previous failure".into();
        assert!(state.ui.confirming_reset);

        let fx = reduce(&mut state, &RootAction::ConfirmReset);
        assert_eq!(state.yabai, YabaiState::default());
        assert!(!state.ui.confirming_reset);
        assert!(state.ui.error.is_empty());
        assert!(matches!(fx[0], Effect::ApplyBindings(_)));
        assert_eq!(
            fx.iter()
                .filter(|e| matches!(e, Effect::Save { .. }))
                .count(),
            3
        );
    }

    /// What: Dismissing the reset clears the flag without touching domains.
    ///
    /// Inputs:
    /// - Edited yabai state with a pending confirmation.
    ///
    /// Output:
    /// - Flag cleared; edit survives.
    #[test]
    fn dismiss_reset_keeps_domain_state() {
        let mut state = RootState::default();
        let _ = reduce(&mut state, &RootAction::Yabai(YabaiAction::SetPadding(5)));
        let _ = reduce(&mut state, &RootAction::ShowResetConfirmation);
        let fx = reduce(&mut state, &RootAction::DismissReset);
        assert!(fx.is_empty());
        assert!(!state.ui.confirming_reset);
        assert_eq!(state.yabai.padding, 5);
    }

    /// What: Completion actions only touch the transient error field.
    ///
    /// Inputs:
    /// - A failed load completion, then a successful save completion.
    ///
    /// Output:
    /// - Error set with a load message, then cleared; domain state never
    ///   changes.
    #[test]
    fn completions_only_touch_error_field() {
        let mut state = RootState::default();
        let _ = reduce(
            &mut state,
            &RootAction::LoadCompleted(
                Domain::Yabai,
                Err(LoadError::Missing {
                    path: "~/.config/yabset/yabai.json".into(),
                }),
            ),
        );
        assert!(state.ui.error.contains("load yabai"));
        assert_eq!(state.yabai, YabaiState::default());

        let _ = reduce(&mut state, &RootAction::SaveCompleted(Domain::Yabai, Ok(())));
        assert!(state.ui.error.is_empty());
    }

    /// What: A successful load replaces the domain state wholesale.
    ///
    /// Inputs:
    /// - A `LoadCompleted` carrying a bsp-layout snapshot.
    ///
    /// Output:
    /// - The yabai substate equals the snapshot; other domains untouched.
    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn successful_load_replaces_domain_state() {
        let mut state = RootState::default();
        let mut loaded = YabaiState::default();
        loaded.layout = Layout::Bsp;
        loaded.window_gap = 6;
        let _ = reduce(
            &mut state,
            &RootAction::LoadCompleted(Domain::Yabai, Ok(Snapshot::Yabai(loaded.clone()))),
        );
        assert_eq!(state.yabai, loaded);
        assert_eq!(state.skhd, RootState::default().skhd);
    }
}
