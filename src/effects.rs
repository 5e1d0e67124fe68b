//! Effect descriptors and the scheduler that executes them.
//!
//! Reducers return effect descriptors instead of performing I/O. The
//! scheduler spawns each descriptor as its own tokio task, so a reduction
//! step never blocks on disk or child processes, and wraps each outcome in
//! exactly one follow-up action that re-enters the dispatch queue. Effects
//! from one step carry no ordering guarantee relative to each other.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::command::{ExternalCommand, Tool, query_version, run_external};
use crate::hotkeys::{BindingService, ShortcutName, apply_bindings};
use crate::state::types::KeyCombo;
use crate::state::{BrewAction, Domain, RootAction, Snapshot};
use crate::{paths, persist};

/// One unit of asynchronous work requested by a reducer.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Load a domain's snapshot from disk.
    Load(Domain),
    /// Persist a domain snapshot (write-through save).
    Save {
        /// Target domain.
        domain: Domain,
        /// The state to persist, captured at reduction time.
        snapshot: Snapshot,
    },
    /// Write a rendered document to its external target path.
    Export {
        /// Target domain.
        domain: Domain,
        /// The rendered text, captured at reduction time.
        text: String,
    },
    /// Invoke a named external command.
    Run(ExternalCommand),
    /// Query an external daemon's installed version.
    QueryVersion(Tool),
    /// Re-register hotkey bindings with the external binding service.
    ApplyBindings(Vec<(ShortcutName, KeyCombo)>),
}

/// A message on the dispatch queue: either a fresh action or the follow-up
/// from a completed effect. The distinction only matters for the store's
/// in-flight bookkeeping; both reduce identically.
#[derive(Debug)]
pub enum Msg {
    /// A freshly dispatched action.
    Dispatch(RootAction),
    /// An effect's follow-up action.
    Completion(RootAction),
}

/// Executes effect descriptors off the synchronous dispatch path.
#[derive(Clone)]
pub struct EffectScheduler {
    /// Follow-up actions are sent back through the dispatch queue.
    tx: mpsc::UnboundedSender<Msg>,
    /// The external hotkey registration service.
    bindings: Arc<dyn BindingService>,
    /// Skip external commands, reporting success.
    dry_run: bool,
}

impl EffectScheduler {
    /// Build a scheduler feeding completions into `tx`.
    #[must_use]
    pub fn new(
        tx: mpsc::UnboundedSender<Msg>,
        bindings: Arc<dyn BindingService>,
        dry_run: bool,
    ) -> Self {
        Self {
            tx,
            bindings,
            dry_run,
        }
    }

    /// Spawn every effect of one reduction step. Returns how many were
    /// scheduled so the store can track in-flight work.
    pub fn schedule(&self, effects: Vec<Effect>) -> usize {
        let count = effects.len();
        for effect in effects {
            let tx = self.tx.clone();
            let bindings = Arc::clone(&self.bindings);
            let dry_run = self.dry_run;
            tokio::spawn(async move {
                let follow_up = execute(effect, bindings.as_ref(), dry_run).await;
                // Receiver gone means the store shut down; nothing to do.
                let _ = tx.send(Msg::Completion(follow_up));
            });
        }
        count
    }
}

/// Execute one effect and fold its outcome into the follow-up action.
async fn execute(effect: Effect, bindings: &dyn BindingService, dry_run: bool) -> RootAction {
    match effect {
        Effect::Load(domain) => {
            let path = paths::snapshot_path(domain);
            let result = match domain {
                Domain::Yabai => persist::load_snapshot(&path).await.map(Snapshot::Yabai),
                Domain::Skhd => persist::load_snapshot(&path).await.map(Snapshot::Skhd),
                Domain::Animations => {
                    persist::load_snapshot(&path).await.map(Snapshot::Animations)
                }
            };
            if let Err(e) = &result {
                tracing::warn!(%domain, error = %e, "snapshot load failed");
            }
            RootAction::LoadCompleted(domain, result)
        }

        Effect::Save { domain, snapshot } => {
            let path = paths::snapshot_path(domain);
            let result = match &snapshot {
                Snapshot::Yabai(s) => persist::save_snapshot(&path, s).await,
                Snapshot::Skhd(s) => persist::save_snapshot(&path, s).await,
                Snapshot::Animations(s) => persist::save_snapshot(&path, s).await,
            };
            match &result {
                Ok(()) => tracing::debug!(%domain, path = %path.display(), "snapshot saved"),
                Err(e) => tracing::error!(%domain, error = %e, "snapshot save failed"),
            }
            RootAction::SaveCompleted(domain, result)
        }

        Effect::Export { domain, text } => {
            let path = paths::export_path(domain);
            let result = persist::export_document(&path, &text).await;
            match &result {
                Ok(()) => {
                    tracing::info!(%domain, path = %path.display(), bytes = text.len(), "document exported");
                }
                Err(e) => tracing::error!(%domain, error = %e, "document export failed"),
            }
            RootAction::ExportCompleted(domain, result)
        }

        Effect::Run(cmd) => {
            let result = run_external(cmd, dry_run);
            if let Err(e) = &result {
                tracing::error!(command = ?cmd, error = %e, "external command failed");
            }
            RootAction::CommandCompleted(result)
        }

        Effect::QueryVersion(tool) => {
            let version = query_version(tool);
            RootAction::Brew(BrewAction::VersionResolved(tool, version))
        }

        Effect::ApplyBindings(table) => {
            apply_bindings(bindings, &table);
            tracing::info!(count = table.len(), "default hotkey bindings registered");
            RootAction::CommandCompleted(Ok(()))
        }
    }
}
