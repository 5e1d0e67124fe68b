//! Application runtime: the store that owns the root state and the dispatch
//! loop, plus the CLI command glue.
//!
//! The store is the single logical owner of [`RootState`]. Actions reduce
//! synchronously, one at a time, in submission order; the effects they return
//! are spawned through the [`EffectScheduler`] and their completions re-enter
//! the same queue as ordinary actions. A completion from action N may
//! therefore interleave with a freshly dispatched action N+1, which is fine:
//! no reducer step depends on more than "my own effect's result arrives
//! eventually".

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::effects::{EffectScheduler, Msg};
use crate::hotkeys::{BindingService, NullBindingService};
use crate::reducer;
use crate::state::{BrewAction, Domain, RootAction, RootState};

/// Errors bubbled out of the runtime entrypoint.
type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Single owner of the root state and the dispatch queue.
pub struct Store {
    /// The composed root state. Mutated only inside `reduce`.
    state: RootState,
    /// Dispatch queue receiver (fresh actions and effect completions).
    rx: mpsc::UnboundedReceiver<Msg>,
    /// Sender handle for external dispatchers.
    tx: mpsc::UnboundedSender<Msg>,
    /// Executes effects off the synchronous path.
    scheduler: EffectScheduler,
    /// Effects scheduled but not yet completed.
    in_flight: usize,
}

impl Store {
    /// Build a store with default state and the given binding service.
    #[must_use]
    pub fn new(bindings: Arc<dyn BindingService>, dry_run: bool) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = EffectScheduler::new(tx.clone(), bindings, dry_run);
        Self {
            state: RootState::default(),
            rx,
            tx,
            scheduler,
            in_flight: 0,
        }
    }

    /// Read access to the current root state.
    #[must_use]
    pub const fn state(&self) -> &RootState {
        &self.state
    }

    /// A sender that feeds actions into the dispatch queue from outside.
    #[must_use]
    pub fn sender(&self) -> mpsc::UnboundedSender<Msg> {
        self.tx.clone()
    }

    /// Reduce one action and schedule the effects it returns.
    pub fn dispatch(&mut self, action: RootAction) {
        tracing::debug!(action = ?action, "dispatch");
        let effects = reducer::reduce(&mut self.state, &action);
        self.in_flight += self.scheduler.schedule(effects);
    }

    /// Process queued messages until no effect is in flight and the queue is
    /// drained.
    ///
    /// Completions decrement the in-flight count before reducing, and the
    /// reduction may schedule new effects, so the loop naturally follows
    /// chains like load → reduce → write-through save → save completion.
    pub async fn run_until_settled(&mut self) {
        loop {
            // Drain whatever is already queued without blocking.
            while let Ok(msg) = self.rx.try_recv() {
                self.handle(msg);
            }
            if self.in_flight == 0 {
                return;
            }
            match self.rx.recv().await {
                Some(msg) => self.handle(msg),
                None => return,
            }
        }
    }

    /// Reduce one queue message.
    fn handle(&mut self, msg: Msg) {
        match msg {
            Msg::Dispatch(action) => self.dispatch(action),
            Msg::Completion(action) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.dispatch(action);
            }
        }
    }
}

/// The CLI surface.
#[derive(Clone, Debug, clap::Subcommand)]
pub enum CliCommand {
    /// Load snapshots, export every document, apply animations, restart the
    /// daemons.
    Apply,
    /// Load snapshots and export every document without restarting anything.
    Export,
    /// Enable the engine: export full documents and restart the daemon.
    Enable,
    /// Disable the engine: export empty documents and restart the daemon.
    Disable,
    /// Reset window-manager, hotkey, and animation settings to defaults.
    Reset {
        /// Skip the confirmation.
        #[arg(long)]
        yes: bool,
    },
    /// Show daemon versions and engine status.
    Status,
    /// Set a single option, e.g. `set layout bsp` or `set window-gap 10`.
    Set {
        /// Option name: layout, padding, window-gap, or border-width.
        key: String,
        /// New value.
        value: String,
    },
}

/// Dispatch the startup sequence: a load for every persisted domain plus the
/// daemon version queries, then settle.
async fn load_all(store: &mut Store) {
    for domain in Domain::ALL {
        store.dispatch(RootAction::RequestLoad(domain));
    }
    store.dispatch(RootAction::Brew(BrewAction::QueryVersions));
    store.run_until_settled().await;
}

/// Dispatch an export for every persisted domain.
fn export_all(store: &mut Store) {
    for domain in Domain::ALL {
        store.dispatch(RootAction::RequestExport(domain));
    }
}

/// Parse and dispatch one `set` edit.
fn dispatch_set(store: &mut Store, key: &str, value: &str) -> Result<()> {
    use crate::state::YabaiAction;
    use crate::state::yabai::Layout;

    let action = match key {
        "layout" => {
            let layout = match value {
                "float" => Layout::Float,
                "bsp" => Layout::Bsp,
                "stack" => Layout::Stack,
                other => return Err(format!("unknown layout '{other}'").into()),
            };
            YabaiAction::SetLayout(layout)
        }
        "padding" => YabaiAction::SetPadding(value.parse()?),
        "window-gap" => YabaiAction::SetWindowGap(value.parse()?),
        "border-width" => YabaiAction::SetWindowBorderWidth(value.parse()?),
        other => return Err(format!("unknown option '{other}'").into()),
    };
    store.dispatch(RootAction::Yabai(action));
    Ok(())
}

/// Run one CLI command to completion.
///
/// Every command starts from persisted snapshots (defaults when absent),
/// drives the store until all effects settle, and reports the last error, if
/// any, as the process outcome.
pub async fn run(command: CliCommand, dry_run: bool) -> Result<()> {
    let is_status = matches!(command, CliCommand::Status);
    let mut store = Store::new(Arc::new(NullBindingService), dry_run);
    // Startup loads overwrite defaults when snapshots exist; a missing
    // snapshot leaves defaults in place and an error message that the first
    // successful save or export clears again.
    load_all(&mut store).await;

    match command {
        CliCommand::Apply => {
            store.dispatch(RootAction::ToggleApplying);
            export_all(&mut store);
            store.dispatch(RootAction::Brew(BrewAction::ApplyAnimations));
            store.dispatch(RootAction::Brew(BrewAction::RestartYabai));
            store.dispatch(RootAction::Brew(BrewAction::RestartSkhd));
            store.run_until_settled().await;
            store.dispatch(RootAction::ToggleApplying);
        }
        CliCommand::Export => {
            export_all(&mut store);
            store.run_until_settled().await;
        }
        CliCommand::Enable | CliCommand::Disable => {
            let want_enabled = matches!(command, CliCommand::Enable);
            if store.state().ui.enabled == want_enabled {
                // Already in the requested mode: refresh the documents under
                // the current policy instead of toggling twice.
                export_all(&mut store);
            } else {
                store.dispatch(RootAction::ToggleEnabled);
            }
            store.run_until_settled().await;
        }
        CliCommand::Reset { yes } => {
            store.dispatch(RootAction::ShowResetConfirmation);
            if yes {
                store.dispatch(RootAction::ConfirmReset);
                export_all(&mut store);
                store.run_until_settled().await;
                println!("settings reset to defaults");
            } else {
                store.dispatch(RootAction::DismissReset);
                println!("pass --yes to confirm resetting all settings");
            }
        }
        CliCommand::Status => {
            // Versions were already queried at startup.
            let state = store.state();
            println!(
                "yabai: {}",
                state.brew.yabai_version.as_deref().unwrap_or("not installed")
            );
            println!(
                "skhd:  {}",
                state.brew.skhd_version.as_deref().unwrap_or("not installed")
            );
            println!(
                "engine: {}",
                if state.ui.enabled { "enabled" } else { "disabled" }
            );
            if !state.ui.error.is_empty() {
                println!("last error: {}", state.ui.error);
            }
        }
        CliCommand::Set { key, value } => {
            dispatch_set(&mut store, &key, &value)?;
            store.run_until_settled().await;
        }
    }

    let err = &store.state().ui.error;
    if err.is_empty() || is_status {
        Ok(())
    } else {
        Err(err.clone().into())
    }
}
