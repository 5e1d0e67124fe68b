//! External command invocation and daemon version queries.
//!
//! Commands are fire-and-forget from the engine's point of view: only
//! success or failure is observed, never structured output. Version queries
//! locate the binary on PATH first and report absence as `None` rather than
//! an error.

use std::process::Command;

use thiserror::Error;

use crate::paths;

/// Why an external command invocation failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The process could not be launched at all.
    #[error("cannot launch {program}: {message}")]
    Launch {
        /// Program name.
        program: String,
        /// Underlying spawn error text.
        message: String,
    },
    /// The process ran and exited non-zero.
    #[error("{program} exited with {status}")]
    Failed {
        /// Program name.
        program: String,
        /// Exit status text.
        status: String,
    },
}

/// The external daemons this engine manages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    /// The tiling window manager.
    Yabai,
    /// The hotkey daemon.
    Skhd,
}

impl Tool {
    /// Binary name on PATH.
    #[must_use]
    pub const fn binary(self) -> &'static str {
        match self {
            Self::Yabai => "yabai",
            Self::Skhd => "skhd",
        }
    }
}

/// The named external commands the engine can invoke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExternalCommand {
    /// Restart the window-manager daemon.
    RestartYabai,
    /// Restart the hotkey daemon.
    RestartSkhd,
    /// Execute the exported animation script.
    ApplyAnimations,
}

/// Run one process and fold its outcome into a `CommandError` on failure.
fn run_checked(program: &str, args: &[&str]) -> Result<(), CommandError> {
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| CommandError::Launch {
            program: program.to_string(),
            message: e.to_string(),
        })?;
    if status.success() {
        Ok(())
    } else {
        Err(CommandError::Failed {
            program: program.to_string(),
            status: status.to_string(),
        })
    }
}

/// Invoke one named external command, observing only success/failure.
///
/// `dry_run` logs the invocation and reports success without touching the
/// system.
pub fn run_external(cmd: ExternalCommand, dry_run: bool) -> Result<(), CommandError> {
    if dry_run {
        tracing::info!(command = ?cmd, "dry-run: skipping external command");
        return Ok(());
    }
    match cmd {
        ExternalCommand::RestartYabai => run_checked("yabai", &["--restart-service"]),
        ExternalCommand::RestartSkhd => run_checked("skhd", &["--restart-service"]),
        ExternalCommand::ApplyAnimations => {
            let script = paths::export_path(crate::state::Domain::Animations);
            run_checked("sh", &[&script.display().to_string()])
        }
    }
}

/// Query a daemon's installed version.
///
/// Returns `None` when the binary is not on PATH or does not answer `-v`;
/// absence is an answer here, not an error.
#[must_use]
pub fn query_version(tool: Tool) -> Option<String> {
    let binary = which::which(tool.binary()).ok()?;
    let out = Command::new(binary).arg("-v").output().ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&out.stdout);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
