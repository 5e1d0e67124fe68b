//! Filesystem locations for snapshots, export targets, and logs.
//!
//! Snapshots live under `$HOME/.config/yabset` (XDG fallback); export targets
//! are the fixed paths the external daemons read their configuration from.

use std::env;
use std::path::PathBuf;

use crate::state::Domain;

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// User's home directory, falling back to the current directory when unset.
fn home_dir() -> PathBuf {
    env::var("HOME").map_or_else(|_| PathBuf::from("."), PathBuf::from)
}

/// Config directory for yabset (ensured to exist): `$HOME/.config/yabset`
/// with an `XDG_CONFIG_HOME` fallback.
pub fn config_dir() -> PathBuf {
    let base = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]);
    let dir = base.join("yabset");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Logs directory under config: `$HOME/.config/yabset/logs` (ensured to exist).
pub fn logs_dir() -> PathBuf {
    let base = config_dir();
    let dir = base.join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Path of the persisted JSON snapshot for a domain.
pub fn snapshot_path(domain: Domain) -> PathBuf {
    let name = match domain {
        Domain::Yabai => "yabai.json",
        Domain::Skhd => "skhd.json",
        Domain::Animations => "animations.json",
    };
    config_dir().join(name)
}

/// Path of the rendered document a domain's external tool reads.
///
/// yabai and skhd read dotfiles directly from the home directory; the
/// animations script lives next to the snapshots because nothing external
/// watches it, it is only executed on demand.
pub fn export_path(domain: Domain) -> PathBuf {
    match domain {
        Domain::Yabai => home_dir().join(".yabairc"),
        Domain::Skhd => home_dir().join(".skhdrc"),
        Domain::Animations => config_dir().join("animations.sh"),
    }
}
