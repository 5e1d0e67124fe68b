//! yabset binary entrypoint kept minimal. The full runtime lives in `app`.

mod app;
mod command;
mod effects;
mod hotkeys;
mod paths;
mod persist;
mod reducer;
mod state;

use std::sync::OnceLock;
use std::{fmt, time::SystemTime};

use clap::Parser;

/// Formats log timestamps as `YYYY-MM-DD HH:MM:SS` (UTC) without a date
/// crate.
struct YabsetTimer;

/// Leap-year test for the timestamp formatter.
const fn is_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Convert unix seconds to `YYYY-MM-DD HH:MM:SS` (UTC).
fn ts_to_date(mut t: i64) -> String {
    if t < 0 {
        t = 0;
    }
    let mut days = t / 86_400;
    let sod = t % 86_400;
    let hour = sod / 3600;
    let minute = (sod % 3600) / 60;
    let second = sod % 60;

    let mut year: i32 = 1970;
    loop {
        let diy: i64 = if is_leap(year) { 366 } else { 365 };
        if days >= diy {
            days -= diy;
            year += 1;
        } else {
            break;
        }
    }
    let mdays = [
        31,
        if is_leap(year) { 29 } else { 28 },
        31,
        30,
        31,
        30,
        31,
        31,
        30,
        31,
        30,
        31,
    ];
    let mut month = 1usize;
    for dim in mdays {
        if days >= dim {
            days -= dim;
            month += 1;
        } else {
            break;
        }
    }
    format!(
        "{year:04}-{month:02}-{:02} {hour:02}:{minute:02}:{second:02}",
        days + 1
    )
}

impl tracing_subscriber::fmt::time::FormatTime for YabsetTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let secs = match SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
            Ok(d) => d.as_secs() as i64,
            Err(_) => 0,
        };
        w.write_str(&ts_to_date(secs))
    }
}

/// Keeps the non-blocking log writer alive for the process lifetime.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Preferences engine for the yabai window manager and the skhd hotkey
/// daemon.
#[derive(Debug, Parser)]
#[command(name = "yabset", version, about)]
struct Cli {
    /// Log external commands instead of running them.
    #[arg(long, global = true)]
    dry_run: bool,
    /// What to do; defaults to `status`.
    #[command(subcommand)]
    command: Option<app::CliCommand>,
}

/// Initialize tracing: file appender under the config dir, stderr fallback.
fn init_logging() {
    let mut log_path = paths::logs_dir();
    log_path.push("yabset.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(YabsetTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: init stderr logger to avoid blocking startup
            let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(true)
                .with_timer(YabsetTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(app::CliCommand::Status);
    tracing::info!(dry_run = cli.dry_run, command = ?command, "yabset starting");
    if let Err(err) = app::run(command, cli.dry_run).await {
        tracing::error!(error = ?err, "command failed");
        eprintln!("yabset: {err}");
        std::process::exit(1);
    }
    tracing::info!("yabset exited");
}

#[cfg(test)]
mod tests {
    /// What: The timestamp formatter handles epoch boundaries and leap days.
    ///
    /// Inputs:
    /// - Zero, a known leap-day instant, and a recent timestamp.
    ///
    /// Output:
    /// - Exact `YYYY-MM-DD HH:MM:SS` strings.
    #[test]
    fn ts_to_date_formats_known_instants() {
        assert_eq!(super::ts_to_date(0), "1970-01-01 00:00:00");
        // 2024-02-29 12:00:00 UTC
        assert_eq!(super::ts_to_date(1_709_208_000), "2024-02-29 12:00:00");
    }

    /// What: FormatTime impl writes a non-empty timestamp without panicking
    ///
    /// - Input: Tracing writer buffer
    /// - Output: Buffer receives some content
    #[test]
    fn yabset_timer_formats_time_without_panic() {
        use tracing_subscriber::fmt::time::FormatTime;
        let mut buf = String::new();
        let mut writer = tracing_subscriber::fmt::format::Writer::new(&mut buf);
        let t = super::YabsetTimer;
        let _ = t.format_time(&mut writer);
        assert!(!buf.is_empty());
    }
}
