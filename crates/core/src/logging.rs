//! Structured JSON logging for herald runs.
//!
//! Each process run writes one file, `herald-<run_id>.json`, where the run ID
//! is a UUID v7. Because v7 IDs start with their timestamp, sorting run logs
//! by name sorts them by start time, which is what retention relies on.
//!
//! `tracing_subscriber` formats events as JSON and applies the configured
//! level (or `RUST_LOG` when set). `tracing_appender` moves file writes to a
//! background worker whose buffer is flushed when the [`LogSession`] ends.
//!
//! ```toml
//! [logging]
//! enabled = true
//! level = "info"
//! max-files = 3
//! directory = "logs"
//! ```
//!
//! ```bash
//! RUST_LOG=herald_core::view=trace,info herald scenario.toml
//! ```

use crate::settings::LoggingSettings;
use anyhow::{Context, Error};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const LOG_FILE_PREFIX: &str = "herald-";
const LOG_FILE_EXTENSION: &str = "json";

static RUN_ID: OnceLock<Uuid> = OnceLock::new();

/// Run ID of this process, generated on first access.
///
/// ```
/// use herald_core::logging::run_id;
///
/// assert_eq!(run_id(), run_id());
/// assert_eq!(run_id().get_version_num(), 7);
/// ```
pub fn run_id() -> Uuid {
    *RUN_ID.get_or_init(Uuid::now_v7)
}

/// The directory holding one JSON log file per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLogs {
    dir: PathBuf,
}

impl RunLogs {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        RunLogs { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_name(run_id: Uuid) -> String {
        format!("{LOG_FILE_PREFIX}{run_id}.{LOG_FILE_EXTENSION}")
    }

    pub fn path_for(&self, run_id: Uuid) -> PathBuf {
        self.dir.join(RunLogs::file_name(run_id))
    }

    /// Run IDs of the logs present, oldest first.
    ///
    /// Only `herald-<uuid>.json` files count. Anything else in the directory
    /// is left alone.
    pub fn runs(&self) -> Result<Vec<Uuid>, Error> {
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("can't read log directory {}", self.dir.display()))?;

        let mut runs = Vec::new();
        for entry in entries {
            let entry = entry.context("can't read log directory entry")?;
            if let Some(run_id) = parse_run_id(&entry.file_name().to_string_lossy()) {
                runs.push(run_id);
            }
        }

        runs.sort_by_key(|run_id| run_id.to_string());
        Ok(runs)
    }

    /// Deletes the oldest run logs so that a new run brings the directory to
    /// at most `max_files` logs. `0` keeps everything.
    ///
    /// Returns the run IDs whose logs were removed.
    pub fn make_room(&self, max_files: usize) -> Result<Vec<Uuid>, Error> {
        if max_files == 0 {
            return Ok(Vec::new());
        }

        let runs = self.runs()?;
        let excess = (runs.len() + 1).saturating_sub(max_files);
        let removed: Vec<Uuid> = runs.into_iter().take(excess).collect();

        for run_id in &removed {
            let path = self.path_for(*run_id);
            fs::remove_file(&path)
                .with_context(|| format!("can't remove old log file {}", path.display()))?;
        }

        Ok(removed)
    }
}

fn parse_run_id(file_name: &str) -> Option<Uuid> {
    let stem = file_name
        .strip_prefix(LOG_FILE_PREFIX)?
        .strip_suffix(LOG_FILE_EXTENSION)?
        .strip_suffix('.')?;

    Uuid::try_parse(stem).ok()
}

/// An installed JSON subscriber for this run.
///
/// Dropping the session, or passing it to [`shutdown_logging`], flushes the
/// lines still buffered by the background writer.
#[derive(Debug)]
pub struct LogSession {
    run_id: Uuid,
    path: PathBuf,
    _guard: WorkerGuard,
}

impl LogSession {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Installs the global JSON subscriber for this run.
///
/// A relative `directory` is resolved against `base`, normally the directory
/// of the settings file. Returns `None` when logging is disabled.
///
/// # Errors
///
/// Fails when the log directory can't be created or pruned, the level
/// doesn't parse, or a global subscriber is already installed.
pub fn init_logging(settings: &LoggingSettings, base: &Path) -> Result<Option<LogSession>, Error> {
    if !settings.enabled {
        return Ok(None);
    }

    let filter = build_filter(&settings.level)?;

    let logs = RunLogs::new(settings.log_dir(base));
    fs::create_dir_all(logs.dir())
        .with_context(|| format!("can't create log directory {}", logs.dir().display()))?;
    let pruned = logs.make_room(settings.max_files)?;

    let run_id = run_id();
    let appender = Builder::new()
        .rotation(Rotation::NEVER)
        .filename_prefix(format!("{LOG_FILE_PREFIX}{run_id}"))
        .filename_suffix(LOG_FILE_EXTENSION)
        .build(logs.dir())
        .context("can't open the run log file")?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .with_current_span(true),
        )
        .try_init()
        .context("can't install the tracing subscriber")?;

    let session = LogSession {
        run_id,
        path: logs.path_for(run_id),
        _guard: guard,
    };

    tracing::info!(
        %run_id,
        version = env!("CARGO_PKG_VERSION"),
        log_file = %session.path.display(),
        pruned = pruned.len(),
        "herald run started"
    );

    Ok(Some(session))
}

/// Ends the run: logs the closing event and flushes the writer.
pub fn shutdown_logging(session: Option<LogSession>) {
    if let Some(session) = session {
        tracing::info!(run_id = %session.run_id, "herald run finished");
        drop(session);
    }
}

/// `RUST_LOG` wins over the configured level. A blank level means `info`.
fn build_filter(level: &str) -> Result<EnvFilter, Error> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = match level.trim() {
        "" => "info",
        level => level,
    };

    EnvFilter::builder()
        .parse(level)
        .with_context(|| format!("invalid logging level {level:?}"))
}
