//! Process logging bootstrap.
//!
//! # Responsibility
//! - Initialize file-based rolling logs exactly once per process.
//! - Capture panics as sanitized log events.
//!
//! # Invariants
//! - Repeated init with an identical configuration is a no-op.
//! - Init with a different level or directory is rejected, never applied.
//! - Initialization never panics.

use crate::config::LoggingConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "netra";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;
const SUPPORTED_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    level: &'static str,
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

/// Logging bootstrap failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoggingError {
    UnsupportedLevel(String),
    InvalidDirectory(String),
    /// Logging is already active with a different level or directory.
    Conflict {
        active: String,
        requested: String,
    },
    Backend(String),
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected {}",
                SUPPORTED_LEVELS.join("|")
            ),
            Self::InvalidDirectory(message) => write!(f, "invalid log directory: {message}"),
            Self::Conflict { active, requested } => write!(
                f,
                "logging already initialized with {active}; refusing to switch to {requested}"
            ),
            Self::Backend(message) => write!(f, "failed to start logger: {message}"),
        }
    }
}

impl Error for LoggingError {}

/// Initializes logging from a [`LoggingConfig`].
///
/// # Errors
/// - `UnsupportedLevel` when `level` is not one of `trace|debug|info|warn|error`.
/// - `InvalidDirectory` when `log_dir` is empty, relative, or cannot be created.
/// - `Conflict` when logging is active with another level or directory.
/// - `Backend` when the logger fails to start.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let level = normalize_level(&config.level)?;
    let log_dir = normalize_log_dir(&config.log_dir)?;

    if let Some(active) = ACTIVE.get() {
        return active.check_same(level, &log_dir);
    }

    let active = ACTIVE.get_or_try_init(|| start_logger(level, &log_dir))?;
    active.check_same(level, &log_dir)
}

/// Returns `(level, log_dir)` of the active logger, if any.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.level, active.log_dir.clone()))
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

impl ActiveLogger {
    fn check_same(&self, level: &'static str, log_dir: &Path) -> Result<(), LoggingError> {
        if self.log_dir != log_dir {
            return Err(LoggingError::Conflict {
                active: format!("directory `{}`", self.log_dir.display()),
                requested: format!("`{}`", log_dir.display()),
            });
        }
        if self.level != level {
            return Err(LoggingError::Conflict {
                active: format!("level `{}`", self.level),
                requested: format!("`{level}`"),
            });
        }
        Ok(())
    }
}

fn start_logger(level: &'static str, log_dir: &Path) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(log_dir).map_err(|err| {
        LoggingError::InvalidDirectory(format!("cannot create `{}`: {err}", log_dir.display()))
    })?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| LoggingError::Backend(err.to_string()))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| LoggingError::Backend(err.to_string()))?;

    install_panic_hook_once();

    info!(
        "event=logging_init module=core status=ok platform={} build_mode={} version={} level={} log_dir={}",
        std::env::consts::OS,
        if cfg!(debug_assertions) { "debug" } else { "release" },
        crate::core_version(),
        level,
        log_dir.display()
    );

    Ok(ActiveLogger {
        level,
        log_dir: log_dir.to_path_buf(),
        _handle: handle,
    })
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    let lowered = level.trim().to_ascii_lowercase();
    let lowered = if lowered == "warning" { "warn".to_string() } else { lowered };
    SUPPORTED_LEVELS
        .iter()
        .copied()
        .find(|candidate| *candidate == lowered)
        .ok_or(LoggingError::UnsupportedLevel(lowered))
}

fn normalize_log_dir(log_dir: &Path) -> Result<PathBuf, LoggingError> {
    if log_dir.as_os_str().is_empty() {
        return Err(LoggingError::InvalidDirectory("path is empty".to_string()));
    }
    if !log_dir.is_absolute() {
        return Err(LoggingError::InvalidDirectory(format!(
            "`{}` is not absolute",
            log_dir.display()
        )));
    }
    Ok(log_dir.to_path_buf())
}

fn install_panic_hook_once() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Payloads may carry issue text; cap and flatten before logging.
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location,
            sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
        );
        previous_hook(panic_info);
    }));
}

fn sanitize_message(value: &str, max_chars: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    if flattened.chars().count() <= max_chars {
        return flattened;
    }
    let mut truncated: String = flattened.chars().take(max_chars).collect();
    truncated.push_str("...");
    truncated
}
