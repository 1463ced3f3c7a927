use std::path::Path;
use std::rc::Rc;

use chirp_core::error::FeedError;
use chirp_core::settings::Settings;
use chirp_data::store::{JsonFileStore, MemoryStore, Storage};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Storage bootstrap ──────────────────────────────────────────────────────────

/// Pick the storage backend for this run.
///
/// `--ephemeral` keeps everything in memory; otherwise the data directory is
/// created (including any missing parents) and used as a [`JsonFileStore`].
pub fn open_storage(settings: &Settings) -> anyhow::Result<Rc<dyn Storage>> {
    if settings.ephemeral {
        tracing::info!("using in-memory storage; nothing will be saved");
        return Ok(Rc::new(MemoryStore::new()));
    }

    let data_dir = settings.resolved_data_dir();
    ensure_data_dir(&data_dir)?;
    tracing::info!(path = %data_dir.display(), "using file storage");
    Ok(Rc::new(JsonFileStore::new(data_dir)))
}

/// Create `dir` and any missing parents.
pub fn ensure_data_dir(dir: &Path) -> anyhow::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(FeedError::Config(format!(
            "data directory {} exists but is not a directory",
            dir.display()
        ))
        .into());
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// Output goes to stderr so it never interleaves with the menu on stdout.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(normalise_level(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;

    Ok(())
}

/// Map CLI level names onto `tracing` directives.
fn normalise_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
