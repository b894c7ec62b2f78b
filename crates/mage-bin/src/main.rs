//! mage entrypoint.

mod clipboard;
mod runtime;

use anyhow::{Context, Result};
use clap::Parser;
use core_actions::io_ops::FsStorage;
use core_config::PlaceBook;
use core_events::EVENT_CHANNEL_CAP;
use core_input::AsyncInputService;
use core_model::EditorModel;
use core_render::Theme;
use core_terminal::{CrosstermBackend, TerminalBackend};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::clipboard::SystemClipboard;
use crate::runtime::{EditorRuntime, ShutdownReason};

const LOG_FILE_NAME: &str = "mage.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "mage", version, about = "A small modal text editor")]
struct Args {
    /// File to open. A path that does not exist yet starts a new document
    /// saved there; no path shows the splash screen.
    pub path: Option<PathBuf>,
    /// Configuration file (overrides discovery of `mage.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging(log_dir: &Path) -> Option<WorkerGuard> {
    let log_path = log_dir.join(LOG_FILE_NAME);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            core_terminal::restore_terminal();
            tracing::error!(target: "runtime.panic", %info, "panic");
            default_panic(info);
        }));
    });
}

fn open_initial(model: &mut EditorModel, path: Option<&Path>) {
    match path {
        Some(p) if p.exists() => model.load_path(p, &FsStorage),
        Some(p) => model.start_new(Some(p.to_path_buf())),
        None => model.show_splash(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.clone().unwrap_or_else(core_config::discover);
    let _log_guard = configure_logging(&core_config::log_dir_for(&config_path));
    install_panic_hook();
    info!(target: "runtime", version = env!("CARGO_PKG_VERSION"), "startup");

    let config = core_config::load_from(Some(config_path)).context("loading configuration")?;
    let settings_error = config.ensure_written().err();
    let places_path = config.places_path();
    let places = PlaceBook::load(&places_path);

    let mut backend = CrosstermBackend::new();
    let (width, height) = backend.size().unwrap_or((80, 24));
    let mut model = EditorModel::new(width, height)
        .with_config(&config)
        .with_places(places);
    open_initial(&mut model, args.path.as_deref());
    if let Some(error) = settings_error {
        warn!(target: "config", error = %format!("{error:#}"), "settings_write_failed");
        model.show_message(format!("Error writing settings: {error}"));
    }
    info!(
        target: "runtime.startup",
        title = %model.document().title,
        splash = model.is_splash(),
        config = %config.path.display(),
        "bootstrap_complete"
    );

    backend.set_title("mage")?;
    let guard = backend.enter_guard()?;

    let (tx, mut rx) = mpsc::channel(EVENT_CHANNEL_CAP);
    let input = AsyncInputService::start(tx);

    let mut runtime = EditorRuntime::new(
        model,
        Box::new(SystemClipboard::new()),
        Theme::from_config(&config.file.theme),
        std::io::stdout(),
    );
    let outcome = runtime.run(&mut rx).await;
    let reason = outcome.as_ref().copied().unwrap_or(ShutdownReason::Quit);
    runtime.finish(&places_path, reason);
    rx.close();
    input.stop().await;
    guard.release()?;
    info!(target: "runtime.shutdown", reason = reason.as_str(), "shutdown_complete");
    outcome.map(|_| ())
}
