use anyhow::Context;
use clap::Parser;
use scanweb::cli::Cli;
use scanweb::config::AppSettings;
use scanweb::error::StartupError;
use scanweb::output::{self, StartupReporter};
use scanweb::scanner::{NmapBackend, Scanner};
use scanweb::storage::{ResetPolicy, ScanStore};
use scanweb::web::{self, AppState};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let reporter = StartupReporter::new(cli.quiet);

    let settings = reporter.step("Loading settings", || match &cli.config {
        Some(path) => AppSettings::load_from(path),
        None => AppSettings::load(),
    })
    .map_err(StartupError::from)?;
    let settings = cli.apply(settings);

    let backend = reporter.step(
        &format!("Checking {} installation", settings.nmap.display()),
        || {
            NmapBackend::locate(&settings.nmap).map_err(|e| StartupError::ToolMissing {
                tool: settings.nmap.display().to_string(),
                reason: e.to_string(),
            })
        },
    )?;
    tracing::debug!(binary = %backend.binary().display(), "scanner located");

    let reset = settings.reset_policy();
    if reset == ResetPolicy::Fresh && !cli.quiet {
        output::print_warning("scan history is cleared on every start; pass --keep-history to keep it");
    }
    let store = reporter
        .step("Preparing database", || {
            ScanStore::initialize(&settings.database, reset).map_err(StartupError::from)
        })
        .with_context(|| format!("opening {}", settings.database.display()))?;
    let rows = store.count()?;

    let scanner = Scanner::new(Arc::new(backend), settings.max_concurrent_scans);
    let state = Arc::new(AppState::new(scanner, store));

    reporter.ready(format_args!("http://{}", settings.listen_addr), rows);
    web::serve(settings.listen_addr, state).await
}
