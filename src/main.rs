use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use zapcli::artifact::{PairingArtifact, QrArtifact};
use zapcli::cli::{self, AppContext, Cli, Command};
use zapcli::client::EngineClient;
use zapcli::config::{Paths, RunConfig};
use zapcli::session::SessionManager;
use zapcli::store::FileStore;
use zapcli::{Error, Store};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(cli).await {
        Ok(()) => {}
        Err(Error::Interrupted) => {
            eprintln!("Interrupted.");
            std::process::exit(130);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(debug: bool) {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> zapcli::Result<()> {
    let paths = Paths::resolve()?;
    paths.ensure_directories()?;

    let config = RunConfig {
        debug: cli.debug,
        wait: match &cli.command {
            Command::Send(args) => Duration::from_secs(args.wait),
            _ => zapcli::dispatch::DEFAULT_WAIT,
        },
        open_viewer: match &cli.command {
            Command::Setup(args) => !args.no_open,
            _ => false,
        },
    };

    let store: Store = Arc::new(FileStore::new(paths.device_file()));
    let client = Arc::new(EngineClient::new(Arc::clone(&store)));
    let artifact: Arc<dyn PairingArtifact> =
        Arc::new(QrArtifact::new(paths.qr_file(), config.open_viewer));

    // The pairing loop blocks until a terminal event; Ctrl-C must be able to
    // request teardown concurrently.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!();
            eprintln!("Disconnecting...");
            let _ = shutdown_tx.send(true);
        }
    });

    let manager = SessionManager::new(store, client, Arc::clone(&artifact), shutdown_rx);
    let ctx = AppContext {
        manager,
        artifact,
        config,
    };
    cli::run(cli.command, ctx).await
}
