//! Microfrontend Registry Server Entry Point

use clap::Parser;
use mf_registry::cli::Cli;
use mf_registry::directory::DirectoryClient;
use mf_registry::health::{self, HealthReconciler};
use mf_registry::registry::{RegistrationService, RegistryStore};
use mf_registry::shutdown::ShutdownController;
use mf_registry::{logging, server, AppState};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let _log_guard = match logging::init(&config.log_dir) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        directory_url = %config.directory_url,
        reconcile_interval_ms = config.reconcile_interval_ms,
        "Starting microfrontend registry"
    );

    let store = RegistryStore::new();
    let directory = DirectoryClient::new(config.directory_url.clone());
    let shutdown = ShutdownController::default();

    let probe_client = match health::probe_client(config.probe_timeout()) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create probe HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let reconciler = HealthReconciler::new(store.clone(), directory.clone())
        .with_interval(config.reconcile_interval())
        .with_probe_client(probe_client)
        .start(shutdown.clone());

    let state = AppState {
        registry: RegistrationService::new(store, directory),
    };

    let bind_addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to start server on {}: {}", bind_addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::run(state, listener, shutdown.clone()).await {
        error!("Server error: {}", e);
        shutdown.request_shutdown();
    }

    if let Err(e) = reconciler.await {
        error!("Health reconciler task failed: {}", e);
    }
}
