//! Self-service directory password change form.
//!
//! A small axum service: one form, one policy pipeline, one directory
//! transaction per submission.

use ankpass_directory::{DirectoryClient, DirectoryConfig};
use ankpass_policy::{BreachClient, PolicyValidator};
use ankpass_web::config::Config;
use ankpass_web::service::ChangeService;
use ankpass_web::state::AppState;
use ankpass_web::{logging, routes};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.listen_addr,
        ldap_host = %config.ldap_host,
        "starting ankpass"
    );

    // Pinned trust state: read the CA root once, before serving anything.
    let ca_pem = match std::fs::read(&config.ldap_ca_file) {
        Ok(pem) => pem,
        Err(e) => {
            eprintln!(
                "Error: cannot read CA file {}: {e}",
                config.ldap_ca_file.display()
            );
            std::process::exit(1);
        }
    };

    let directory_config = DirectoryConfig::new(config.ldap_host.clone(), ca_pem)
        .with_port(config.ldap_port)
        .with_people_base_dn(config.people_base_dn.clone());

    let directory = match DirectoryClient::new(directory_config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let breach = match BreachClient::with_base_url(config.hibp_base_url.clone()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let service = ChangeService::new(Arc::new(PolicyValidator::new(breach)), directory);
    let app = routes::router(AppState::new(service));

    let listener = match tokio::net::TcpListener::bind(config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: cannot bind {}: {e}", config.listen_addr);
            std::process::exit(1);
        }
    };

    info!(addr = %config.listen_addr, "listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        eprintln!("Error: server exited: {e}");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown signal handler");
        return;
    }
    info!("shutdown signal received");
}
