//! # Secure Pay
//!
//! Serves the payment card form and the `/api/payment` endpoint it posts to.
//! Card numbers are validated, tokenized and audit-logged in masked form;
//! raw card data is never stored or logged.

#![recursion_limit = "256"]

pub mod api;
pub mod config;
pub mod consts;
pub mod front;
pub mod logger;
pub mod models;
pub mod services;

use anyhow::Context;
use log::{info, warn};
use ntex::web;
use openssl::ssl::{SslAcceptor, SslFiletype, SslMethod};

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    let app_config = config::init_config()?;

    logger::setup_simple_logger(&app_config.audit_log_path)?;
    front::templates::init_templates()?;

    let tokenizer = services::tokenizer::TokenizerHandler::new(app_config.tokenization_key())?;
    if app_config.tokenization_key().is_none() {
        warn!("TOKENIZATION_KEY is not set, card tokens are unkeyed sha256 digests");
    }

    configure_and_run_server(app_config, tokenizer).await
}

/// Configures SSL acceptor for production environments
fn setup_ssl_acceptor(
    app_config: &config::AppConfig,
) -> anyhow::Result<openssl::ssl::SslAcceptorBuilder> {
    let mut ssl_acceptor = SslAcceptor::mozilla_intermediate(SslMethod::tls_server())
        .context("Failed to create SSL acceptor")?;

    ssl_acceptor
        .set_private_key_file(&app_config.private_key_path, SslFiletype::PEM)
        .with_context(|| {
            format!(
                "Failed to load private key from {}",
                app_config.private_key_path
            )
        })?;

    ssl_acceptor
        .set_certificate_file(&app_config.certificate_path, SslFiletype::PEM)
        .with_context(|| {
            format!(
                "Failed to load certificate from {}",
                app_config.certificate_path
            )
        })?;

    Ok(ssl_acceptor)
}

/// Creates application state for one server worker
fn create_app_state(
    app_config: &config::AppConfig,
    tokenizer: services::tokenizer::TokenizerHandler,
) -> front::AppState {
    front::AppState {
        tokenizer: Box::new(tokenizer),
        payment_endpoint: app_config.payment_endpoint.clone(),
    }
}

/// Configures and starts the web server with appropriate SSL settings
async fn configure_and_run_server(
    app_config: &'static config::AppConfig,
    tokenizer: services::tokenizer::TokenizerHandler,
) -> anyhow::Result<()> {
    let server_addr = (
        app_config.wep_server_host.as_str(),
        app_config.wep_server_port,
    );

    let cors_origins = app_config.cors_origins()?;
    info!("accepting payments from origins {cors_origins:?}");

    let server = web::server(move || {
        web::App::new()
            .wrap(front::routes::cors(&cors_origins).finish())
            .wrap(web::middleware::Logger::default())
            .wrap(web::middleware::Compress::default())
            .state(create_app_state(app_config, tokenizer.clone()))
            .configure(front::routes::pages)
            .configure(front::routes::payment)
            .default_service(web::route().to(front::server::serve_not_found))
    });

    let bound_server = if app_config.is_prod() {
        let ssl_acceptor = setup_ssl_acceptor(app_config)?;
        server.bind_openssl(server_addr, ssl_acceptor)?
    } else {
        warn!("serving card data over plain http, set ENV=prod to enable TLS");
        server.bind(server_addr)?
    };

    info!(
        "payment server listening on {}://{}:{}",
        app_config.wep_server_protocol(),
        app_config.wep_server_host,
        app_config.wep_server_port
    );

    bound_server
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
