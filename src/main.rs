//! A Slack bot that fetches card news from Figma.
//!
//! `!최신` posts the newest card news frame as an image. `!모두` offers a
//! menu of every card news frame in the configured file. Card news frames are
//! top-level frames whose names start with a bracketed tag.
//!
//! See [config] for the environment variables the bot needs.

use config::Config;
use dotenvy::dotenv;
use figma::api::{FigmaClient, API_BASE as FIGMA_API_BASE};
use router::Deps;
use slack::api::{SlackClient, API_BASE as SLACK_API_BASE};
use std::{net::SocketAddr, process};
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{error, info, warn};

mod bot;
mod cardnews;
mod config;
mod figma;
mod router;
mod slack;

/// Application entrypoint. Initialises tracing, reads configuration from the
/// environment, binds to 0.0.0.0, and starts the server.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    let config = match Config::from_env() {
        Ok(x) => x,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match TcpListener::bind(addr).await {
        Ok(x) => x,
        Err(e) => {
            error!("Could not bind to {}: {}", addr, e);
            process::exit(1);
        }
    };

    if let Err(e) = server_(listener, deps(config)).await {
        error!("Server failed: {}", e);
        process::exit(1);
    }
}

/// Construct the long-lived service handles from configuration.
fn deps(config: Config) -> Deps {
    if config.signing_secret.is_none() {
        warn!("No $SLACK_SIGNING_SECRET environment variable found");
    }

    info!("Looking for card news in {:?}", config.scope);

    Deps {
        slack_client: SlackClient::new(SLACK_API_BASE.into(), config.slack_token),
        figma_client: FigmaClient::new(FIGMA_API_BASE.into(), config.figma_token),
        scope: config.scope,
        signing_secret: config.signing_secret,
    }
}

/// Run a server without graceful shutdown.
async fn server_(listener: TcpListener, deps: Deps) -> std::io::Result<()> {
    // Giving a receiver that will never resolve.
    let (_tx, rx) = oneshot::channel::<()>();
    server(listener, deps, rx).await
}

/// Run a server with graceful shutdown via `rx`.
async fn server(
    listener: TcpListener,
    deps: Deps,
    rx: oneshot::Receiver<()>,
) -> std::io::Result<()> {
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router::new(deps))
        .with_graceful_shutdown(async {
            rx.await.ok();
        })
        .await
}
