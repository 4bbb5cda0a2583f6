//! folio-web - feed, sitemap and magic-URL service for the Folio site
//!
//! Serves read-only views over the content store: syndication feeds in three
//! formats, the XML sitemap, bare-slug redirects and raw content bodies.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_common::config::{load_site_config, SourceKind, CONFIG_ENV_VAR};
use folio_common::registry::ContentRegistry;
use folio_common::source::open_source;
use folio_web::{build_router, AppState};

/// Command-line arguments for folio-web
#[derive(Parser, Debug)]
#[command(name = "folio-web")]
#[command(about = "Feed, sitemap and magic-URL service for Folio")]
#[command(version)]
struct Args {
    /// Config file (overrides FOLIO_CONFIG and the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:5780
    #[arg(short, long, env = "FOLIO_BIND")]
    bind: Option<String>,

    /// SQLite database file or JSON directory
    #[arg(short, long, env = "FOLIO_DATA")]
    data: Option<PathBuf>,

    /// Content source backend: sqlite or json
    #[arg(long, env = "FOLIO_SOURCE")]
    source_kind: Option<SourceKind>,

    /// Root directory of MDX content bodies
    #[arg(long, env = "FOLIO_CONTENT_ROOT")]
    content_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_web=info,folio_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting folio-web v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let mut config = load_site_config(args.config.as_deref(), CONFIG_ENV_VAR)
        .context("Failed to load site configuration")?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(data) = args.data {
        config.source.path = data;
    }
    if let Some(kind) = args.source_kind {
        config.source.kind = kind;
    }
    if let Some(root) = args.content_root {
        config.content_root = Some(root);
    }

    info!(
        "Content source: {:?} at {}",
        config.source.kind,
        config.source.path.display()
    );
    if !config.source.path.exists() {
        // Not fatal: every lookup degrades to empty results until it appears
        warn!(
            "Content source {} does not exist yet",
            config.source.path.display()
        );
    }
    let source = open_source(&config.source);

    let registry = match &config.content_root {
        Some(root) => ContentRegistry::scan(root),
        None => {
            info!("No content root configured, content bodies disabled");
            ContentRegistry::new()
        }
    };

    let bind = config.bind.clone();
    let state = AppState::new(source, Arc::new(registry), config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;
    info!("folio-web listening on http://{}", bind);
    info!("Feeds: http://{}/feeds", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
