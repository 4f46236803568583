use clap::Parser;

use mediaview::{cli, config, http, media};

/// Wait for the first Ctrl+C (graceful shutdown).
/// A second Ctrl+C while in-flight requests drain exits immediately with status 1.
async fn wait_for_shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nmediaview: forced exit");
            std::process::exit(1);
        }
    });
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        )
        .init();

    let args = cli::Args::parse();

    let file_config = match args.config.as_deref() {
        Some(path) => match config::load_config(path) {
            Ok(cfg) => {
                tracing::debug!("Loaded config from {}", path.display());
                Some(cfg)
            }
            Err(e) => {
                eprintln!("error: {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let config = config::Config::resolve(file_config, &args);

    let root = media::scanner::resolve_root(&config.root).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    });

    tracing::info!("Scanning {}", root.display());

    // Synchronous scan; the listener is not bound until it finishes.
    let library = media::scanner::scan(&root);
    if library.is_empty() {
        tracing::warn!("No media files found under {}", root.display());
    }
    let item_count = library.len();

    let state = http::state::AppState::new(library, root);
    let app = http::build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("error: failed to bind {}: {}", addr, e);
            std::process::exit(1);
        });

    let scope = if config.localhost { "localhost only" } else { "all interfaces" };
    tracing::info!(
        "Serving {} media items on http://{} ({})",
        item_count,
        addr,
        scope
    );
    if !config.localhost {
        tracing::info!("Open http://localhost:{} in a browser", config.port);
    }

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
    {
        tracing::error!("HTTP server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Goodbye.");
}
