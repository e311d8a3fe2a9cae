use std::{error::Error, net::SocketAddr, path::PathBuf};

use axum::middleware;
use axum_server::Handle;
use clap::Parser;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use finance_manager::{
    ApiClient, AppState, ResponseStatusPolicy, add_tracing_layer, build_router,
    graceful_shutdown, logging_middleware, setup_logging,
};

/// The web server for finance_manager.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// URL of the transactions endpoint of the transactions API.
    #[arg(long, default_value = "http://127.0.0.1:8000/transactions")]
    api_url: String,

    /// The port to serve the web app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Treat responses from the transactions API with a non-2xx status code
    /// as errors.
    #[arg(long)]
    require_success_status: bool,

    /// File path to write debug logs to.
    #[arg(long, default_value = "debug.log")]
    log_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    setup_logging(&args.log_path)?;

    let status_policy = if args.require_success_status {
        ResponseStatusPolicy::RequireSuccess
    } else {
        ResponseStatusPolicy::Ignore
    };

    let api_client = ApiClient::new(&args.api_url)
        .inspect_err(|error| tracing::error!("Could not create API client: {error}"))?
        .with_status_policy(status_policy);

    tracing::info!(
        "Using transactions API at {} with status policy {status_policy:?}",
        api_client.base_url()
    );

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(AppState::new(api_client))
        .layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}
