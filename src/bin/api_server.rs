use std::{error::Error, net::SocketAddr, path::PathBuf};

use axum::middleware;
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;

use finance_manager::{
    add_tracing_layer, api::build_api_router, graceful_shutdown, logging_middleware,
    setup_logging,
};

/// The transactions API for finance_manager.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database, created if it does not exist.
    #[arg(long)]
    db_path: PathBuf,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// File path to write debug logs to.
    #[arg(long, default_value = "api_server.log")]
    log_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    setup_logging(&args.log_path)?;

    let connection = Connection::open(&args.db_path)
        .inspect_err(|error| tracing::error!("Could not open database: {error}"))?;

    let router = build_api_router(connection)?.layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    tracing::info!("Transactions API listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}
