use anyhow::{Context, Result};
use clap::Parser;
use pet_relay::{http, store, AppState, Config};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Chat-embed webhook to pets table bridge
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Config file path (extension optional; missing file is fine)
    #[arg(long, default_value = "config/pet-relay")]
    config: String,

    /// Override the bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut cfg = Config::load(&args.config)?;
    if let Some(bind) = args.bind {
        cfg.service.http.bind = bind;
    }
    if let Some(port) = args.port {
        cfg.service.http.port = port;
    }

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("Store: {:?}", cfg.store);

    let record_store = store::connect(&cfg.store).context("Failed to set up record store")?;
    let state = AppState::with_store(record_store, cfg.store.table.clone());

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    http::serve(listener, state).await?;

    Ok(())
}
