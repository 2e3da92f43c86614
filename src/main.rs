//! anfgate - Azure NetApp Files Management Gateway
//!
//! HTTP gateway binary: loads configuration from the environment, wires
//! the management client behind the router, and serves the REST surface.

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use anfgate::auth::{AzureAuthProvider, DefaultAzureCredentialProvider};
use anfgate::config::Settings;
use anfgate::error::Result;
use anfgate::netapp::{AzureNetAppOperations, NetAppManager};
use anfgate::server::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "anfgate", about = "Azure NetApp Files management gateway", version)]
struct Cli {
    /// Address to bind the HTTP listener on
    #[arg(long, env = "MCP_LISTEN", default_value = "0.0.0.0:8080")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Error: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Arc::new(Settings::load()?);
    info!(
        subscription = %settings.subscription_id,
        resource_group = %settings.resource_group,
        "starting anfgate"
    );

    let auth_provider: Arc<dyn AzureAuthProvider> = Arc::new(DefaultAzureCredentialProvider::new()?);
    let ops = Arc::new(AzureNetAppOperations::new(
        auth_provider,
        settings.subscription_id.clone(),
        settings.resource_group.clone(),
    )?);
    let manager = Arc::new(NetAppManager::new(ops));

    let app = build_router(AppState { settings, manager });

    let listener = tokio::net::TcpListener::bind(cli.listen).await?;
    info!("listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "anfgate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
