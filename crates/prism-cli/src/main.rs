use std::net::SocketAddr;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use prism_core::config::GatewayConfig;
use prism_core::router::decide_route;
use prism_gateway::GatewayServer;

#[derive(Parser)]
#[command(name = "prism")]
#[command(version)]
#[command(about = "prism — an inference-routing HTTP gateway")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway server
    Serve {
        /// Listen port (overrides PRISM_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show the resolved configuration (secrets masked)
    Config,

    /// Print the routing decision for a message without calling a backend
    Route {
        /// The message to route
        message: String,

        /// Optional explicit route hint
        #[arg(long)]
        hint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Serve { port } => cmd_serve(port).await,
        Commands::Config => cmd_config(),
        Commands::Route { message, hint } => cmd_route(&message, hint.as_deref()),
    }
}

async fn cmd_serve(port: Option<u16>) -> Result<()> {
    let config = GatewayConfig::from_env();

    if !config.gradient.is_configured() {
        warn!("Gradient backend not configured; /route will return 500 for gradient traffic");
    }
    if !config.digitalocean.is_configured() {
        warn!("DigitalOcean backend not configured; /route will return 500 for do traffic");
    }

    let port = port.unwrap_or(config.port);
    let bind: SocketAddr = ([0, 0, 0, 0], port).into();
    info!("Starting prism gateway on port {}", port);

    GatewayServer::new(bind, config).run().await
}

fn cmd_config() -> Result<()> {
    let config = GatewayConfig::from_env();
    println!("{:#?}", config);
    Ok(())
}

fn cmd_route(message: &str, hint: Option<&str>) -> Result<()> {
    let config = GatewayConfig::from_env();
    let route = decide_route(message, hint, &config.route_keywords);
    println!("{}", route);
    Ok(())
}
