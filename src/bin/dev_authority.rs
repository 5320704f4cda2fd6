//! Development move authority served over gRPC.
//!
//! Usage:
//!   cargo run --bin dev_authority -- --port 50061 --seed 7

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tonic::transport::Server;
use tracing_subscriber::EnvFilter;

use chess_client::authority::DevAuthority;
use chess_client::server::{AuthorityServer, AuthorityServiceServer};

#[derive(Parser)]
#[command(name = "dev_authority", about = "Local stand-in for the on-chain move authority")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "50061", env = "CHESS_AUTHORITY_PORT")]
    port: u16,

    /// Seed for generated player addresses
    #[arg(long, default_value = "42")]
    seed: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();

    let server = AuthorityServer::new(Arc::new(DevAuthority::new(cli.seed)));

    let addr: SocketAddr = ([0, 0, 0, 0], cli.port).into();
    tracing::info!(%addr, seed = cli.seed, "starting dev authority");

    Server::builder()
        .add_service(AuthorityServiceServer::new(server))
        .serve(addr)
        .await?;

    Ok(())
}
