use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chess_client::authority::{DevAuthority, GrpcAuthority, MoveAuthority};
use chess_client::config::{load_config, load_default_config};
use chess_client::interaction::{MoveOutcome, RejectReason};
use chess_client::script::{parse_script, Gesture};
use chess_client::session::{GameSession, Phase};

#[derive(Parser)]
#[command(
    name = "chess-client",
    about = "Headless chess client: replays pointer gestures against a move authority"
)]
struct Cli {
    /// Path to chess_client.toml (default: auto-discover)
    #[arg(long, env = "CHESS_CLIENT_CONFIG")]
    config: Option<PathBuf>,

    /// Authority endpoint, overrides the config file
    #[arg(long, env = "CHESS_AUTHORITY_ENDPOINT")]
    endpoint: Option<String>,

    /// Use an in-process dev authority instead of connecting over gRPC
    #[arg(long)]
    local: bool,

    /// Seed for the in-process dev authority
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Gesture script to replay (default: stdin)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print board snapshots as JSON instead of diagrams
    #[arg(long)]
    json: bool,
}

fn print_board(session: &GameSession, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let Some(client) = session.client() else {
        return Ok(());
    };
    if json {
        println!("{}", serde_json::to_string(&client.board().snapshot())?);
    } else {
        print!("{}", client.board().render_ascii());
        println!("to move: {} ({})", client.current_player(), client.turns().current_side());
    }
    Ok(())
}

fn describe(outcome: &MoveOutcome) -> String {
    match outcome {
        MoveOutcome::Accepted(m) => match &m.captured {
            Some(victim) => format!("{} -> {} takes {:?}", m.origin, m.destination, victim.kind),
            None => format!("{} -> {}", m.origin, m.destination),
        },
        MoveOutcome::Rejected { origin, reason, .. } => match reason {
            RejectReason::Illegal => format!("illegal move from {}", origin),
            RejectReason::OffBoard => format!("dropped off the board, {} snaps back", origin),
            RejectReason::Stale => format!("stale verdict for {}", origin),
            RejectReason::Transport(e) => format!("authority unreachable ({}), {} snaps back", e, origin),
        },
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => load_config(path)?,
        None => load_default_config(),
    };
    if let Some(endpoint) = cli.endpoint {
        config.authority.endpoint = endpoint;
    }
    config.validate()?;
    let geometry = config.geometry();

    let authority: Arc<dyn MoveAuthority> = if cli.local {
        tracing::info!(seed = cli.seed, "using in-process dev authority");
        Arc::new(DevAuthority::new(cli.seed))
    } else {
        Arc::new(GrpcAuthority::connect(&config.authority).await?)
    };

    let source = match cli.script {
        Some(ref path) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?,
        None => std::io::read_to_string(std::io::stdin())?,
    };
    let gestures = parse_script(&source, &geometry)?;

    let mut session = GameSession::new(authority, geometry);
    session.start().await?;
    print_board(&session, cli.json)?;

    for gesture in gestures {
        if session.phase() != Phase::Playing {
            tracing::info!("game over, ignoring remaining gestures");
            break;
        }
        match gesture {
            Gesture::Down(p) => {
                session.grab(p)?;
            }
            Gesture::Move(p) => {
                session.drag_move(p)?;
            }
            Gesture::Cancel => session.cancel()?,
            Gesture::Up(p) => {
                if let Some(outcome) = session.release(p).await? {
                    println!("{}", describe(&outcome));
                    print_board(&session, cli.json)?;
                }
            }
        }
    }

    if session.phase() == Phase::Ended {
        println!("Checkmate! Game Over. Winner: {}", session.winner().unwrap_or("unknown"));
    }
    Ok(())
}
