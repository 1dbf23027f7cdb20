use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use maze_client::{HttpConfig, HttpTransport, RetryConfig, RetryingTransport};
use maze_core::{Command, MazeTransport, NavError, Orientation};
use maze_engine::{Navigator, NavigatorConfig};
use maze_settings::MazeSettings;
use tokio::io::{AsyncBufReadExt, BufReader};

mod render;

/// Explore a remote maze one step at a time.
#[derive(Debug, Parser)]
#[command(name = "maze-walker", version)]
struct Args {
    /// Settings file (defaults to ~/.maze-walker/settings.json).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maze service URL.
    #[arg(long)]
    endpoint: Option<String>,
    /// Token for the opening request.
    #[arg(long)]
    start_token: Option<String>,
    /// Facing assumed at the entrance (north, east, south, west).
    #[arg(long)]
    facing: Option<Orientation>,
    /// Default log level when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,
    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
    /// Fail on the first transport error instead of retrying.
    #[arg(long)]
    no_retry: bool,
}

enum Input {
    Command(Command),
    Map,
    History,
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Option<Input> {
    let word = line.trim().to_ascii_lowercase();
    let input = match word.as_str() {
        "" => return None,
        "l" | "left" => Input::Command(Command::RotateLeft),
        "r" | "right" => Input::Command(Command::RotateRight),
        "m" | "f" | "forward" | "move" => Input::Command(Command::Move),
        "map" => Input::Map,
        "history" | "h" => Input::History,
        "help" | "?" => Input::Help,
        "q" | "quit" | "exit" => Input::Quit,
        _ => Input::Unknown(word),
    };
    Some(input)
}

const HELP: &str = "commands: l/left, r/right, m/forward, map, history, help, q/quit";

fn init_logging(args: &Args) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if args.json_logs {
        builder.json().with_target(true).init();
    } else {
        builder.init();
    }
}

fn load_settings(args: &Args) -> anyhow::Result<MazeSettings> {
    let mut settings = match &args.config {
        Some(path) => maze_settings::load_settings_from_path(path),
        None => maze_settings::load_settings(),
    }
    .context("failed to load settings")?;

    if let Some(endpoint) = &args.endpoint {
        settings.endpoint.clone_from(endpoint);
    }
    if let Some(token) = &args.start_token {
        settings.start_token.clone_from(token);
    }
    if let Some(facing) = args.facing {
        settings.initial_orientation = facing;
    }
    settings.validate()?;
    Ok(settings)
}

fn build_transport(settings: &MazeSettings, no_retry: bool) -> anyhow::Result<Arc<dyn MazeTransport>> {
    let http = HttpTransport::new(HttpConfig::from(settings)).context("failed to build HTTP transport")?;
    if no_retry {
        return Ok(Arc::new(http));
    }
    Ok(Arc::new(RetryingTransport::new(http, RetryConfig::from(&settings.retry))))
}

fn report(err: &NavError) {
    tracing::warn!(kind = err.error_kind(), error = %err, "command failed");
    if err.is_retryable() {
        println!("{err} (try again)");
    } else {
        println!("{err}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let settings = load_settings(&args)?;
    tracing::info!(endpoint = %settings.endpoint, facing = %settings.initial_orientation, "starting maze walker");

    let transport = build_transport(&settings, args.no_retry)?;
    let mut navigator = Navigator::new(
        transport,
        NavigatorConfig {
            start_token: settings.start_token(),
            initial_orientation: settings.initial_orientation,
            ..Default::default()
        },
    );

    let state = navigator.initialize().await.context("failed to enter the maze")?;
    println!("{}", render::status(state));
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(input) = parse_input(&line) else {
            continue;
        };
        match input {
            Input::Command(command) => match navigator.perform(command).await {
                Ok(state) => {
                    println!("{}", render::status(state));
                    if state.goal_reached() {
                        println!("The exit is right ahead!");
                    }
                }
                Err(e) => report(&e),
            },
            Input::Map => {
                if let Some(state) = navigator.state() {
                    println!("{}", state.render());
                }
            }
            Input::History => {
                if let Some(state) = navigator.state() {
                    print!("{}", render::history(state));
                }
            }
            Input::Help => println!("{HELP}"),
            Input::Quit => break,
            Input::Unknown(word) => println!("unknown command {word:?}; {HELP}"),
        }
    }

    tracing::info!(steps = navigator.history().len(), "shutting down");
    Ok(())
}
