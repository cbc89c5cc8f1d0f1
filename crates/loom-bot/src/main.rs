//! CLI frontend for the Loom bot.
//!
//! Runs the owner-only story commands against file-backed saves, one
//! command per invocation or interactively with `loom play`.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use loom_bot::{BotConfig, BotContext, Command, Invocation, Reply, dispatch};
use loom_store::{FileAttachment, FileStore, ScopeId, UserId};

#[derive(Parser)]
#[command(
    name = "loom",
    about = "Loom — a private interactive-fiction story that remembers",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding save files (default: $LOOM_DATA_DIR or ./loom-data)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Story instance to act on
    #[arg(short, long, global = true, default_value = "local")]
    scope: String,

    /// Act as this user id (default: the owner)
    #[arg(short, long, global = true)]
    user: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start (or restart) the story
    Start,

    /// Make a choice in the story
    Choice {
        /// What you do or say next
        text: String,
    },

    /// Show the current story status
    Status,

    /// Export the story as a JSON file
    Export {
        /// Output file path (default: ./loom_export.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the story with a previously exported JSON file
    Import {
        /// The .json file to import
        file: PathBuf,
    },

    /// Play interactively: every line is a choice
    Play,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing();

    match run(cli, config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, config: BotConfig) -> Result<ExitCode, String> {
    let config = match cli.data {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    };

    let store = FileStore::new(&config.data_dir, config.store.recovery);
    let ctx = BotContext::from_config(&config, Arc::new(store));
    debug!(context = ?ctx, data = %config.data_dir.display(), "context ready");
    let caller = cli.user.map(UserId).unwrap_or(config.owner);
    let invocation = Invocation::new(caller, ScopeId::new(cli.scope));

    match cli.command {
        Commands::Start => execute(&ctx, &invocation, Command::Start, None).await,
        Commands::Choice { text } => {
            execute(&ctx, &invocation, Command::Choice { text }, None).await
        }
        Commands::Status => execute(&ctx, &invocation, Command::Status, None).await,
        Commands::Export { output } => {
            execute(
                &ctx,
                &invocation,
                Command::ExportHistory,
                output.as_deref(),
            )
            .await
        }
        Commands::Import { file } => {
            let attachment = Arc::new(FileAttachment::new(file));
            execute(
                &ctx,
                &invocation,
                Command::ImportHistory { attachment },
                None,
            )
            .await
        }
        Commands::Play => play(&ctx, &invocation).await,
    }
}

async fn execute(
    ctx: &BotContext,
    invocation: &Invocation,
    command: Command,
    output: Option<&Path>,
) -> Result<ExitCode, String> {
    let reply = dispatch(ctx, invocation, command)
        .await
        .map_err(|e| e.to_string())?;
    emit(reply, output).await
}

/// Print a reply. Private replies go to stderr and count as failure.
async fn emit(reply: Reply, output: Option<&Path>) -> Result<ExitCode, String> {
    match reply {
        Reply::Text {
            content,
            private: false,
        } => {
            println!("{content}");
            Ok(ExitCode::SUCCESS)
        }
        Reply::Text {
            content,
            private: true,
        } => {
            eprintln!("{}", content.yellow());
            Ok(ExitCode::FAILURE)
        }
        Reply::File {
            content,
            filename,
            bytes,
        } => {
            let path = output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(&filename));
            tokio::fs::write(&path, &bytes)
                .await
                .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
            println!("{content}");
            println!("  Exported to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn play(ctx: &BotContext, invocation: &Invocation) -> Result<ExitCode, String> {
    println!("  {} The Loom Below", "Weaving".bold());
    println!("  Scope: {} | Type what you do.", invocation.scope);
    println!("  /status, /export, /start, /quit\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush().map_err(|e| e.to_string())?;

        let Some(line) = lines.next_line().await.map_err(|e| e.to_string())? else {
            break; // EOF
        };
        let input = line.trim();
        let command = match input {
            "" => continue,
            "/quit" | "/q" => break,
            "/status" => Command::Status,
            "/export" => Command::ExportHistory,
            "/start" => Command::Start,
            text => Command::Choice {
                text: text.to_string(),
            },
        };

        match dispatch(ctx, invocation, command).await {
            Ok(reply) => {
                if let Err(e) = emit(reply, None).await {
                    println!("{}", e.yellow());
                }
                println!();
            }
            Err(e) => println!("{}\n", e.to_string().yellow()),
        }
    }

    Ok(ExitCode::SUCCESS)
}
