//! Command-line host for the V2831 uplink decoder.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use uplink_core::config::{self, replay_env_vars};
use uplink_core::{Metadata, Payload, DEFAULT_DECODER};

mod replay;

/// Uplink decoder - normalize V2831 gateway messages.
#[derive(Parser, Debug)]
#[command(name = "uplink")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform.
    #[command(subcommand)]
    command: Command,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a single message and print the record as JSON.
    #[command(group(ArgGroup::new("source").required(true).args(["payload", "payload_file"])))]
    Decode {
        /// Topic the message arrived on.
        #[arg(short, long)]
        topic: String,
        /// Payload text.
        #[arg(short, long)]
        payload: Option<String>,
        /// File holding the raw payload bytes.
        #[arg(short = 'f', long)]
        payload_file: Option<PathBuf>,
        /// Indent the output.
        #[arg(long)]
        pretty: bool,
    },
    /// Decode a JSON Lines message file repeatedly and report throughput.
    Replay {
        /// Message file, one `{"payload": ..., "metadata": {...}}` per line.
        #[arg(short, long)]
        input: PathBuf,
        /// Passes over the file.
        #[arg(short = 'n', long)]
        iterations: Option<usize>,
        /// Concurrent decode workers.
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// List topic rules in evaluation order.
    Routes,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Decode {
            topic,
            payload,
            payload_file,
            pretty,
        } => run_decode(topic, payload, payload_file, pretty),
        Command::Replay {
            input,
            iterations,
            workers,
        } => run_replay(input, iterations, workers).await,
        Command::Routes => {
            run_routes();
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "uplink={level},uplink_core={level}",
            level = default_level
        ))
        .add_directive(tracing::Level::WARN.into())
    });

    // Logs go to stderr so stdout carries only records.
    if config::log_json() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    }
}

fn run_decode(
    topic: String,
    payload: Option<String>,
    payload_file: Option<PathBuf>,
    pretty: bool,
) -> Result<()> {
    let payload = match (payload, payload_file) {
        (Some(text), _) => Payload::Text(text),
        (None, Some(path)) => Payload::Bytes(
            std::fs::read(&path)
                .with_context(|| format!("Failed to read payload file {}", path.display()))?,
        ),
        (None, None) => anyhow::bail!("Either --payload or --payload-file is required"),
    };

    let record = DEFAULT_DECODER
        .decode(&payload, &Metadata::with_topic(topic))
        .context("Failed to decode uplink")?;

    let json = if pretty {
        record.to_json_pretty()?
    } else {
        record.to_json()?
    };
    println!("{}", json);
    Ok(())
}

async fn run_replay(
    input: PathBuf,
    iterations: Option<usize>,
    workers: Option<usize>,
) -> Result<()> {
    let messages = replay::load_messages(&input)?;
    let iterations = iterations.unwrap_or_else(replay_env_vars::iterations);
    let workers = workers
        .map(replay_env_vars::clamp_workers)
        .unwrap_or_else(replay_env_vars::workers);

    let summary = replay::run(messages, iterations, workers).await?;
    println!("{}", summary);
    Ok(())
}

fn run_routes() {
    for (index, rule) in DEFAULT_DECODER.router().rules().iter().enumerate() {
        println!("#{}  {:<24} {}", index, rule.pattern(), rule.category());
    }
}
