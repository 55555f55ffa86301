//! CLI binary for mindmosaic.

use clap::{Parser, Subcommand};
use mindmosaic::{CheckinConfig, EmotionLabel, SessionEvent, SessionOutput};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// MindMosaic: voice-driven wellness check-in engine.
#[derive(Parser)]
#[command(name = "mindmosaic", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Run a check-in session on stdin/stdout.
    Chat,

    /// Print the content catalog, optionally for one emotion.
    Catalog {
        /// Emotion label (happy, sad, stressed, calm, excited, neutral).
        emotion: Option<EmotionLabel>,
    },

    /// Print the default configuration file path.
    ConfigPath,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing. Users can override with RUST_LOG=debug.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mindmosaic=info")),
        )
        .init();

    let cli = Cli::parse();

    // Load config
    let config = if let Some(ref path) = cli.config {
        CheckinConfig::from_file(path)?
    } else {
        CheckinConfig::default()
    };

    match cli.command.unwrap_or(Command::Chat) {
        Command::Chat => run_chat(config).await,
        Command::Catalog { emotion } => {
            print_catalog(emotion);
            Ok(())
        }
        Command::ConfigPath => {
            println!("{}", CheckinConfig::default_config_path().display());
            Ok(())
        }
    }
}

/// Text-mode session: each stdin line is treated as a final transcript.
async fn run_chat(config: CheckinConfig) -> anyhow::Result<()> {
    println!("MindMosaic v{}", env!("CARGO_PKG_VERSION"));

    let gate_enabled = config.wakeword.enabled;
    let wake_phrase = config.wakeword.wake_phrase.clone();

    let (event_tx, event_rx) = mpsc::channel(16);
    let (output_tx, mut output_rx) = mpsc::channel(64);
    let cancel = CancellationToken::new();

    let driver = mindmosaic::SessionDriver::new(config);
    let driver_handle = tokio::spawn(driver.run(event_rx, output_tx, cancel.clone()));

    // Handle Ctrl+C
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down...");
            cancel_clone.cancel();
        }
    });

    let printer = tokio::spawn(async move {
        while let Some(output) = output_rx.recv().await {
            match output {
                SessionOutput::Activated => println!("[check-in started]"),
                SessionOutput::Prompt(text) => println!("mindmosaic: {text}"),
                SessionOutput::EmotionDetected { emotion, confidence } => {
                    println!("[emotion: {emotion} ({confidence:.0}%)]", confidence = confidence * 100.0);
                }
                SessionOutput::Recommendations(items) => {
                    for item in items {
                        println!(
                            "  - {} ({}): {}",
                            item.title,
                            item.category,
                            item.description
                        );
                    }
                }
                SessionOutput::SessionEnded => println!("[session ended]"),
            }
        }
    });

    if gate_enabled {
        println!("\nType \"{wake_phrase}\" to begin. Press Ctrl+C to quit.\n");
    } else {
        println!("\nType anything to begin. Press Ctrl+C to quit.\n");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            line = lines.next_line() => match line? {
                Some(line) => {
                    let text = line.trim().to_owned();
                    if text.is_empty() {
                        continue;
                    }
                    let event = SessionEvent::Transcript { text, is_final: true };
                    if event_tx.send(event).await.is_err() {
                        break;
                    }
                }
                None => break,
            },
        }
    }

    drop(event_tx);
    driver_handle.await??;
    printer.await?;

    Ok(())
}

fn print_catalog(emotion: Option<EmotionLabel>) {
    let emotions: &[EmotionLabel] = match emotion {
        Some(label) => &[label],
        None => &EmotionLabel::ALL,
    };
    for &emotion in emotions {
        println!("{emotion}:");
        for item in mindmosaic::content::recommendations_for(emotion) {
            let duration = item.duration.unwrap_or("-");
            println!("  {}  {} ({}, {})", item.id, item.title, item.category, duration);
        }
    }
}
