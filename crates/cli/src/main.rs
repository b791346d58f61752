use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cli::repl;
use mailpilot_core::app::{self, App};
use mailpilot_core::chat;
use mailpilot_core::clock::InstantClock;
use mailpilot_core::config;
use mailpilot_core::selection;
use std::fs;
use std::sync::Arc;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Repl => repl::run(App::new(cfg)).await,
        Commands::Respond { text } => run_respond(cfg, &text).await,
        Commands::Train {
            model,
            email,
            folder,
            fast,
            json,
        } => run_train(cfg, model, email, folder, fast, json).await,
    }
}

#[derive(Parser)]
#[command(name = "mailpilot")]
#[command(about = "Local-data AI assistant for email archives (simulated)", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session driving selection, training, and chat
    Repl,
    /// Print the canned reply for one message
    Respond {
        /// Message text to answer
        text: String,
    },
    /// One-shot simulated training run over the given selections
    Train {
        /// Path of the model file
        #[arg(long)]
        model: String,
        /// Email file or directory path (repeatable)
        #[arg(long = "email")]
        email: Vec<String>,
        /// Data folder path (repeatable, capped at 3)
        #[arg(long = "folder")]
        folder: Vec<String>,
        /// Run without timer delays
        #[arg(long, default_value_t = false)]
        fast: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
}

async fn run_respond(cfg: config::AppConfig, text: &str) -> Result<()> {
    let registry = app::build_registry(&cfg);
    let reply = chat::respond(&registry, text).await?;
    println!("{}", reply);
    Ok(())
}

async fn run_train(
    cfg: config::AppConfig,
    model: String,
    email: Vec<String>,
    folder: Vec<String>,
    fast: bool,
    json: bool,
) -> Result<()> {
    let app = if fast {
        App::with_clock(cfg, Arc::new(InstantClock))
    } else {
        App::new(cfg)
    };

    selection::select_model_file(&app.store, &model, file_size(&model))
        .with_context(|| format!("model selection failed for {}", model))?;
    for path in &email {
        let outcome = match fs::metadata(path) {
            Ok(meta) if meta.is_file() => {
                selection::select_email_file(&app.store, path, meta.len())
            }
            _ => selection::select_email_directory(&app.store, path),
        };
        if let Err(err) = outcome {
            warn!(path = %path, error = %err, "email selection skipped");
        }
    }
    for path in &folder {
        if let Err(err) = selection::select_data_folder(&app.store, path) {
            warn!(path = %path, error = %err, "folder selection skipped");
        }
    }

    app.trainer().run().await;

    let status = app.store.training_status();
    let messages = app.store.chat_messages();
    if json {
        let summary = serde_json::json!({
            "status": status,
            "chat": messages,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} ({}%): {}",
            repl::phase_label(status.phase),
            status.progress,
            status.message
        );
        for msg in &messages {
            println!("{}", repl::format_message(msg));
        }
    }
    Ok(())
}

fn file_size(path: &str) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
