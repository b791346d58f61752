//! Interactive session: the stand-in for the selection, training, and chat
//! views. Implements the view-side contracts (start disabled while a run is
//! active, chat disabled until training completes) and reports selection
//! errors as transient notices.

use anyhow::Result;
use mailpilot_core::app::App;
use mailpilot_core::chat::ChatError;
use mailpilot_core::models::{ChatMessage, ChatRole, TrainingPhase};
use mailpilot_core::selection;
use mailpilot_core::store::FOLDER_SOURCE_CAP;
use std::fs;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use uuid::Uuid;

pub async fn run(app: App) -> Result<()> {
    let chat = app.chat()?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("mailpilot session. Type 'help' for commands, 'quit' to leave.");
    prompt();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            prompt();
            continue;
        }
        let (cmd, rest) = split_command(line);
        match cmd {
            "help" => print_help(),
            "quit" | "exit" => break,
            "add-email" => add_email(&app, rest),
            "add-folder" => match selection::select_data_folder(&app.store, rest) {
                Ok(folder) => println!(
                    "added folder {} ({}/{})",
                    folder.name,
                    app.store.folder_sources().len(),
                    FOLDER_SOURCE_CAP
                ),
                Err(err) => notice(&err),
            },
            "set-model" => match selection::select_model_file(&app.store, rest, file_size(rest)) {
                Ok(file) => println!("model set to {}", file.name),
                Err(err) => notice(&err),
            },
            "clear-model" => {
                app.store.set_model_file(None);
                println!("model cleared");
            }
            "remove-email" => remove(rest, |id| app.store.remove_email_source(id)),
            "remove-folder" => remove(rest, |id| app.store.remove_folder_source(id)),
            "sources" => print_sources(&app),
            "status" => {
                let status = app.store.training_status();
                println!(
                    "{} ({}%): {}",
                    phase_label(status.phase),
                    status.progress,
                    status.message
                );
            }
            "train" => start_training(&app),
            "chat" => send_chat(&app, &chat, rest).await,
            "clear-chat" => {
                chat.clear();
                println!("chat cleared");
            }
            "log" => {
                for msg in app.store.chat_messages() {
                    println!("{}", format_message(&msg));
                }
            }
            other => eprintln!("unknown command '{}', try 'help'", other),
        }
        prompt();
    }
    Ok(())
}

fn add_email(app: &App, path: &str) {
    // Mirror the two pickers: a plain file lands as a typed email file,
    // anything else is treated as an email directory.
    let outcome = match fs::metadata(path) {
        Ok(meta) if meta.is_file() => selection::select_email_file(&app.store, path, meta.len()),
        _ => selection::select_email_directory(&app.store, path),
    };
    match outcome {
        Ok(source) => println!("added email source {} ({})", source.name, source.id),
        Err(err) => notice(&err),
    }
}

fn start_training(app: &App) {
    let phase = app.store.training_status().phase;
    if matches!(phase, TrainingPhase::Preparing | TrainingPhase::Training) {
        eprintln!("notice: training already in progress");
        return;
    }
    app.trainer().start();
    println!("training started, watch 'status'");
}

async fn send_chat(app: &App, chat: &mailpilot_core::chat::ChatService, text: &str) {
    match chat.send(text) {
        Ok(handle) => {
            // Wait for the deferred reply so the session can print it.
            if handle.await.is_err() {
                warn!("chat reply task failed");
            }
            if let Some(last) = app.store.chat_messages().last() {
                println!("{}", format_message(last));
            }
        }
        Err(err @ ChatError::ModelNotReady) => {
            eprintln!("notice: {} (run 'train' first)", err);
        }
        Err(err) => notice(&err),
    }
}

fn remove(raw: &str, remove_fn: impl FnOnce(Uuid)) {
    match Uuid::parse_str(raw) {
        Ok(id) => {
            remove_fn(id);
            println!("removed {}", id);
        }
        Err(_) => eprintln!("notice: '{}' is not a source id", raw),
    }
}

fn print_sources(app: &App) {
    for source in app.store.email_sources() {
        println!(
            "email {:>9} {} ({})",
            kind_label(source.kind),
            source.name,
            source.id
        );
    }
    for folder in app.store.folder_sources() {
        println!("folder          {} ({})", folder.name, folder.id);
    }
    match app.store.model_file() {
        Some(model) => println!("model           {} ({} bytes)", model.name, model.size),
        None => println!("model           (none)"),
    }
}

fn notice(err: &dyn std::error::Error) {
    warn!(error = %err, "selection discarded");
    eprintln!("notice: {}", err);
}

fn file_size(path: &str) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(' ') {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (line, ""),
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn print_help() {
    println!("commands:");
    println!("  add-email <path>      register an email file or directory");
    println!("  add-folder <path>     register a data folder (max {})", FOLDER_SOURCE_CAP);
    println!("  set-model <path>      choose the model file");
    println!("  clear-model           drop the model file");
    println!("  remove-email <id>     remove an email source");
    println!("  remove-folder <id>    remove a data folder");
    println!("  sources               list selections");
    println!("  status                show training status");
    println!("  train                 start the training run");
    println!("  chat <text>           send a message (after training)");
    println!("  clear-chat            empty the chat log");
    println!("  log                   print the chat log");
    println!("  quit                  leave the session");
}

pub fn format_message(msg: &ChatMessage) -> String {
    format!(
        "[{}] {:>9}: {}",
        msg.timestamp.format("%H:%M:%S"),
        role_label(msg.role),
        msg.content
    )
}

pub fn phase_label(phase: TrainingPhase) -> &'static str {
    match phase {
        TrainingPhase::Idle => "idle",
        TrainingPhase::Preparing => "preparing",
        TrainingPhase::Training => "training",
        TrainingPhase::Completed => "completed",
        TrainingPhase::Failed => "failed",
    }
}

fn role_label(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
        ChatRole::System => "system",
    }
}

fn kind_label(kind: mailpilot_core::models::SourceKind) -> &'static str {
    use mailpilot_core::models::SourceKind;
    match kind {
        SourceKind::Pst => "pst",
        SourceKind::Olm => "olm",
        SourceKind::Mbox => "mbox",
        SourceKind::Other => "other",
        SourceKind::Directory => "directory",
    }
}
