//! Line-based terminal front end.
//!
//! Plain text searches run the staged search. Commands:
//! `?text` quick ranked search, `:N` search suggestion N, `+N` save result N,
//! `:fav` list favorites, `:rm word | definition` remove one, `:q` quit.

use std::io::Write;

use kanal::{AsyncReceiver, AsyncSender};
use kotoba_core::favorites::FavoriteRecord;
use kotoba_core::types::{AppEvent, DisplayResult};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

const PROMPT: &str = "kotoba> ";

/// Map one input line to a request. `None` for blank lines and unknown commands.
pub fn parse_input(line: &str) -> Option<AppEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(query) = line.strip_prefix('?') {
        return Some(AppEvent::QuickQuery(query.trim().to_string()));
    }

    if let Some(index) = line.strip_prefix('+') {
        return index.trim().parse().ok().map(AppEvent::AddFavorite);
    }

    if let Some(command) = line.strip_prefix(':') {
        let command = command.trim();
        return match command {
            "q" | "quit" => Some(AppEvent::Quit),
            "fav" => Some(AppEvent::ListFavorites),
            _ => {
                if let Some(args) = command.strip_prefix("rm ") {
                    let (word, definition) = args.split_once(" | ")?;
                    return Some(AppEvent::RemoveFavorite {
                        word: word.trim().to_string(),
                        definition: definition.trim().to_string(),
                    });
                }
                command.parse().ok().map(AppEvent::SelectSuggestion)
            }
        };
    }

    Some(AppEvent::Query(line.to_string()))
}

/// Read stdin until EOF, `:q` or cancellation
pub async fn input_loop(
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // First prompt, later ones follow each `Ready`
    ui_to_app_tx.send(AppEvent::ListFavorites).await?;

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = cancel.cancelled() => None,
        };

        let Some(line) = line else {
            tracing::debug!("Input closed");
            ui_to_app_tx.send(AppEvent::Quit).await?;
            return Ok(());
        };

        match parse_input(&line) {
            Some(AppEvent::Quit) => {
                ui_to_app_tx.send(AppEvent::Quit).await?;
                return Ok(());
            }
            Some(event) => ui_to_app_tx.send(event).await?,
            None => {
                if !line.trim().is_empty() {
                    println!("Unknown command: {}", line.trim());
                }
                prompt();
            }
        }
    }
}

fn prompt() {
    print!("{PROMPT}");
    let _ = std::io::stdout().flush();
}

/// Print everything the event loop sends until `Quit`
pub async fn print_loop(app_to_ui_rx: AsyncReceiver<AppEvent>, interactive: bool) -> anyhow::Result<()> {
    loop {
        let event = app_to_ui_rx.recv().await?;
        match event {
            AppEvent::Quit => return Ok(()),
            AppEvent::Ready => {
                if interactive {
                    prompt();
                }
            }
            other => {
                if let Some(text) = render(&other) {
                    println!("{text}");
                }
            }
        }
    }
}

fn render_result(label: &str, result: &DisplayResult) -> String {
    if result.reading.is_empty() || result.reading == result.term {
        format!("{label} {}\n     {}", result.term, result.definition)
    } else {
        format!(
            "{label} {} [{}]\n     {}",
            result.term, result.reading, result.definition
        )
    }
}

fn render_favorite(record: &FavoriteRecord) -> String {
    let senses = record.definition.replace("; ", "\n     - ");
    format!("  * {} [{}]\n     - {}", record.word, record.reading, senses)
}

/// Text for one UI event, `None` for events with nothing to print
pub fn render(event: &AppEvent) -> Option<String> {
    let text = match event {
        AppEvent::ShowLog(lines) => lines
            .iter()
            .map(|line| format!("  » {line}"))
            .collect::<Vec<_>>()
            .join("\n"),
        AppEvent::ShowResults {
            title,
            numbered_from,
            results,
        } => {
            let mut out = vec![format!("── {title} ──")];
            for (i, result) in results.iter().enumerate() {
                let label = match numbered_from {
                    Some(first) => format!("{:>3}.", first + i),
                    None => "   -".to_string(),
                };
                out.push(render_result(&label, result));
            }
            out.join("\n")
        }
        AppEvent::ShowSuggestions(results) => {
            let mut out = vec!["── Did you mean ──".to_string()];
            for (i, result) in results.iter().enumerate() {
                out.push(render_result(&format!(" :{}", i + 1), result));
            }
            out.join("\n")
        }
        AppEvent::ShowFavorites(records) if records.is_empty() => {
            "No favorites saved yet.".to_string()
        }
        AppEvent::ShowFavorites(records) => {
            let mut out = vec![format!("── Favorites ({}) ──", records.len())];
            out.extend(records.iter().map(render_favorite));
            out.join("\n")
        }
        AppEvent::Notify(message) => message.clone(),
        AppEvent::Error(message) => format!("error: {message}"),
        _ => return None,
    };
    Some(text)
}
