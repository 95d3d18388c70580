use kanal::{AsyncReceiver, AsyncSender};
use lese_types::{AppEvent, Rect, Size, TextSource, UiEvent};
use tokio_util::sync::CancellationToken;

pub const HELP: &str = "\
commands (N = word number shown in brackets):
  enter N | leave N        pointer over / off a word
  touch N | release N      touch start / end on a word
  dismiss N                close an overlay immediately
  listen N | add N         pronounce / add to vocabulary
  measure N W H            report the real overlay size
  set FIELD VALUE          show_delay_ms, hide_delay_ms or gap
  text ...                 read new text (any other line does too)
  quit";

/// Words sit on a virtual grid of this many columns
const GRID_COLUMNS: usize = 10;

#[derive(Debug, Clone)]
pub enum ConsoleInput {
    Event(AppEvent),
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(line: &str, viewport: Size) -> ConsoleInput {
    let line = line.trim();
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let span = || {
        rest.parse::<usize>()
            .map_err(|_| format!("'{command}' expects a word number, got '{rest}'"))
    };
    let pointer = |make: fn(usize) -> UiEvent| match span() {
        Ok(span) => ConsoleInput::Event(AppEvent::UiEvent(make(span))),
        Err(message) => ConsoleInput::Invalid(message),
    };

    match command.to_lowercase().as_str() {
        "" => ConsoleInput::Invalid("empty line".to_string()),
        "help" | "?" => ConsoleInput::Help,
        "quit" | "exit" => ConsoleInput::Quit,
        "enter" | "touch" => match span() {
            Ok(span) => {
                let anchor = anchor_for(span, viewport);
                let event = if command.eq_ignore_ascii_case("enter") {
                    UiEvent::PointerEnter { span, anchor, viewport }
                } else {
                    UiEvent::TouchStart { span, anchor, viewport }
                };
                ConsoleInput::Event(AppEvent::UiEvent(event))
            }
            Err(message) => ConsoleInput::Invalid(message),
        },
        "leave" => pointer(|span| UiEvent::PointerLeave { span }),
        "release" => pointer(|span| UiEvent::TouchEnd { span }),
        "dismiss" => pointer(|span| UiEvent::Dismiss { span }),
        "listen" => pointer(|span| UiEvent::Listen { span }),
        "add" => pointer(|span| UiEvent::AddToVocabulary { span }),
        "measure" => parse_measure(rest),
        "set" => match rest.split_once(char::is_whitespace) {
            Some((field, value)) => ConsoleInput::Event(AppEvent::ConfigUpdate {
                field: field.to_string(),
                value: value.trim().to_string(),
            }),
            None => ConsoleInput::Invalid("usage: set FIELD VALUE".to_string()),
        },
        "text" => ConsoleInput::Event(AppEvent::TextInput(rest.to_string())),
        _ => ConsoleInput::Event(AppEvent::RawTextInput {
            text: line.to_string(),
            source: TextSource::Stdin,
        }),
    }
}

fn parse_measure(rest: &str) -> ConsoleInput {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let parsed = match parts.as_slice() {
        [span, width, height] => span
            .parse::<usize>()
            .ok()
            .zip(width.parse::<f32>().ok())
            .zip(height.parse::<f32>().ok())
            .map(|((span, width), height)| (span, width, height)),
        _ => None,
    };

    match parsed {
        Some((span, width, height)) => ConsoleInput::Event(AppEvent::UiEvent(UiEvent::OverlayMeasured {
            span,
            size: Size::new(width, height),
        })),
        None => ConsoleInput::Invalid("usage: measure N WIDTH HEIGHT".to_string()),
    }
}

/// Stand-in geometry for a console host that has no layout
pub fn anchor_for(span: usize, viewport: Size) -> Rect {
    let cell = viewport.width / GRID_COLUMNS as f32;
    let column = (span % GRID_COLUMNS) as f32;
    let row = (span / GRID_COLUMNS) as f32;
    Rect::new(column * cell, viewport.height / 2.0 + row * 24.0, cell * 0.8, 20.0)
}

pub async fn console_loop(
    lines: AsyncReceiver<String>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    viewport: Size,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.recv() => match line {
                Ok(line) => line,
                Err(_) => {
                    tracing::info!("Console input closed");
                    cancel.cancelled().await;
                    break;
                }
            },
        };

        match parse_line(&line, viewport) {
            ConsoleInput::Event(event) => ui_to_app_tx.send(event).await?,
            ConsoleInput::Help => println!("{HELP}"),
            ConsoleInput::Quit => {
                ui_to_app_tx.send(AppEvent::Shutdown).await?;
                break;
            }
            ConsoleInput::Invalid(message) => println!("? {message}"),
        }
    }

    Ok(())
}
