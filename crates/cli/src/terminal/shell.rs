use super::{ConsoleHelper, LineEditor, ReadOutcome};
use crate::session::TerminalSession;
use anyhow::{Context, Result};
use std::io::{self, BufRead, IsTerminal};
use tracing::info;
use w3t_config::ConsoleConfig;
use w3t_console::Console;

/// `exit` and `quit` end the shell; they are never dispatched.
pub fn is_exit_command(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "exit" | "quit")
}

/// Reads, dispatches and prints until `exit`, Ctrl+C/Ctrl+D or end of input.
///
/// Each dispatch is awaited before the next line is read, so at most one
/// command is in flight.
pub async fn run_shell(
    console: &mut Console<TerminalSession>,
    config: &ConsoleConfig,
) -> Result<()> {
    let interactive = io::stdin().is_terminal() && io::stdout().is_terminal();
    let mut editor = LineEditor::new(config.history_size);

    loop {
        let line = if interactive {
            let outcome = tokio::task::block_in_place(|| {
                editor.read_line(&config.prompt, |prefix| console.suggest(prefix))
            })?;
            match outcome {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted | ReadOutcome::Eof => break,
            }
        } else {
            match read_plain_line()? {
                Some(line) => line,
                None => break,
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_exit_command(line) {
            break;
        }
        editor.add_history(line);

        let output = console.dispatch(line).await;
        if let Err(err) = ConsoleHelper::output(&output) {
            ConsoleHelper::error(format!("{err:#}"));
        }
    }

    info!(target: "w3t", "console session ended");
    Ok(())
}

/// Line-at-a-time fallback for pipes and dumb terminals. `None` at end of
/// input.
fn read_plain_line() -> Result<Option<String>> {
    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
