use anyhow::{Context, Result};
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, IsTerminal, Write};

/// Colored console output. Colors are dropped when stdout is redirected.
pub struct ConsoleHelper;

impl ConsoleHelper {
    /// Alternates tag and value colors: `["Version: ", "0.1.0"]`.
    pub fn info(parts: impl IntoIterator<Item = impl AsRef<str>>) {
        let mut stdout = io::stdout();
        for (index, part) in parts.into_iter().enumerate() {
            let color = if index % 2 == 0 { Some(Color::Cyan) } else { None };
            write_colored(&mut stdout, color, part.as_ref()).ok();
        }
        writeln!(stdout).ok();
        stdout.flush().ok();
    }

    pub fn warning(message: impl AsRef<str>) {
        log_single("Warning", Color::Yellow, message);
    }

    pub fn error(message: impl AsRef<str>) {
        log_single("Error", Color::Red, message);
    }

    /// Writes a command's output. The clear-screen sequence is passed
    /// through without a trailing newline.
    pub fn output(text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        if text.is_empty() {
            return Ok(());
        }
        if text.starts_with("\x1b[2J") {
            write!(stdout, "{text}")?;
        } else {
            writeln!(stdout, "{text}")?;
        }
        stdout.flush().context("failed to flush stdout")
    }

    pub fn banner() {
        let mut stdout = io::stdout();
        let rule = "=".repeat(48);
        write_colored(
            &mut stdout,
            Some(Color::Green),
            &format!("{rule}\n  Web3 Terminal - Your Gateway to the Blockchain\n{rule}"),
        )
        .ok();
        writeln!(stdout).ok();
        Self::info(["Version: ", env!("CARGO_PKG_VERSION")]);
        writeln!(stdout, "Type 'help' for available commands, 'exit' to quit.\n").ok();
        stdout.flush().ok();
    }
}

fn log_single(tag: &str, color: Color, message: impl AsRef<str>) {
    let mut stdout = io::stdout();
    write_colored(&mut stdout, Some(color), &format!("{tag}: ")).ok();
    writeln!(stdout, "{}", message.as_ref()).ok();
    stdout.flush().ok();
}

fn write_colored(stdout: &mut io::Stdout, color: Option<Color>, text: &str) -> io::Result<()> {
    match color {
        Some(color) if stdout.is_terminal() => {
            queue!(stdout, SetForegroundColor(color), Print(text), ResetColor)
        }
        _ => write!(stdout, "{text}"),
    }
}
