//! Minimal raw-mode line editor: Tab completion of command names, Up/Down
//! history, Ctrl+L to clear, Ctrl+C/Ctrl+D to leave.

use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveToColumn,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use std::collections::VecDeque;
use std::io::{self, Write};

/// What ended a call to [`LineEditor::read_line`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl+C
    Interrupted,
    /// Ctrl+D on an empty line
    Eof,
}

/// Result of completing a command-name prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    None,
    /// The single candidate, with a trailing space.
    Unique(String),
    /// Several candidates; `common` is their longest shared prefix.
    Ambiguous { common: String, options: Vec<String> },
}

/// Completes the first word of `line`. Lines that already contain a space
/// are left alone.
pub fn complete(line: &str, suggestions: Vec<String>) -> Completion {
    if line.contains(char::is_whitespace) {
        return Completion::None;
    }
    match suggestions.len() {
        0 => Completion::None,
        1 => Completion::Unique(format!("{} ", suggestions[0])),
        _ => {
            let common = common_prefix(&suggestions);
            let common = if common.len() >= line.len() {
                common
            } else {
                line.to_string()
            };
            Completion::Ambiguous {
                common,
                options: suggestions,
            }
        }
    }
}

fn common_prefix(words: &[String]) -> String {
    let Some(first) = words.first() else {
        return String::new();
    };
    let mut prefix: Vec<char> = first.chars().collect();
    for word in &words[1..] {
        let shared = prefix
            .iter()
            .zip(word.chars())
            .take_while(|(a, b)| **a == *b)
            .count();
        prefix.truncate(shared);
    }
    prefix.into_iter().collect()
}

/// Editable line with a cursor measured in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Replaces the content and moves the cursor to the end.
    pub fn set(&mut self, text: &str) {
        self.chars = text.chars().collect();
        self.cursor = self.chars.len();
    }

    pub fn insert(&mut self, ch: char) {
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.chars.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.chars.len() {
            self.chars.remove(self.cursor);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.chars.len();
    }
}

/// Line editor with bounded history.
#[derive(Debug)]
pub struct LineEditor {
    history: VecDeque<String>,
    max_history: usize,
}

impl LineEditor {
    pub fn new(max_history: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(max_history),
            max_history,
        }
    }

    /// Records `line` unless it repeats the previous entry.
    pub fn add_history(&mut self, line: &str) {
        if self.max_history == 0 || self.history.back().map(String::as_str) == Some(line) {
            return;
        }
        if self.history.len() == self.max_history {
            self.history.pop_front();
        }
        self.history.push_back(line.to_string());
    }

    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    /// Reads one line in raw mode. `suggest` maps a prefix to command names.
    pub fn read_line<F>(&mut self, prompt: &str, suggest: F) -> Result<ReadOutcome>
    where
        F: Fn(&str) -> Vec<String>,
    {
        let _guard = RawModeGuard::new()?;
        let mut stdout = io::stdout();
        let mut buffer = LineBuffer::default();
        let mut draft = String::new();
        // Index into history while browsing; `None` means editing the draft.
        let mut recall: Option<usize> = None;

        redraw(&mut stdout, prompt, &buffer)?;
        loop {
            let Event::Key(key) = event::read().context("failed to read console event")? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key {
                KeyEvent {
                    code: KeyCode::Char('c'),
                    modifiers,
                    ..
                } if modifiers.contains(KeyModifiers::CONTROL) => {
                    write!(stdout, "^C\r\n")?;
                    stdout.flush()?;
                    return Ok(ReadOutcome::Interrupted);
                }
                KeyEvent {
                    code: KeyCode::Char('d'),
                    modifiers,
                    ..
                } if modifiers.contains(KeyModifiers::CONTROL) => {
                    if buffer.is_empty() {
                        write!(stdout, "\r\n")?;
                        stdout.flush()?;
                        return Ok(ReadOutcome::Eof);
                    }
                    buffer.delete();
                }
                KeyEvent {
                    code: KeyCode::Char('l'),
                    modifiers,
                    ..
                } if modifiers.contains(KeyModifiers::CONTROL) => {
                    queue!(stdout, Clear(ClearType::All), crossterm::cursor::MoveTo(0, 0))?;
                }
                KeyEvent {
                    code: KeyCode::Enter,
                    ..
                } => {
                    write!(stdout, "\r\n")?;
                    stdout.flush()?;
                    return Ok(ReadOutcome::Line(buffer.text()));
                }
                KeyEvent {
                    code: KeyCode::Tab, ..
                } => match complete(&buffer.text(), suggest(&buffer.text())) {
                    Completion::None => {}
                    Completion::Unique(line) => buffer.set(&line),
                    Completion::Ambiguous { common, options } => {
                        write!(stdout, "\r\n{}\r\n", options.join("  "))?;
                        buffer.set(&common);
                    }
                },
                KeyEvent {
                    code: KeyCode::Up, ..
                } => {
                    if self.history.is_empty() {
                        continue;
                    }
                    let index = match recall {
                        None => {
                            draft = buffer.text();
                            self.history.len() - 1
                        }
                        Some(index) => index.saturating_sub(1),
                    };
                    recall = Some(index);
                    buffer.set(&self.history[index]);
                }
                KeyEvent {
                    code: KeyCode::Down,
                    ..
                } => match recall {
                    Some(index) if index + 1 < self.history.len() => {
                        recall = Some(index + 1);
                        buffer.set(&self.history[index + 1]);
                    }
                    Some(_) => {
                        recall = None;
                        buffer.set(&draft);
                    }
                    None => {}
                },
                KeyEvent {
                    code: KeyCode::Backspace,
                    ..
                } => buffer.backspace(),
                KeyEvent {
                    code: KeyCode::Delete,
                    ..
                } => buffer.delete(),
                KeyEvent {
                    code: KeyCode::Left, ..
                } => buffer.left(),
                KeyEvent {
                    code: KeyCode::Right,
                    ..
                } => buffer.right(),
                KeyEvent {
                    code: KeyCode::Home, ..
                } => buffer.home(),
                KeyEvent {
                    code: KeyCode::End, ..
                } => buffer.end(),
                KeyEvent {
                    code: KeyCode::Char(ch),
                    modifiers,
                    ..
                } if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                    buffer.insert(ch)
                }
                _ => continue,
            }
            redraw(&mut stdout, prompt, &buffer)?;
        }
    }
}

fn redraw(stdout: &mut io::Stdout, prompt: &str, buffer: &LineBuffer) -> Result<()> {
    let column = prompt.chars().count() + 1 + buffer.cursor();
    queue!(
        stdout,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(prompt),
        Print(' '),
        Print(buffer.text()),
        MoveToColumn(u16::try_from(column).unwrap_or(u16::MAX)),
    )?;
    stdout.flush()?;
    Ok(())
}

struct RawModeGuard;

impl RawModeGuard {
    fn new() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
