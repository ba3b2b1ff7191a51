//! Interactive front end: colored console output, the raw-mode line
//! editor and the read-dispatch-print loop.

mod console_helper;
mod line_editor;
mod shell;

pub use console_helper::ConsoleHelper;
pub use line_editor::{complete, Completion, LineBuffer, LineEditor, ReadOutcome};
pub use shell::{is_exit_command, run_shell};
