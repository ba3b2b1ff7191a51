use thiserror::Error;

/// Registry integrity failures. These are raised while the registry is being
/// assembled and must stop the program from starting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsoleError {
    /// Two registrations used the same command name.
    #[error("command '{0}' is registered more than once")]
    DuplicateCommand(String),
    /// A registration tried to replace the built-in `help` command.
    #[error("command '{0}' is reserved by the console")]
    ReservedCommand(String),
    /// The name is empty or contains whitespace, so it could never be typed.
    #[error("invalid command name '{0}'")]
    InvalidName(String),
}

/// Failure returned by a command handler.
///
/// The dispatcher turns it into a single display line. Use
/// [`OperationExt::operation`] to name what was being attempted so the line
/// reads `Error fetching address: <message>`; untagged failures render as
/// `Error executing <command>: <message>`.
#[derive(Debug, Error)]
pub enum CommandError {
    /// A failure while performing a named operation.
    #[error("{operation}: {}", chain_message(.error))]
    Operation {
        /// Gerund phrase such as `fetching block`.
        operation: String,
        /// Underlying cause.
        error: anyhow::Error,
    },
    /// Any other failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CommandError {
    /// Builds an operation failure from a plain message.
    pub fn failed(operation: impl Into<String>, message: impl std::fmt::Display) -> Self {
        CommandError::Operation {
            operation: operation.into(),
            error: anyhow::anyhow!("{}", message),
        }
    }

    /// Renders the failure as the line shown to the user.
    pub fn render(&self, command: &str) -> String {
        match self {
            CommandError::Operation { operation, error } => {
                format!("Error {operation}: {}", chain_message(error))
            }
            CommandError::Other(error) => {
                format!("Error executing {command}: {}", chain_message(error))
            }
        }
    }
}

/// Joins the error and its sources with `: `, skipping any source whose text
/// the line already contains. Many transport errors print their cause inside
/// their own message as well as exposing it as a source.
fn chain_message(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    for cause in error.chain().skip(1) {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
    }
    message
}

/// Tags a failing result with the operation that was in progress.
pub trait OperationExt<T> {
    fn operation(self, operation: impl Into<String>) -> Result<T, CommandError>;
}

impl<T, E> OperationExt<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn operation(self, operation: impl Into<String>) -> Result<T, CommandError> {
        self.map_err(|err| CommandError::Operation {
            operation: operation.into(),
            error: err.into(),
        })
    }
}
