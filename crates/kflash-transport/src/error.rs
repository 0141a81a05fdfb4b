use thiserror::Error;

pub type TransportResult<T> = std::result::Result<T, TransportError>;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Tool not executable: {0}")]
    NotExecutable(String),

    #[error("Tool failed: {program} (exit={code:?})")]
    ToolFailed { program: String, code: Option<i32> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
