use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaretError {
    #[error("Invalid saved-position handle {handle} (saved positions: {len})")]
    InvalidHandle { handle: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal driver error: {0}")]
    Driver(String),
}

pub type Result<T> = std::result::Result<T, CaretError>;
