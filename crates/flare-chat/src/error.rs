//! Chat error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Please enter a message.")]
    EmptyMessage,
}

pub type ChatResult<T> = Result<T, ChatError>;
