use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Card index out of range")]
    InvalidIndex,
    #[error("Every symbol must appear on exactly two cards")]
    UnbalancedLayout,
    #[error("Session is not active")]
    NotActive,
    #[error("Session is not paused")]
    NotPaused,
    #[error("Not every pair has been matched yet")]
    BoardNotCleared,
    #[error("Session already finished, the result was already recorded")]
    AlreadyFinished,
}

pub type Result<T> = core::result::Result<T, GameError>;
