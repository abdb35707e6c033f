//! Error types for the memory museum

use thiserror::Error;

/// Result type alias for museum operations
pub type MuseumResult<T> = Result<T, MuseumError>;

/// Errors raised by storage, media conversion and playback
#[derive(Error, Debug)]
pub enum MuseumError {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not an image: {0}")]
    NotAnImage(String),

    #[error("Audio playback error: {0}")]
    Playback(String),

    #[error("Background task error: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for MuseumError {
    fn from(err: tokio::task::JoinError) -> Self {
        MuseumError::Task(err.to_string())
    }
}

impl From<rodio::StreamError> for MuseumError {
    fn from(err: rodio::StreamError) -> Self {
        MuseumError::Playback(err.to_string())
    }
}

impl From<rodio::PlayError> for MuseumError {
    fn from(err: rodio::PlayError) -> Self {
        MuseumError::Playback(err.to_string())
    }
}

impl From<rodio::decoder::DecoderError> for MuseumError {
    fn from(err: rodio::decoder::DecoderError) -> Self {
        MuseumError::Playback(err.to_string())
    }
}
