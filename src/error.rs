use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// Message character that does not fit in one 8-bit symbol
    #[error("character {character:?} at position {position} is outside the 8-bit range")]
    InputDomain { character: char, position: usize },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}
