use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Player path/name empty")]
    EmptyPlayer,

    #[error("Player not supported. Supported players: {supported}")]
    UnsupportedPlayer { supported: String },

    #[error("Player not found at \"{0}\"")]
    PlayerNotFoundAt(String),

    #[error("Player not found in PATH")]
    PlayerNotFoundInPath,

    #[error("Player needs to be a full path or file name in PATH")]
    InvalidPlayerPath,

    #[error("Invalid scheme '{scheme}': {reason}")]
    InvalidScheme { scheme: String, reason: String },

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(&'static str),

    #[error("Could not determine the {0} directory")]
    DirectoryUnavailable(&'static str),

    #[error("Registry error at '{key}': {message}")]
    Registry { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn registry(key: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Error::Registry {
            key: key.into(),
            message: message.to_string(),
        }
    }
}
