//! Error types for fmhost-core.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for fmhost-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No engine instance could be created. Fatal at startup.
    #[error("Engine initialization failed: {0}")]
    EngineInit(String),

    /// Chip count or emulator index rejected; the engine keeps its last-good configuration.
    #[error("Configuration rejected: {0}")]
    Config(String),

    /// Bank file missing or unreadable; the engine keeps its previous bank.
    #[error("Failed to load bank '{}': {reason}", path.display())]
    BankLoad { path: PathBuf, reason: String },

    #[error("Unknown engine: {0}")]
    UnknownEngine(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid device: {0}")]
    InvalidDevice(String),

    #[cfg(feature = "audio-io")]
    #[error("Audio device not available")]
    DeviceNotAvailable(#[from] cpal::DefaultStreamConfigError),

    #[cfg(feature = "audio-io")]
    #[error("Failed to build audio stream")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[cfg(feature = "audio-io")]
    #[error("Failed to play audio stream")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[cfg(feature = "audio-io")]
    #[error("Failed to enumerate devices")]
    DevicesError(#[from] cpal::DevicesError),

    #[cfg(feature = "audio-io")]
    #[error("Failed to get device name")]
    DeviceNameError(#[from] cpal::DeviceNameError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn bank_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::BankLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the live engine is still usable after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Config(_) | Error::BankLoad { .. })
    }
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_load_message_names_path() {
        let err = Error::bank_load("/tmp/missing.sf2", "not found");
        assert_eq!(
            err.to_string(),
            "Failed to load bank '/tmp/missing.sf2': not found"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_init_error_is_fatal() {
        assert!(!Error::EngineInit("no engine".into()).is_recoverable());
        assert!(Error::Config("chips".into()).is_recoverable());
    }
}
