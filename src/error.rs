use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for pstree
#[derive(Error, Debug)]
pub enum PstreeError {
    #[error("Cannot open {}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read status of process {pid}")]
    RecordUnreadable {
        pid: u32,
        #[source]
        source: io::Error,
    },

    #[error("invalid option {0}")]
    InvalidOption(String),

    #[error("Failed to write output")]
    OutputWrite(#[source] io::Error),
}

/// Result type alias for pstree
pub type Result<T> = std::result::Result<T, PstreeError>;

/// Longest option token echoed back in an invalid option diagnostic
pub const MAX_OPTION_ECHO: usize = 20;

impl PstreeError {
    /// Create a source unavailable error
    pub fn source_unavailable<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        PstreeError::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Create a record unreadable error
    pub fn record_unreadable(pid: u32, source: io::Error) -> Self {
        PstreeError::RecordUnreadable { pid, source }
    }

    /// Create an invalid option error, truncating the offending token
    pub fn invalid_option<S: AsRef<str>>(token: S) -> Self {
        let token: String = token.as_ref().chars().take(MAX_OPTION_ECHO).collect();
        PstreeError::InvalidOption(token)
    }

    pub fn output_write(source: io::Error) -> Self {
        PstreeError::OutputWrite(source)
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            PstreeError::InvalidOption(_) => 2,
            PstreeError::SourceUnavailable { .. }
            | PstreeError::RecordUnreadable { .. }
            | PstreeError::OutputWrite(_) => 1,
        }
    }
}
