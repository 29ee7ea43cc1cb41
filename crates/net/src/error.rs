//! Network error types

use std::io;

/// Network result type
pub type Result<T> = std::result::Result<T, Error>;

/// Network errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Frame length is zero or over `MAX_FRAME_SIZE`
    #[error("Frame size {len} bytes outside 1..={max}")]
    FrameSize { len: usize, max: u32 },

    /// Frame arrived intact but its payload could not be decoded
    #[error("Invalid payload: {0}")]
    Decode(String),

    /// The server answered with an error
    #[error("{code}: {message}")]
    Remote { code: String, message: String },
}

impl Error {
    /// Error code reported by the server, if this is a remote error
    pub fn remote_code(&self) -> Option<&str> {
        match self {
            Error::Remote { code, .. } => Some(code),
            _ => None,
        }
    }
}
