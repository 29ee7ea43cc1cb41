//! Daemon error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine {0} directory")]
    NoProjectDir(&'static str),

    #[error(transparent)]
    Core(#[from] seatwise_core::Error),

    #[error(transparent)]
    Net(#[from] seatwise_net::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
