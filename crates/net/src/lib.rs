//! Seatwise Network Library
//!
//! Provides the TCP request/response transport for the seating service.
//!
//! # Architecture
//!
//! - **Server**: Owns the database handle and runs seating operations
//! - **Client**: Sends requests and awaits the matching response
//! - **Protocol**: Length-prefixed JSON messages
//!
//! # Usage
//!
//! ```ignore
//! let server = Server::start(addr, Arc::new(Mutex::new(db))).await?;
//!
//! let mut client = Client::connect(server.addr()).await?;
//! let record = client.generate(draft).await?;
//! let same = client.get(record.id).await?;
//! ```

pub mod client;
pub mod error;
mod frame;
pub mod protocol;
pub mod server;

pub use client::Client;
pub use error::{Error, Result};
pub use frame::MAX_FRAME_SIZE;
pub use protocol::{Request, Response};
pub use server::Server;

/// Default port for Seatwise servers
pub const DEFAULT_PORT: u16 = 7341;
