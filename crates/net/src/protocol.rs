//! Network protocol message types
//!
//! All messages are JSON-serialized and length-prefixed on the wire. Each
//! request gets exactly one response on the same connection.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use seatwise_core::{ExamSeatingRecord, SeatingDraft, SeatingRecordSummary};

/// Client requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Generate and store a seating arrangement
    Generate { draft: SeatingDraft },

    /// List stored arrangements
    List,

    /// Fetch one arrangement
    Get { id: Uuid },

    /// Delete one arrangement
    Delete { id: Uuid },

    /// Liveness check
    Ping,
}

impl Request {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Request::Generate { .. } => "generate",
            Request::List => "list",
            Request::Get { .. } => "get",
            Request::Delete { .. } => "delete",
            Request::Ping => "ping",
        }
    }
}

/// Server responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    Generated { record: Box<ExamSeatingRecord> },

    Records { records: Vec<SeatingRecordSummary> },

    Record { record: Box<ExamSeatingRecord> },

    Deleted { id: Uuid },

    Pong,

    /// Request failed; `code` is the stable error kind
    Error { code: String, message: String },
}

impl Response {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Response::Error {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<seatwise_core::Error> for Response {
    fn from(e: seatwise_core::Error) -> Self {
        Response::error(e.code(), e.to_string())
    }
}
