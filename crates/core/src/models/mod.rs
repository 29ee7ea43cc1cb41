//! Data models for Seatwise

mod hall;
mod record;
mod request;
mod student;

pub use hall::*;
pub use record::*;
pub use request::*;
pub use student::*;
