//! Seatwise Core Library
//!
//! Exam seating models, hall registry, seat allocation, supervisor
//! assignment and storage for the Seatwise service.

pub mod allocator;
pub mod dispersion;
pub mod error;
pub mod grid;
pub mod invariants;
pub mod models;
pub mod registry;
pub mod roster;
pub mod service;
pub mod storage;
pub mod supervisor;
pub mod validation;

pub use allocator::allocate;
pub use error::{Error, Result};
pub use grid::SeatGrid;
pub use models::*;
pub use registry::HallRegistry;
pub use roster::{RosterSource, StaticDirectory, TeacherSource};
pub use service::SeatingService;
pub use storage::{Database, DirectoryStore, SeatingRepository, SeatingStore, Storage};
pub use supervisor::assign_supervisors;
pub use validation::validate_request;
