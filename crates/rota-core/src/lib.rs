//! Core types and trait definitions for the rota duty calendar.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod assignment;
pub mod day;
pub mod error;
pub mod guard;
pub mod range;
pub mod store;

pub use assignment::{Assignment, DayView, NO_ASSIGNMENTS};
pub use day::Day;
pub use error::{Error, Result};
pub use guard::{ConcurrencyGuard, EditOp};
