//! Bread ICS Core Library
//!
//! This library provides core functionality for computing backward-chained
//! bread preparation schedules and exporting them as ICS calendar files.

pub mod catalog;
pub mod error;
pub mod ics;
pub mod schedule;
pub mod store;
pub mod types;

// Re-export core types and error handling
pub use error::{Error, Result};
pub use types::*;

/// Commonly used items
pub mod prelude {
    pub use crate::{catalog::*, ics::*, schedule::*, store::*, types::*};
}
