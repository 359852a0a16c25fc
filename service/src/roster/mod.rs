//! Reference data acquisition.
//!
//! Fetches the three published CSV tables (senate roster, assembly roster,
//! district map) and assembles them into a [`bv_directory::Directory`].
//!
//! # Architecture
//!
//! The module uses a trait-based design for testability:
//!
//! - [`RosterSource`] - Trait defining the three fetch operations
//! - [`HttpRosterSource`] - Real HTTP implementation using reqwest
//! - [`load_directory`] - Concurrent, time-budgeted load of all three tables
//!
//! Loading is all-or-nothing: if any table fails to download or parse, the
//! whole load fails and no partial directory is ever produced.

mod load;
mod source;

pub use load::{load_directory, LoadError};
pub use source::{HttpRosterSource, RosterSource, SourceError};
