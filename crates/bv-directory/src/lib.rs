//! Wisconsin legislator reference data for `BadgerVoice`.
//!
//! This crate owns the static reference tables the advocacy flow runs on:
//! the senate and assembly rosters, the ZIP-to-district map, and the
//! exact-match resolution from a constituent's address to their two state
//! legislators. Parsing is all-or-nothing: either every table loads and
//! cleans successfully, or no [`Directory`] is produced.

mod csv;
mod record;
mod store;
mod zip;

pub use csv::{Row, Sheet, SheetError};
pub use record::{is_valid_email, Chamber, Legislator, Party};
pub use store::{Directory, DirectoryError, DistrictRow, Resolution, ResolveError};
pub use zip::{ZipCode, ZipCodeError};
