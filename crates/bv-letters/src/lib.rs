//! Advocacy letters for `BadgerVoice`.
//!
//! Four prewritten letters urging Wisconsin cannabis legalization, each
//! argued from a different angle. This crate owns the letter copy, the
//! placeholder substitution that personalizes a letter for one constituent
//! and their two legislators, and the assembly of the final `mailto:` URI.

mod catalog;
mod mailto;
mod personalize;

pub use catalog::{Letter, Topic, TopicError};
pub use mailto::{compose, compose_for, ComposeError, MailtoLink};
pub use personalize::{personalize, PersonalizedLetter, FULL_NAME_TOKEN, OFFICIALS_TOKEN};
