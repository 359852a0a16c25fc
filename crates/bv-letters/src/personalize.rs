//! Placeholder substitution.
//!
//! Personalization is literal text replacement, applied to both subject and
//! body. One pass removes every token, so a second pass is a no-op; no
//! escaping happens here (the mailto composer encodes downstream).

use bv_directory::Resolution;
use serde::Serialize;

use crate::catalog::Letter;

/// Token replaced with the constituent's `"First Last"`.
pub const FULL_NAME_TOKEN: &str = "[Full Name]";

/// Token replaced with both resolved officials,
/// `"RepFirst RepLast and SenFirst SenLast"`.
pub const OFFICIALS_TOKEN: &str = "[Representative/Senator Name]";

/// A letter with every token substituted, ready for composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedLetter {
    pub subject: String,
    pub body: String,
}

/// Substitute the constituent's name and their resolved officials into a
/// letter.
#[must_use]
pub fn personalize(
    letter: &Letter,
    first_name: &str,
    last_name: &str,
    resolution: &Resolution,
) -> PersonalizedLetter {
    let full_name = format!("{first_name} {last_name}");
    let officials = format!(
        "{} and {}",
        resolution.representative.full_name(),
        resolution.senator.full_name()
    );
    PersonalizedLetter {
        subject: substitute(letter.subject, &full_name, &officials),
        body: substitute(letter.body, &full_name, &officials),
    }
}

fn substitute(template: &str, full_name: &str, officials: &str) -> String {
    template
        .replace(FULL_NAME_TOKEN, full_name)
        .replace(OFFICIALS_TOKEN, officials)
}
