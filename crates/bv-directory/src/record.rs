//! Legislator records and the cleaning rules applied once at load time.
//!
//! Roster exports are messy: party arrives as a letter code or a full word,
//! phone numbers in half a dozen shapes, and some email cells double the
//! address as `addr:mailto:addr`. Everything here normalizes a raw cell
//! into the cleaned form the rest of the system relies on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Political party, normalized from the roster's `Party` column.
///
/// Letter codes and full spellings map to the two major parties; anything
/// else passes through verbatim so the data is never silently rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Party {
    Democrat,
    Republican,
    Other(String),
}

impl Party {
    /// Normalize a raw party cell.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "d" | "dem" | "democrat" | "democratic" => Self::Democrat,
            "r" | "rep" | "republican" => Self::Republican,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// Human-readable party name; pass-through values display as given.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Democrat => "Democrat",
            Self::Republican => "Republican",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Party {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Party {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// Which house of the Wisconsin legislature a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chamber {
    Senate,
    Assembly,
}

impl Chamber {
    /// Title used when addressing a member of this chamber.
    #[must_use]
    pub const fn member_title(self) -> &'static str {
        match self {
            Self::Senate => "Senator",
            Self::Assembly => "Representative",
        }
    }
}

impl fmt::Display for Chamber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Senate => "Senate",
            Self::Assembly => "Assembly",
        })
    }
}

/// One cleaned legislator record.
///
/// `email` is either a syntactically valid address or empty; `photo` is
/// always populated (a placeholder is synthesized when the export has
/// none).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legislator {
    pub first_name: String,
    pub last_name: String,
    pub party: Party,
    pub chamber: Chamber,
    pub district: String,
    pub email: String,
    pub phone: String,
    pub photo: String,
}

impl Legislator {
    /// `"First Last"`, the form the letter templates use.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Check an address against the simple `local@domain.tld` shape.
///
/// Deliberately not RFC 5322: one `@`, no whitespace, and a dotted domain
/// is all the roster data ever needs.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains(char::is_whitespace) {
        return false;
    }
    if domain.contains('@') || domain.contains(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Clean a raw email cell: strip the doubled `:mailto:` form some exports
/// carry, then blank anything that fails the shape check.
pub(crate) fn clean_email(raw: &str) -> String {
    let cleaned = match raw.find(":mailto:") {
        Some(idx) => &raw[..idx],
        None => raw,
    }
    .trim();
    if is_valid_email(cleaned) {
        cleaned.to_string()
    } else {
        String::new()
    }
}

/// Reformat a phone cell as `(XXX) XXX-XXXX` when it contains exactly ten
/// digits; anything else is left as published.
pub(crate) fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
    } else {
        raw.trim().to_string()
    }
}

/// Placeholder portrait URL from the member's initials and party color.
pub(crate) fn placeholder_photo(first_name: &str, last_name: &str, party: &Party) -> String {
    let color = match party {
        Party::Democrat => "155756",
        Party::Republican => "88AEAD",
        Party::Other(_) => "9ca3af",
    };
    let initials: String = [first_name, last_name]
        .iter()
        .filter_map(|name| name.chars().next())
        .flat_map(char::to_uppercase)
        .collect();
    format!("https://via.placeholder.com/150x200/{color}/ffffff?text={initials}")
}
