//! A validated, type-safe wrapper for five-digit US ZIP codes.
//!
//! Wisconsin addresses carry the ZIP either bare (`53703`) or in ZIP+4 form
//! (`53703-1234`); resolution only ever uses the five-digit part.

use std::fmt;
use std::str::FromStr;

/// A validated five-digit ZIP code.
///
/// Construct via [`ZipCode::from_str`] (strict), [`ZipCode::from_digits`]
/// (left-zero-padded, for district table cells), or [`ZipCode::extract`]
/// (from free-form address text).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZipCode(String);

/// Error returned when a string is not a valid ZIP code.
#[derive(Debug, thiserror::Error)]
#[error("invalid ZIP code: {reason}")]
pub struct ZipCodeError {
    reason: &'static str,
}

const ZIP_LENGTH: usize = 5;

impl ZipCode {
    /// Return the ZIP code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse a bare digit string, left-padding with zeros to five digits.
    ///
    /// District exports store ZIPs as numbers, so New England-style codes
    /// arrive with their leading zeros stripped (`2134` for `02134`).
    ///
    /// # Errors
    /// Returns [`ZipCodeError`] if the input is empty, longer than five
    /// characters, or contains a non-digit.
    pub fn from_digits(s: &str) -> Result<Self, ZipCodeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ZipCodeError {
                reason: "must not be empty",
            });
        }
        if s.len() > ZIP_LENGTH {
            return Err(ZipCodeError {
                reason: "must be at most five digits",
            });
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ZipCodeError {
                reason: "must contain only digits",
            });
        }
        Ok(Self(format!("{s:0>5}")))
    }

    /// Extract the first standalone five-digit token from free-form text.
    ///
    /// A token is a maximal run of ASCII digits; runs of any other length
    /// are skipped, so a nine-digit account number never yields a ZIP. A
    /// ZIP+4 extension (`53703-1234`) qualifies because the hyphen ends the
    /// run at five digits.
    #[must_use]
    pub fn extract(text: &str) -> Option<Self> {
        let mut run_start = None;
        for (i, b) in text.bytes().enumerate() {
            if b.is_ascii_digit() {
                run_start.get_or_insert(i);
            } else if let Some(start) = run_start.take() {
                if i - start == ZIP_LENGTH {
                    return Some(Self(text[start..i].to_string()));
                }
            }
        }
        if let Some(start) = run_start {
            if text.len() - start == ZIP_LENGTH {
                return Some(Self(text[start..].to_string()));
            }
        }
        None
    }

    fn validate(s: &str) -> Result<(), ZipCodeError> {
        if s.len() != ZIP_LENGTH {
            return Err(ZipCodeError {
                reason: "must be exactly five characters",
            });
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ZipCodeError {
                reason: "must contain only digits",
            });
        }
        Ok(())
    }
}

impl FromStr for ZipCode {
    type Err = ZipCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ZipCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for ZipCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for ZipCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn extract_never_panics(text in ".*") {
            let _ = ZipCode::extract(&text);
        }

        #[test]
        fn extracted_zip_is_always_five_digits(text in ".*") {
            if let Some(zip) = ZipCode::extract(&text) {
                prop_assert_eq!(zip.as_str().len(), 5);
                prop_assert!(zip.as_str().bytes().all(|b| b.is_ascii_digit()));
            }
        }

        #[test]
        fn extract_finds_embedded_zip(prefix in "[a-zA-Z ,.]{0,40}", digits in "[0-9]{5}", suffix in "[a-zA-Z ,.]{0,40}") {
            let text = format!("{prefix}{digits}{suffix}");
            let zip = ZipCode::extract(&text);
            prop_assert_eq!(zip.map(|z| z.as_str().to_string()), Some(digits));
        }
    }
}
