//! Constituent form validation.
//!
//! Checks run in a fixed order and stop at the first failure, and every
//! failure names the field it belongs to so the surface can point at the
//! offending input. The Wisconsin check is a deliberately loose substring
//! heuristic, not address verification.

use bv_directory::ZipCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum length of each name field, in characters.
pub const MAX_NAME_CHARS: usize = 50;

/// Maximum length of the address field, in characters.
pub const MAX_ADDRESS_CHARS: usize = 200;

/// The three-field form every flow starts from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
}

/// Which form field a validation failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    FirstName,
    LastName,
    Address,
}

impl FormField {
    /// Wire name of the field, matching the JSON payload.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Address => "address",
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Address => "Address",
        }
    }
}

/// Structured error type for form validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    Required(FormField),
    NameTooLong(FormField),
    AddressTooLong,
    NotWisconsin,
    MissingZip,
}

impl FormError {
    /// The field the failure points at.
    #[must_use]
    pub const fn field(self) -> FormField {
        match self {
            Self::Required(field) | Self::NameTooLong(field) => field,
            Self::AddressTooLong | Self::NotWisconsin | Self::MissingZip => FormField::Address,
        }
    }
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required(field) => write!(f, "{} is required", field.label()),
            Self::NameTooLong(field) => {
                write!(f, "{} must be {MAX_NAME_CHARS} characters or less", field.label())
            }
            Self::AddressTooLong => {
                write!(f, "Address must be {MAX_ADDRESS_CHARS} characters or less")
            }
            Self::NotWisconsin => write!(f, "Please enter a Wisconsin address"),
            Self::MissingZip => {
                write!(f, "Please include a five-digit ZIP code in your address")
            }
        }
    }
}

impl std::error::Error for FormError {}

/// Validate a form, returning the trimmed input on success.
///
/// Check order: required fields, name lengths, address length, Wisconsin
/// marker (`wisconsin` or `wi`, case-insensitive), extractable ZIP.
///
/// # Errors
///
/// Returns the first [`FormError`] encountered, in that order.
pub fn validate_form(input: &FormInput) -> Result<FormInput, FormError> {
    let first_name = input.first_name.trim();
    let last_name = input.last_name.trim();
    let address = input.address.trim();

    for (field, value) in [
        (FormField::FirstName, first_name),
        (FormField::LastName, last_name),
        (FormField::Address, address),
    ] {
        if value.is_empty() {
            return Err(FormError::Required(field));
        }
    }

    for (field, value) in [(FormField::FirstName, first_name), (FormField::LastName, last_name)] {
        if value.chars().count() > MAX_NAME_CHARS {
            return Err(FormError::NameTooLong(field));
        }
    }

    if address.chars().count() > MAX_ADDRESS_CHARS {
        return Err(FormError::AddressTooLong);
    }

    let lowered = address.to_lowercase();
    if !lowered.contains("wisconsin") && !lowered.contains("wi") {
        return Err(FormError::NotWisconsin);
    }

    if ZipCode::extract(address).is_none() {
        return Err(FormError::MissingZip);
    }

    Ok(FormInput {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        address: address.to_string(),
    })
}
