//! `mailto:` URI assembly.
//!
//! The URI anatomy is `mailto:{addrs}?subject={s}&body={b}`: recipients are
//! comma-joined unencoded (mail clients expect raw addresses there), subject
//! and body are percent-encoded as RFC 3986 query components.

use bv_directory::{is_valid_email, Resolution};
use serde::Serialize;

use crate::personalize::PersonalizedLetter;

/// A composed link plus the recipients that made it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MailtoLink {
    pub uri: String,
    pub recipients: Vec<String>,
}

/// Error composing a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    /// Every candidate recipient was blank or malformed.
    #[error("no valid recipient email addresses")]
    NoValidRecipients,
}

/// Compose a `mailto:` link from candidate recipients and personalized text.
///
/// Candidates are filtered to syntactically valid addresses and deduplicated
/// in order. Blank emails are expected input here (rosters blank invalid
/// addresses rather than dropping the member), so a single valid recipient
/// still composes.
///
/// # Errors
/// Returns [`ComposeError::NoValidRecipients`] when no candidate survives
/// the filter.
pub fn compose<'a, I>(candidates: I, subject: &str, body: &str) -> Result<MailtoLink, ComposeError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut recipients: Vec<String> = Vec::new();
    for candidate in candidates {
        let candidate = candidate.trim();
        if is_valid_email(candidate) && !recipients.iter().any(|seen| seen == candidate) {
            recipients.push(candidate.to_string());
        }
    }
    if recipients.is_empty() {
        return Err(ComposeError::NoValidRecipients);
    }

    let uri = format!(
        "mailto:{}?subject={}&body={}",
        recipients.join(","),
        urlencoding::encode(subject),
        urlencoding::encode(body)
    );
    Ok(MailtoLink { uri, recipients })
}

/// Compose the link for a resolved pair of legislators, senator first.
///
/// # Errors
/// Returns [`ComposeError::NoValidRecipients`] when both officials have
/// blank emails.
pub fn compose_for(
    resolution: &Resolution,
    letter: &PersonalizedLetter,
) -> Result<MailtoLink, ComposeError> {
    compose(
        [
            resolution.senator.email.as_str(),
            resolution.representative.email.as_str(),
        ],
        &letter.subject,
        &letter.body,
    )
}
