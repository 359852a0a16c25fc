//! REST API handlers and `OpenAPI` documentation.
//!
//! All domain responses are wire DTOs with `ToSchema` derives so the
//! `OpenAPI` document stays in lockstep with what the handlers return.
//! Failures are RFC 7807 problem details.

// The OpenApi derive macro generates code that triggers this lint
#![allow(clippy::needless_for_each)]

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bv_directory::{Directory, Legislator, Resolution, ResolveError};
use bv_letters::{compose_for, personalize, Letter, Topic};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::{OpenApi, ToSchema};

use crate::build_info::BuildInfo;
use crate::validation::{validate_form, FormError, FormInput};

/// How much of a letter body the list endpoint shows.
const PREVIEW_CHARS: usize = 300;

/// Serialize a `StatusCode` as its `u16` representation.
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires `&T` signature
fn serialize_status_code<S: Serializer>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u16(status.as_u16())
}

/// RFC 7807 Problem Details error response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDetails {
    /// URI reference identifying the problem type
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable summary
    pub title: String,
    /// HTTP status code
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub status: StatusCode,
    /// Human-readable explanation specific to this occurrence
    pub detail: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ProblemExtensions>,
}

/// Extended error information with a machine-readable code.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProblemExtensions {
    /// Stable error code
    pub code: String,
    /// Field that caused the error (for validation errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ProblemDetails {
    fn new(
        status: StatusCode,
        slug: &str,
        title: &str,
        detail: String,
        code: &str,
        field: Option<String>,
    ) -> Self {
        Self {
            problem_type: format!("https://badgervoice.org/errors/{slug}"),
            title: title.to_string(),
            status,
            detail,
            extensions: Some(ProblemExtensions {
                code: code.to_string(),
                field,
            }),
        }
    }

    /// 400 for a rejected form, pointing at the offending field.
    #[must_use]
    pub fn validation(err: &FormError) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "validation",
            "Invalid Input",
            err.to_string(),
            "VALIDATION_FAILED",
            Some(err.field().as_str().to_string()),
        )
    }

    /// 404 for a topic key that names no letter.
    #[must_use]
    pub fn unknown_topic(detail: String) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "unknown-topic",
            "Not Found",
            detail,
            "UNKNOWN_TOPIC",
            None,
        )
    }

    /// 400 or 404 depending on why the address could not be matched.
    #[must_use]
    pub fn resolution_failed(err: &ResolveError) -> Self {
        match err {
            ResolveError::MissingZip => Self::new(
                StatusCode::BAD_REQUEST,
                "validation",
                "Invalid Input",
                err.to_string(),
                "VALIDATION_FAILED",
                Some("address".to_string()),
            ),
            ResolveError::UnresolvedZip(_) => Self::new(
                StatusCode::NOT_FOUND,
                "zip-not-found",
                "Not Found",
                err.to_string(),
                "ZIP_NOT_FOUND",
                None,
            ),
            ResolveError::UnmatchedLegislator { .. } => Self::new(
                StatusCode::NOT_FOUND,
                "legislator-not-found",
                "Not Found",
                err.to_string(),
                "LEGISLATOR_NOT_FOUND",
                None,
            ),
        }
    }

    /// 422 when neither matched official has a usable email address.
    #[must_use]
    pub fn no_valid_recipients() -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "no-valid-recipients",
            "Unprocessable Content",
            "Neither matched official has a usable email address".to_string(),
            "NO_VALID_RECIPIENTS",
            None,
        )
    }

    /// Create an internal server error response.
    #[must_use]
    pub fn internal_error(detail: &str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal",
            "Internal Server Error",
            detail.to_string(),
            "INTERNAL_ERROR",
            None,
        )
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

/// One elected official on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Official {
    /// "Senator" or "Representative"
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    /// Party label, e.g. "Democrat"
    pub party: String,
    pub district: String,
    /// Empty when the roster has no usable address
    pub email: String,
    pub phone: String,
    pub photo: String,
}

impl From<&Legislator> for Official {
    fn from(legislator: &Legislator) -> Self {
        Self {
            title: legislator.chamber.member_title().to_string(),
            first_name: legislator.first_name.clone(),
            last_name: legislator.last_name.clone(),
            party: legislator.party.label().to_string(),
            district: legislator.district.clone(),
            email: legislator.email.clone(),
            phone: legislator.phone.clone(),
            photo: legislator.photo.clone(),
        }
    }
}

/// The matched pair for one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepresentativesResponse {
    pub senator: Official,
    pub representative: Official,
}

impl From<&Resolution> for RepresentativesResponse {
    fn from(resolution: &Resolution) -> Self {
        Self {
            senator: Official::from(&resolution.senator),
            representative: Official::from(&resolution.representative),
        }
    }
}

/// One letter in the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LetterSummary {
    /// Topic key, usable in `/letters/{topic}`
    pub topic: String,
    pub title: String,
    pub subject: String,
    /// Opening of the body
    pub preview: String,
}

impl From<&Letter> for LetterSummary {
    fn from(letter: &Letter) -> Self {
        Self {
            topic: letter.topic.key().to_string(),
            title: letter.title.to_string(),
            subject: letter.subject.to_string(),
            preview: preview(letter.body),
        }
    }
}

fn preview(body: &str) -> String {
    let mut out: String = body.chars().take(PREVIEW_CHARS).collect();
    if body.chars().count() > PREVIEW_CHARS {
        out.push_str("...");
    }
    out
}

/// One full letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LetterResponse {
    pub topic: String,
    pub title: String,
    pub subject: String,
    pub body: String,
}

impl From<&Letter> for LetterResponse {
    fn from(letter: &Letter) -> Self {
        Self {
            topic: letter.topic.key().to_string(),
            title: letter.title.to_string(),
            subject: letter.subject.to_string(),
            body: letter.body.to_string(),
        }
    }
}

/// Request body for the one-shot mailto endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MailtoRequest {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    /// Topic key: economic, criminal, medical or freedom
    pub topic: String,
}

/// The composed mailto link plus the personalized letter text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MailtoResponse {
    /// `mailto:` URI ready to open
    pub uri: String,
    /// Recipient addresses in the URI, senator first
    pub recipients: Vec<String>,
    /// Personalized subject line (not percent-encoded)
    pub subject: String,
    /// Personalized body (not percent-encoded)
    pub body: String,
}

/// `OpenAPI` documentation for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BadgerVoice API",
        version = "1.0.0",
        description = "Match Wisconsin constituents to their state legislators and compose advocacy letters",
        license(name = "MIT")
    ),
    paths(
        get_build_info,
        list_letters,
        get_letter,
        find_representatives,
        compose_mailto
    ),
    components(schemas(
        BuildInfo,
        FormInput,
        MailtoRequest,
        MailtoResponse,
        Official,
        RepresentativesResponse,
        LetterSummary,
        LetterResponse,
        ProblemDetails,
        ProblemExtensions
    ))
)]
pub struct ApiDoc;

/// Get build information
///
/// Returns metadata about the running service including version, git SHA, and build time.
#[utoipa::path(
    get,
    path = "/build-info",
    tag = "System",
    responses(
        (status = 200, description = "Build information retrieved successfully", body = BuildInfo)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn get_build_info(Extension(build_info): Extension<BuildInfo>) -> Json<BuildInfo> {
    Json(build_info)
}

/// List the four advocacy letters
///
/// Returns topic, title, subject and a preview of each letter body.
#[utoipa::path(
    get,
    path = "/api/v1/letters",
    tag = "Letters",
    responses(
        (status = 200, description = "All letters", body = [LetterSummary])
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn list_letters() -> Json<Vec<LetterSummary>> {
    Json(Letter::all().map(LetterSummary::from).collect())
}

/// Fetch one advocacy letter in full
///
/// The topic key is one of `economic`, `criminal`, `medical` or `freedom`.
///
/// # Errors
///
/// Returns 404 `ProblemDetails` for an unknown topic key.
#[utoipa::path(
    get,
    path = "/api/v1/letters/{topic}",
    tag = "Letters",
    params(
        ("topic" = String, Path, description = "Letter topic key")
    ),
    responses(
        (status = 200, description = "The full letter", body = LetterResponse),
        (status = 404, description = "Unknown topic", body = ProblemDetails)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn get_letter(Path(topic): Path<String>) -> Result<Json<LetterResponse>, ProblemDetails> {
    let topic: Topic = topic
        .parse()
        .map_err(|err: bv_letters::TopicError| ProblemDetails::unknown_topic(err.to_string()))?;
    Ok(Json(LetterResponse::from(topic.letter())))
}

/// Match a constituent to their state legislators
///
/// Validates the form, extracts the ZIP code from the address and looks up
/// the senate and assembly members for that ZIP's districts.
///
/// # Errors
///
/// Returns 400 `ProblemDetails` for invalid input and 404 when the ZIP is
/// unmapped or a mapped legislator is missing from the roster.
#[utoipa::path(
    post,
    path = "/api/v1/representatives",
    tag = "Representatives",
    request_body = FormInput,
    responses(
        (status = 200, description = "Matched senator and representative", body = RepresentativesResponse),
        (status = 400, description = "Invalid input", body = ProblemDetails),
        (status = 404, description = "No match for the address", body = ProblemDetails)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn find_representatives(
    Extension(directory): Extension<Arc<Directory>>,
    Json(input): Json<FormInput>,
) -> Result<Json<RepresentativesResponse>, ProblemDetails> {
    let form = validate_form(&input).map_err(|err| ProblemDetails::validation(&err))?;
    let resolution = directory
        .resolve(&form.address)
        .map_err(|err| ProblemDetails::resolution_failed(&err))?;
    Ok(Json(RepresentativesResponse::from(&resolution)))
}

/// Run the whole pipeline and compose the mailto link
///
/// Validates the form, matches the officials, personalizes the chosen
/// letter and returns the `mailto:` URI with its recipients.
///
/// # Errors
///
/// Returns 400 for invalid input, 404 for an unknown topic or unmatched
/// address, and 422 when neither official has a usable email.
#[utoipa::path(
    post,
    path = "/api/v1/mailto",
    tag = "Letters",
    request_body = MailtoRequest,
    responses(
        (status = 200, description = "Composed mailto link", body = MailtoResponse),
        (status = 400, description = "Invalid input", body = ProblemDetails),
        (status = 404, description = "Unknown topic or no match for the address", body = ProblemDetails),
        (status = 422, description = "No valid recipients", body = ProblemDetails)
    )
)]
#[allow(clippy::unused_async)] // Required for Axum handler signature
pub async fn compose_mailto(
    Extension(directory): Extension<Arc<Directory>>,
    Json(request): Json<MailtoRequest>,
) -> Result<Json<MailtoResponse>, ProblemDetails> {
    let topic: Topic = request
        .topic
        .parse()
        .map_err(|err: bv_letters::TopicError| ProblemDetails::unknown_topic(err.to_string()))?;

    let input = FormInput {
        first_name: request.first_name,
        last_name: request.last_name,
        address: request.address,
    };
    let form = validate_form(&input).map_err(|err| ProblemDetails::validation(&err))?;
    let resolution = directory
        .resolve(&form.address)
        .map_err(|err| ProblemDetails::resolution_failed(&err))?;

    let personalized = personalize(topic.letter(), &form.first_name, &form.last_name, &resolution);
    let link =
        compose_for(&resolution, &personalized).map_err(|_| ProblemDetails::no_valid_recipients())?;

    Ok(Json(MailtoResponse {
        uri: link.uri,
        recipients: link.recipients,
        subject: personalized.subject,
        body: personalized.body,
    }))
}
