//! Listing error taxonomy
//!
//! Provider failures are collapsed into a handful of kinds the caller can act on.
//! Classification looks at the S3 error code first and falls back to the HTTP
//! status when the provider sends no code (HEAD-style responses, some S3-compatible
//! servers).
//!
//! S3 answers a listing of someone else's bucket with `403 AccessDenied`, so for
//! bucket-scoped calls that code means "not visible", not "bad credentials".

use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use thiserror::Error;

/// Errors produced by a listing call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// Credentials rejected by the provider
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Transport-level failure reaching the endpoint
    #[error("Network error: {0}")]
    Network(String),

    /// Bucket does not exist or is not visible to the credentials
    #[error("Bucket not found: {0}")]
    NotFound(String),

    /// Any other provider-reported failure
    #[error("Storage service error: {0}")]
    Service(String),

    /// Background task aborted before it produced a result
    #[error("Listing request cancelled")]
    Cancelled,
}

/// What the failed request was addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScope {
    /// Account-wide calls such as ListBuckets
    Account,
    /// Calls naming a single bucket such as ListObjectsV2
    Bucket,
}

/// Codes that always mean the key pair itself was rejected
const CREDENTIAL_CODES: &[&str] = &[
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "InvalidToken",
    "InvalidSecurity",
];

const ACCESS_DENIED: &str = "AccessDenied";

const NOT_FOUND_CODES: &[&str] = &["NoSuchBucket", "NotFound"];

/// Coarse kind used while classifying, before a message is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Authentication,
    NotFound,
    Service,
}

/// Kind for a permission refusal, which depends on what was asked for
fn denied(scope: ErrorScope) -> Kind {
    match scope {
        ErrorScope::Account => Kind::Authentication,
        ErrorScope::Bucket => Kind::NotFound,
    }
}

fn classify(scope: ErrorScope, code: Option<&str>, status: Option<u16>) -> Kind {
    if let Some(code) = code {
        if CREDENTIAL_CODES.contains(&code) {
            return Kind::Authentication;
        }
        if code == ACCESS_DENIED {
            return denied(scope);
        }
        if NOT_FOUND_CODES.contains(&code) {
            return Kind::NotFound;
        }
    }

    match status {
        Some(401) => Kind::Authentication,
        Some(403) => denied(scope),
        Some(404) => Kind::NotFound,
        _ => Kind::Service,
    }
}

impl ListingError {
    /// Classify a provider error returned by an SDK call
    pub fn from_sdk<E>(scope: ErrorScope, err: SdkError<E, HttpResponse>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    {
        let message = DisplayErrorContext(&err).to_string();

        match &err {
            SdkError::ServiceError(ctx) => {
                let code = ctx.err().code();
                let status = ctx.raw().status().as_u16();
                Self::from_code(scope, code, Some(status), message)
            }
            SdkError::TimeoutError(_)
            | SdkError::DispatchFailure(_)
            | SdkError::ResponseError(_) => ListingError::Network(message),
            _ => ListingError::Service(message),
        }
    }

    /// Classify from a raw S3 error code and HTTP status
    pub fn from_code(
        scope: ErrorScope,
        code: Option<&str>,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        match classify(scope, code, status) {
            Kind::Authentication => ListingError::Authentication(message),
            Kind::NotFound => ListingError::NotFound(message),
            Kind::Service => ListingError::Service(message),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ListingError::NotFound(_))
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, ListingError::Authentication(_))
    }
}
