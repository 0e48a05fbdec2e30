//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`BackendError`] - JavaScript bridge and document store errors
//! - [`QueryError`] - Catalog queries the store rejected
//! - [`ProvisioningError`] - Seller account callables
//! - [`ListingError`] - Dashboard listing validation and writes
//! - [`ReferenceError`] - Dashboard reference image uploads
//! - [`AuthError`] - Sign-in and sign-out
//! - [`FetchError`] - Network/fetch-related errors for static JSON

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::config::catalog::MAX_ARRAY_MEMBERSHIP;

/// Errors raised while talking to the backend bridge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// The host page did not install the bridge object
    #[error("Backend bridge not installed")]
    NotInstalled,
    /// The bridge rejected a call; `code` is the backend error code if any
    #[error("{message}")]
    Remote {
        code: Option<String>,
        message: String,
    },
    /// A value crossing the bridge had an unexpected shape
    #[error("Malformed backend value: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote {
            code: None,
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Remote { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

// =============================================================================
// Catalog queries
// =============================================================================

/// Index creation links embedded in store error messages.
static INDEX_LINK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"https?://[^\s)\]]+").ok());

/// Catalog query failures, each with its own user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The store needs a composite index; `link` creates it.
    #[error("This filter requires an index that is still being built")]
    MissingIndex { link: String },
    /// More values than `array-contains-any` accepts.
    #[error("Too many tags selected (maximum 10)")]
    TooManyTags,
    /// Range filter combined with an ordering on another field.
    #[error("Unsupported query: {detail}")]
    IncompatibleOrdering { detail: String },
    #[error("Failed to load accounts: {0}")]
    Backend(String),
}

impl QueryError {
    /// Classify a raw backend failure by its message.
    pub fn from_backend(err: &BackendError) -> Self {
        let message = err.to_string();
        let lower = message.to_lowercase();

        if lower.contains("requires an index") {
            let link = INDEX_LINK
                .as_ref()
                .and_then(|re| re.find(&message))
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "#".to_string());
            return Self::MissingIndex { link };
        }
        if lower.contains("maximum 10") || lower.contains("maximum of 10") {
            return Self::TooManyTags;
        }
        if lower.contains("inequality") && lower.contains("orderby") {
            return Self::IncompatibleOrdering { detail: message };
        }
        Self::Backend(message)
    }

    /// Message shown in place of the product grid.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingIndex { .. } => {
                "This filter needs a database index. The administrator has been notified."
                    .to_string()
            }
            Self::TooManyTags => format!(
                "Select at most {} items to filter by.",
                MAX_ARRAY_MEMBERSHIP
            ),
            Self::IncompatibleOrdering { .. } => {
                "This combination of filters is not supported. Try clearing one of them."
                    .to_string()
            }
            Self::Backend(_) => "Could not load accounts. Please try again.".to_string(),
        }
    }
}

// =============================================================================
// Provisioning
// =============================================================================

/// Errors returned by the seller provisioning callables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisioningError {
    #[error("This e-mail is already in use.")]
    AlreadyExists,
    #[error("Only administrators can manage sellers.")]
    PermissionDenied,
    #[error("Invalid data: {0}")]
    InvalidArgument(String),
    #[error("Server error: {0}")]
    Internal(String),
}

impl ProvisioningError {
    /// Map a callable failure to its error code.
    ///
    /// Codes may carry the `functions/` prefix the callable SDK adds.
    pub fn from_backend(err: &BackendError) -> Self {
        let message = match err {
            BackendError::Remote { message, .. } => message.clone(),
            other => other.to_string(),
        };
        let code = err.code().map(|c| c.strip_prefix("functions/").unwrap_or(c));

        match code {
            Some("already-exists") => Self::AlreadyExists,
            Some("permission-denied") | Some("unauthenticated") => Self::PermissionDenied,
            Some("invalid-argument") => Self::InvalidArgument(message),
            _ => Self::Internal(message),
        }
    }
}

// =============================================================================
// Listings
// =============================================================================

/// Dashboard listing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("Title, price and video are required.")]
    MissingFields,
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
    #[error("You must be signed in as a seller.")]
    NotSeller,
    #[error("{0}")]
    Backend(#[from] BackendError),
}

/// Dashboard reference image errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("Select an image file to upload.")]
    MissingFile,
    #[error("Only image files can be uploaded.")]
    NotAnImage,
    #[error("You must be signed in as a seller.")]
    NotSeller,
    #[error("{0}")]
    Backend(#[from] BackendError),
}

// =============================================================================
// Auth
// =============================================================================

/// Sign-in failures, with user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Enter your e-mail and password.")]
    MissingCredentials,
    #[error("Invalid e-mail or password.")]
    InvalidCredentials,
    #[error("Sign-in was cancelled.")]
    Cancelled,
    #[error("Could not sign in: {0}")]
    Failed(String),
}

impl AuthError {
    /// Map an auth rejection by its `auth/` code.
    pub fn from_backend(err: &BackendError) -> Self {
        let code = err.code().map(|c| c.strip_prefix("auth/").unwrap_or(c));
        match code {
            Some("user-not-found") | Some("wrong-password") | Some("invalid-credential") => {
                Self::InvalidCredentials
            }
            Some("popup-closed-by-user") | Some("cancelled-popup-request") => Self::Cancelled,
            _ => Self::Failed(err.to_string()),
        }
    }
}

// =============================================================================
// Static assets
// =============================================================================

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, offline, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content (not text)
    #[error("Invalid response content")]
    InvalidContent,
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}
