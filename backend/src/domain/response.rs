//! Outcome value for mutating service operations.
//!
//! A mutation either succeeds with a message or fails with field-level
//! errors; the enum makes any other combination unrepresentable. Expected
//! validation and update-conflict outcomes travel through this type rather
//! than through `Result::Err`, and handlers branch on it to choose between
//! a redirect and a form re-render.

use serde::Serialize;
use utoipa::ToSchema;

use super::PostId;

/// A single validation failure attached to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Form field the message belongs to, e.g. `title`.
    pub field: String,
    /// Human-readable message for that field.
    pub message: String,
}

impl FieldError {
    /// Build a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result of a mutating service call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceResponse {
    /// The operation was applied.
    Valid {
        /// Success message for the one-shot notice.
        message: String,
        /// Identifier of the affected post.
        post_id: PostId,
    },
    /// The operation was rejected; nothing was written.
    Invalid {
        /// Ordered, non-empty field errors.
        errors: Vec<FieldError>,
    },
}

impl ServiceResponse {
    /// Successful outcome carrying the notice message and affected id.
    pub fn success(message: impl Into<String>, post_id: PostId) -> Self {
        Self::Valid {
            message: message.into(),
            post_id,
        }
    }

    /// Rejected outcome carrying at least one field error.
    ///
    /// # Panics
    /// Panics when `errors` is empty; an invalid response with nothing to
    /// show the user is a programming error.
    pub fn invalid(errors: Vec<FieldError>) -> Self {
        assert!(
            !errors.is_empty(),
            "invalid responses must carry at least one field error"
        );
        Self::Invalid { errors }
    }

    /// Rejected outcome with a single field error.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::invalid(vec![FieldError::new(field, message)])
    }

    /// Whether the operation was applied.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}
