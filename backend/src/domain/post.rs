//! Post and blog entities.
//!
//! `Post` is the persisted aggregate this sample mutates; `Blog` is reference
//! data posts point at via [`BlogId`]. Posts carry a `version` counter used
//! for optimistic concurrency: every successful update increments it, and
//! writers must present the version they loaded.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Longest accepted post title, in characters.
pub const TITLE_MAX_LEN: usize = 128;
/// Longest accepted post body, in characters.
pub const CONTENT_MAX_LEN: usize = 2000;

/// Validation errors for post field content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    /// Title was empty or whitespace-only.
    EmptyTitle,
    /// Title exceeded [`TITLE_MAX_LEN`].
    TitleTooLong {
        /// Permitted maximum length.
        max: usize,
    },
    /// Content was empty or whitespace-only.
    EmptyContent,
    /// Content exceeded [`CONTENT_MAX_LEN`].
    ContentTooLong {
        /// Permitted maximum length.
        max: usize,
    },
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::TitleTooLong { max } => {
                write!(f, "title must be at most {max} characters")
            }
            Self::EmptyContent => write!(f, "content must not be empty"),
            Self::ContentTooLong { max } => {
                write!(f, "content must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for PostValidationError {}

/// Validate a submitted post title against the business rules.
pub fn validate_title(title: &str) -> Result<(), PostValidationError> {
    if title.trim().is_empty() {
        return Err(PostValidationError::EmptyTitle);
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(PostValidationError::TitleTooLong { max: TITLE_MAX_LEN });
    }
    Ok(())
}

/// Validate a submitted post body against the business rules.
pub fn validate_content(content: &str) -> Result<(), PostValidationError> {
    if content.trim().is_empty() {
        return Err(PostValidationError::EmptyContent);
    }
    if content.chars().count() > CONTENT_MAX_LEN {
        return Err(PostValidationError::ContentTooLong {
            max: CONTENT_MAX_LEN,
        });
    }
    Ok(())
}

/// Error returned when an identifier is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidIdError;

impl fmt::Display for InvalidIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "identifiers must be positive")
    }
}

impl std::error::Error for InvalidIdError {}

/// Stable post identifier assigned by the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct PostId(i32);

impl PostId {
    /// Validate and construct a [`PostId`].
    pub fn new(raw: i32) -> Result<Self, InvalidIdError> {
        if raw <= 0 {
            return Err(InvalidIdError);
        }
        Ok(Self(raw))
    }

    /// Access the raw integer value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable blog identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct BlogId(i32);

impl BlogId {
    /// Validate and construct a [`BlogId`].
    pub fn new(raw: i32) -> Result<Self, InvalidIdError> {
        if raw <= 0 {
            return Err(InvalidIdError);
        }
        Ok(Self(raw))
    }

    /// Access the raw integer value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A blog that posts are filed under. Not mutated by this sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    /// Blog identifier.
    pub id: BlogId,
    /// Display name of the blog.
    pub name: String,
}

/// A persisted post.
///
/// `version` starts at 1 on insert and increments on each successful update;
/// writers present the version they loaded so conflicting writes are detected
/// at save time rather than by locking at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post identifier.
    pub id: PostId,
    /// Blog this post is filed under.
    pub blog_id: BlogId,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Time of the last successful write.
    pub last_updated: DateTime<Utc>,
    /// Optimistic concurrency token.
    pub version: u32,
}
