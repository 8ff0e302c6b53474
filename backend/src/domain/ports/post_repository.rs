//! Port for post persistence.
//!
//! The [`PostRepository`] trait is the contract between the CRUD service and
//! whatever store backs it. Writes use optimistic concurrency: `update` takes
//! the version token the caller loaded and fails with
//! [`PostRepositoryError::VersionConflict`] when the stored row has moved on.
//! `delete` reports a vanished row as [`PostRepositoryError::NotFound`]; the
//! service layer decides whether that is recoverable.

use async_trait::async_trait;

use crate::domain::{BlogId, Post, PostId};

/// Errors raised by post repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostRepositoryError {
    /// No row exists for the given id.
    #[error("no post with id {id}")]
    NotFound {
        /// Identifier that failed to resolve.
        id: PostId,
    },

    /// The stored version no longer matches the caller's token.
    #[error("version mismatch for post {id}: expected {expected}, found {actual}")]
    VersionConflict {
        /// Identifier of the contested row.
        id: PostId,
        /// Version the caller loaded.
        expected: u32,
        /// Version currently stored.
        actual: u32,
    },

    /// Query or mutation failed during execution.
    #[error("post store query failed: {message}")]
    Query {
        /// Adapter-specific failure description.
        message: String,
    },
}

impl PostRepositoryError {
    /// Create a not-found error for the given id.
    pub fn not_found(id: PostId) -> Self {
        Self::NotFound { id }
    }

    /// Create a version-conflict error.
    pub fn version_conflict(id: PostId, expected: u32, actual: u32) -> Self {
        Self::VersionConflict {
            id,
            expected,
            actual,
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Field values for an insert or update, before the store assigns metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    /// Blog the post is filed under.
    pub blog_id: BlogId,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
}

/// Port for post storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Return posts in store-default order, optionally filtered by blog.
    ///
    /// One read; store errors propagate without retry.
    async fn list(&self, filter: Option<BlogId>) -> Result<Vec<Post>, PostRepositoryError>;

    /// Fetch a single post, or `None` when the id is absent.
    async fn find(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError>;

    /// Persist a new post. The store assigns the id and starts `version` at 1.
    async fn insert(&self, draft: PostDraft) -> Result<Post, PostRepositoryError>;

    /// Apply `draft` to an existing post.
    ///
    /// Fails with [`PostRepositoryError::VersionConflict`] when
    /// `expected_version` differs from the stored version, and with
    /// [`PostRepositoryError::NotFound`] when the row is absent. On success
    /// the stored version increments and `last_updated` is refreshed.
    async fn update(
        &self,
        id: PostId,
        expected_version: u32,
        draft: PostDraft,
    ) -> Result<Post, PostRepositoryError>;

    /// Remove a post, returning the deleted row.
    ///
    /// A row that is already gone surfaces as
    /// [`PostRepositoryError::NotFound`], the delete-time concurrency
    /// conflict.
    async fn delete(&self, id: PostId) -> Result<Post, PostRepositoryError>;

    /// Total number of stored posts.
    async fn count(&self) -> Result<usize, PostRepositoryError>;
}
