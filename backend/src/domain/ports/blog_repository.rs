//! Port for blog reference data.
//!
//! Blogs are read-only in this sample: forms need the list for their blog
//! selector and the create/update rules need an existence check.

use async_trait::async_trait;

use crate::domain::{Blog, BlogId};

/// Errors raised by blog repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlogRepositoryError {
    /// Query failed during execution.
    #[error("blog store query failed: {message}")]
    Query {
        /// Adapter-specific failure description.
        message: String,
    },
}

impl BlogRepositoryError {
    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for blog lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Return all blogs in store-default order.
    async fn list(&self) -> Result<Vec<Blog>, BlogRepositoryError>;

    /// Fetch a single blog, or `None` when the id is absent.
    async fn find(&self, id: BlogId) -> Result<Option<Blog>, BlogRepositoryError>;
}
