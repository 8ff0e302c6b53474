//! Transfer objects shaping post data for the list and form views.
//!
//! Each shape carries only the fields its view needs, distinct from the
//! persisted [`crate::domain::Post`]. All of them are request-scoped: built
//! for one render and discarded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Blog, BlogId, PostId};

/// Read-only projection of a post for the list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    /// Post identifier.
    pub id: PostId,
    /// Blog the post is filed under, used for filtering.
    pub blog_id: BlogId,
    /// Display name of that blog.
    pub blog_name: String,
    /// Post title.
    pub title: String,
    /// Time of the last successful write.
    pub last_updated: DateTime<Utc>,
}

/// Full projection of a post for the detail, edit, and create views.
///
/// `id` and `version` are `None` for a create form: the store has not
/// assigned them yet. Both are present on every detail or edit round-trip,
/// and `version` is the token the optimistic concurrency check compares.
///
/// `blog_id` stays a raw integer: the DTO carries form state, including
/// whatever the user submitted, and the service validates it against the
/// blog table. Entities hold the validated [`BlogId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    /// Post identifier; absent until the store assigns one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    /// Blog the post is filed under, as submitted.
    pub blog_id: i32,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Time of the last successful write; absent on a create form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    /// Concurrency token loaded with the entity; absent on a create form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

impl PostDetail {
    /// Empty DTO backing the create form.
    pub fn empty(default_blog: BlogId) -> Self {
        Self {
            id: None,
            blog_id: default_blog.get(),
            title: String::new(),
            content: String::new(),
            last_updated: None,
            version: None,
        }
    }
}

/// A [`PostDetail`] plus the reference data the form needs to render.
///
/// The blog list is what `reset_form` reapplies after a failed submission so
/// the form can re-display with the user's input intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostForm {
    /// The post values the form edits.
    pub detail: PostDetail,
    /// Blogs available in the blog selector.
    pub blogs: Vec<Blog>,
}
