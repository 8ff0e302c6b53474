//! Wire DTOs and view models for the posts endpoints.
//!
//! The form payload deliberately uses raw integers so any submission can be
//! echoed back to the client on a failed validation; conversion to the
//! domain DTO happens after the handler's local shape checks.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Blog, FieldError, PostDetail, PostForm, PostId, PostSummary};

/// Form payload submitted by the create and edit actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostFormData {
    /// Post identifier; omitted on a create submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    /// Selected blog.
    pub blog_id: i32,
    /// Submitted title.
    pub title: String,
    /// Submitted body.
    pub content: String,
    /// Version token loaded with the edit form; omitted on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

impl PostFormData {
    /// Local shape checks: required fields and an id-shaped blog selection.
    ///
    /// These run before any service call; rule-level validation (lengths,
    /// blog existence) belongs to the service.
    pub(crate) fn shape_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "title is required"));
        }
        if self.content.trim().is_empty() {
            errors.push(FieldError::new("content", "content is required"));
        }
        if self.blog_id < 1 {
            errors.push(FieldError::new("blogId", "choose a blog"));
        }
        errors
    }

    /// Convert to the domain DTO, with the authoritative id from the route.
    pub(crate) fn into_detail(self, id: Option<PostId>) -> PostDetail {
        PostDetail {
            id,
            blog_id: self.blog_id,
            title: self.title,
            content: self.content,
            last_updated: None,
            version: self.version,
        }
    }

    pub(crate) fn from_detail(detail: &PostDetail) -> Self {
        Self {
            id: detail.id.map(PostId::get),
            blog_id: detail.blog_id,
            title: detail.title.clone(),
            content: detail.content.clone(),
            version: detail.version,
        }
    }
}

/// List view: the posts plus the pending one-shot notice, if any.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostListView {
    /// Notice consumed from the session for this render.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    /// Posts in store-default order.
    pub posts: Vec<PostSummary>,
}

/// Form view: current values, blog reference data, and field errors.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostFormView {
    /// Values the form should display.
    pub form: PostFormData,
    /// Blogs available in the blog selector.
    pub blogs: Vec<Blog>,
    /// Field errors to attach to the form; empty on a fresh form.
    pub errors: Vec<FieldError>,
}

impl PostFormView {
    /// Fresh form with no errors.
    pub(crate) fn fresh(form: PostForm) -> Self {
        Self::with_errors(form, Vec::new())
    }

    /// Re-rendered form carrying validation errors.
    pub(crate) fn with_errors(form: PostForm, errors: Vec<FieldError>) -> Self {
        Self {
            form: PostFormData::from_detail(&form.detail),
            blogs: form.blogs,
            errors,
        }
    }
}

/// Count view for the post total display.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountView {
    /// Number of stored posts.
    pub count: usize,
    /// Preformatted display message.
    pub message: String,
}

/// Delay view for the artificial-delay demo action.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DelayView {
    /// How long the handler slept, in milliseconds.
    pub delay_ms: u64,
}
