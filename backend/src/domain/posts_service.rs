//! Post CRUD service.
//!
//! One thin operation per controller action: list, detail, the form setups,
//! and the create/update/delete mutations. Mutations report expected
//! validation and update-conflict outcomes through
//! [`ServiceResponse`] so handlers can re-render forms; only delete-time
//! conflicts escape as a fatal [`Error`] and surface through the generic
//! error response rather than the form.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{
    BlogRepository, BlogRepositoryError, PostDraft, PostRepository, PostRepositoryError,
};
use crate::domain::{
    validate_content, validate_title, Blog, BlogId, Error, FieldError, Post, PostDetail, PostForm,
    PostId, PostSummary, ServiceResponse,
};

/// Message attached to the `version` field when an update loses the race.
const CONFLICT_MESSAGE: &str =
    "This post was changed by someone else after you loaded it; reload and try again.";

/// CRUD operations over posts, driven by the HTTP layer.
#[derive(Clone)]
pub struct PostsService {
    posts: Arc<dyn PostRepository>,
    blogs: Arc<dyn BlogRepository>,
}

impl PostsService {
    /// Create a service backed by the given repositories.
    pub fn new(posts: Arc<dyn PostRepository>, blogs: Arc<dyn BlogRepository>) -> Self {
        Self { posts, blogs }
    }

    fn map_post_error(error: PostRepositoryError) -> Error {
        match error {
            PostRepositoryError::NotFound { id } => Error::not_found(format!("no post with id {id}")),
            PostRepositoryError::VersionConflict { id, expected, actual } => Error::internal(
                format!("unexpected version conflict on post {id}: expected {expected}, found {actual}"),
            ),
            PostRepositoryError::Query { message } => {
                Error::internal(format!("post store error: {message}"))
            }
        }
    }

    fn map_blog_error(error: BlogRepositoryError) -> Error {
        match error {
            BlogRepositoryError::Query { message } => {
                Error::internal(format!("blog store error: {message}"))
            }
        }
    }

    fn to_detail(post: Post) -> PostDetail {
        PostDetail {
            id: Some(post.id),
            blog_id: post.blog_id.get(),
            title: post.title,
            content: post.content,
            last_updated: Some(post.last_updated),
            version: Some(post.version),
        }
    }

    async fn blog_list(&self) -> Result<Vec<Blog>, Error> {
        self.blogs.list().await.map_err(Self::map_blog_error)
    }

    /// Business-rule validation shared by create and update.
    ///
    /// Produces either a draft ready to persist or the field errors that
    /// rejected the submission, in field order.
    async fn validated_draft(
        &self,
        detail: &PostDetail,
    ) -> Result<Result<PostDraft, Vec<FieldError>>, Error> {
        let mut errors = Vec::new();
        if let Err(err) = validate_title(&detail.title) {
            errors.push(FieldError::new("title", err.to_string()));
        }
        if let Err(err) = validate_content(&detail.content) {
            errors.push(FieldError::new("content", err.to_string()));
        }
        let blog_id = match BlogId::new(detail.blog_id) {
            Ok(id) => {
                let blog = self.blogs.find(id).await.map_err(Self::map_blog_error)?;
                if blog.is_none() {
                    errors.push(FieldError::new(
                        "blogId",
                        format!("no blog with id {}", detail.blog_id),
                    ));
                    None
                } else {
                    Some(id)
                }
            }
            Err(_) => {
                errors.push(FieldError::new("blogId", "choose a blog"));
                None
            }
        };

        match (blog_id, errors.is_empty()) {
            (Some(blog_id), true) => Ok(Ok(PostDraft {
                blog_id,
                title: detail.title.clone(),
                content: detail.content.clone(),
            })),
            _ => Ok(Err(errors)),
        }
    }

    /// List posts, optionally filtered to a single blog.
    pub async fn list(&self, filter: Option<BlogId>) -> Result<Vec<PostSummary>, Error> {
        let posts = self
            .posts
            .list(filter)
            .await
            .map_err(Self::map_post_error)?;
        let names: HashMap<BlogId, String> = self
            .blog_list()
            .await?
            .into_iter()
            .map(|blog| (blog.id, blog.name))
            .collect();

        posts
            .into_iter()
            .map(|post| {
                let blog_name = names.get(&post.blog_id).cloned().ok_or_else(|| {
                    Error::internal(format!(
                        "post {} references missing blog {}",
                        post.id, post.blog_id
                    ))
                })?;
                Ok(PostSummary {
                    id: post.id,
                    blog_id: post.blog_id,
                    blog_name,
                    title: post.title,
                    last_updated: post.last_updated,
                })
            })
            .collect()
    }

    /// Load a single post for the detail view.
    pub async fn detail(&self, id: PostId) -> Result<PostDetail, Error> {
        let post = self
            .posts
            .find(id)
            .await
            .map_err(Self::map_post_error)?
            .ok_or_else(|| Error::not_found(format!("no post with id {id}")))?;
        Ok(Self::to_detail(post))
    }

    /// Empty DTO plus reference data for the create form.
    pub async fn new_form(&self) -> Result<PostForm, Error> {
        let blogs = self.blog_list().await?;
        let default_blog = blogs
            .first()
            .map(|blog| blog.id)
            .ok_or_else(|| Error::internal("no blogs available for the create form"))?;
        Ok(PostForm {
            detail: PostDetail::empty(default_blog),
            blogs,
        })
    }

    /// Current entity state for the edit form.
    pub async fn original(&self, id: PostId) -> Result<PostForm, Error> {
        let detail = self.detail(id).await?;
        let blogs = self.blog_list().await?;
        Ok(PostForm { detail, blogs })
    }

    /// Reapply the reference data a form needs before it is re-displayed.
    ///
    /// The submitted values pass through untouched so the user's input
    /// survives a failed submission.
    pub async fn reset_form(&self, detail: PostDetail) -> Result<PostForm, Error> {
        let blogs = self.blog_list().await?;
        Ok(PostForm { detail, blogs })
    }

    /// Validate and persist a new post.
    pub async fn create(&self, detail: PostDetail) -> Result<ServiceResponse, Error> {
        let draft = match self.validated_draft(&detail).await? {
            Ok(draft) => draft,
            Err(errors) => return Ok(ServiceResponse::invalid(errors)),
        };

        let post = self
            .posts
            .insert(draft)
            .await
            .map_err(Self::map_post_error)?;
        info!(post_id = %post.id, blog_id = %post.blog_id, "created post");
        Ok(ServiceResponse::success(
            format!("Successfully created post '{}'", post.title),
            post.id,
        ))
    }

    /// Validate and apply an edit, checking the version token at write time.
    ///
    /// A post that changed or vanished between `original` and this call is a
    /// recoverable outcome: the caller gets an invalid response against the
    /// `version` field, never an `Err`.
    pub async fn update(&self, detail: PostDetail) -> Result<ServiceResponse, Error> {
        let id = detail
            .id
            .ok_or_else(|| Error::invalid_request("an update requires the post id"))?;
        let version = detail
            .version
            .ok_or_else(|| Error::invalid_request("an update requires the version token"))?;

        let draft = match self.validated_draft(&detail).await? {
            Ok(draft) => draft,
            Err(errors) => return Ok(ServiceResponse::invalid(errors)),
        };

        match self.posts.update(id, version, draft).await {
            Ok(post) => {
                info!(post_id = %post.id, version = post.version, "updated post");
                Ok(ServiceResponse::success(
                    format!("Successfully updated post '{}'", post.title),
                    post.id,
                ))
            }
            Err(PostRepositoryError::VersionConflict { id, expected, actual }) => {
                warn!(post_id = %id, expected, actual, "update lost optimistic concurrency race");
                Ok(ServiceResponse::invalid_field("version", CONFLICT_MESSAGE))
            }
            Err(PostRepositoryError::NotFound { id }) => {
                warn!(post_id = %id, "post vanished between load and update");
                Ok(ServiceResponse::invalid_field("version", CONFLICT_MESSAGE))
            }
            Err(err @ PostRepositoryError::Query { .. }) => Err(Self::map_post_error(err)),
        }
    }

    /// Delete a post by id.
    ///
    /// A delete-time conflict (the row is already gone) is not translated
    /// into a form error: it propagates as a fatal [`Error`] and surfaces
    /// through the generic error response. This asymmetry with update
    /// conflicts is intentional.
    pub async fn delete(&self, id: PostId) -> Result<ServiceResponse, Error> {
        match self.posts.delete(id).await {
            Ok(post) => {
                info!(post_id = %post.id, "deleted post");
                Ok(ServiceResponse::success(
                    format!("Successfully deleted post '{}'", post.title),
                    post.id,
                ))
            }
            Err(PostRepositoryError::NotFound { id }) => Err(Error::internal(format!(
                "concurrency conflict: post {id} was already removed"
            ))),
            Err(err) => Err(Self::map_post_error(err)),
        }
    }

    /// Total number of stored posts, for the count display.
    pub async fn count(&self) -> Result<usize, Error> {
        self.posts.count().await.map_err(Self::map_post_error)
    }
}
