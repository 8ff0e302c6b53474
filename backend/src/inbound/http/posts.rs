//! Posts API handlers.
//!
//! ```text
//! GET  /posts?blogId=1        list, optionally filtered
//! GET  /posts/{id}            detail view
//! GET  /posts/new             create form
//! POST /posts                 create submission
//! GET  /posts/{id}/edit       edit form
//! POST /posts/{id}            edit submission
//! POST /posts/{id}/delete     delete
//! ```
//!
//! Mutating actions branch on the service response: a valid outcome sets the
//! one-shot notice and redirects to the list (`303 See Other`); an invalid
//! outcome re-renders the form (`422`) with the submitted values, the blog
//! reference data, and the field errors. Local shape failures re-render
//! without calling the mutation at all.

use actix_web::http::header;
use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use crate::domain::{
    BlogId, Error, FieldError, PostDetail, PostId, ServiceResponse,
};
use crate::inbound::http::flash::FlashContext;
use crate::inbound::http::posts_dto::{
    CountView, DelayView, PostFormData, PostFormView, PostListView,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;
use crate::outbound::persistence::SeedSelection;

/// Query parameters accepted by the list action.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexQuery {
    /// Blog to filter by; absent or 0 means unfiltered.
    pub blog_id: Option<i32>,
}

fn parse_post_id(raw: i32) -> Result<PostId, Error> {
    PostId::new(raw).map_err(|_| Error::not_found(format!("no post with id {raw}")))
}

fn see_other_index() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/posts"))
        .finish()
}

/// Re-render a form: reapply reference data, echo the submission, attach errors.
async fn rerender(
    state: &HttpState,
    detail: PostDetail,
    errors: Vec<FieldError>,
) -> ApiResult<HttpResponse> {
    let form = state.posts.reset_form(detail).await?;
    Ok(HttpResponse::UnprocessableEntity().json(PostFormView::with_errors(form, errors)))
}

/// List posts, optionally filtered to one blog.
///
/// A filtered request attaches a one-shot "Filtered list" notice; the list
/// view consumes whatever notice is pending, so a success message set by a
/// redirecting mutation shows up here exactly once.
#[utoipa::path(
    get,
    path = "/posts",
    params(
        ("blogId" = Option<i32>, Query, description = "Blog to filter by; absent or 0 lists everything")
    ),
    responses(
        (status = 200, description = "List view", body = PostListView),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn index(
    state: web::Data<HttpState>,
    flash: FlashContext,
    query: web::Query<IndexQuery>,
) -> ApiResult<web::Json<PostListView>> {
    let filter = match query.blog_id {
        None | Some(0) => None,
        Some(raw) => Some(
            BlogId::new(raw).map_err(|_| Error::invalid_request("blogId must not be negative"))?,
        ),
    };
    if filter.is_some() {
        flash.set_notice("Filtered list")?;
    }

    let posts = state.posts.list(filter).await?;
    let notice = flash.take_notice();
    Ok(web::Json(PostListView { notice, posts }))
}

/// Render a single post.
#[utoipa::path(
    get,
    path = "/posts/{id}",
    params(("id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Detail view", body = PostDetail),
        (status = 404, description = "No such post", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "postDetails"
)]
#[get("/posts/{id}")]
pub async fn details(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<PostDetail>> {
    let id = parse_post_id(path.into_inner())?;
    Ok(web::Json(state.posts.detail(id).await?))
}

/// Render the empty create form.
#[utoipa::path(
    get,
    path = "/posts/new",
    responses(
        (status = 200, description = "Create form view", body = PostFormView),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "newPostForm"
)]
#[get("/posts/new")]
pub async fn create_form(state: web::Data<HttpState>) -> ApiResult<web::Json<PostFormView>> {
    let form = state.posts.new_form().await?;
    Ok(web::Json(PostFormView::fresh(form)))
}

/// Create a post from a submitted form.
#[utoipa::path(
    post,
    path = "/posts",
    request_body = PostFormData,
    responses(
        (status = 303, description = "Created; redirect to the list",
            headers(("Location" = String, description = "List URL"))),
        (status = 422, description = "Validation failed; re-rendered form", body = PostFormView),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create(
    state: web::Data<HttpState>,
    flash: FlashContext,
    payload: web::Json<PostFormData>,
) -> ApiResult<HttpResponse> {
    let data = payload.into_inner();
    let errors = data.shape_errors();
    let detail = data.into_detail(None);
    if !errors.is_empty() {
        // Shape failures never reach the service.
        return rerender(&state, detail, errors).await;
    }

    match state.posts.create(detail.clone()).await? {
        ServiceResponse::Valid { message, .. } => {
            flash.set_notice(&message)?;
            Ok(see_other_index())
        }
        ServiceResponse::Invalid { errors } => rerender(&state, detail, errors).await,
    }
}

/// Render the edit form with the post's current state.
#[utoipa::path(
    get,
    path = "/posts/{id}/edit",
    params(("id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Edit form view", body = PostFormView),
        (status = 404, description = "No such post", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "editPostForm"
)]
#[get("/posts/{id}/edit")]
pub async fn edit_form(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<PostFormView>> {
    let id = parse_post_id(path.into_inner())?;
    let form = state.posts.original(id).await?;
    Ok(web::Json(PostFormView::fresh(form)))
}

/// Apply an edit submission.
#[utoipa::path(
    post,
    path = "/posts/{id}",
    params(("id" = i32, Path, description = "Post identifier")),
    request_body = PostFormData,
    responses(
        (status = 303, description = "Updated; redirect to the list",
            headers(("Location" = String, description = "List URL"))),
        (status = 400, description = "Submitted id does not match the route", body = Error),
        (status = 422, description = "Validation or concurrency failure; re-rendered form", body = PostFormView),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[post("/posts/{id}")]
pub async fn update(
    state: web::Data<HttpState>,
    flash: FlashContext,
    path: web::Path<i32>,
    payload: web::Json<PostFormData>,
) -> ApiResult<HttpResponse> {
    let id = parse_post_id(path.into_inner())?;
    let data = payload.into_inner();
    if data.id.is_some_and(|raw| raw != id.get()) {
        return Err(Error::invalid_request(
            "the submitted id does not match the route",
        ));
    }

    let mut errors = data.shape_errors();
    if data.version.is_none() {
        errors.push(FieldError::new("version", "the version token is required"));
    }
    let detail = data.into_detail(Some(id));
    if !errors.is_empty() {
        return rerender(&state, detail, errors).await;
    }

    match state.posts.update(detail.clone()).await? {
        ServiceResponse::Valid { message, .. } => {
            flash.set_notice(&message)?;
            Ok(see_other_index())
        }
        ServiceResponse::Invalid { errors } => rerender(&state, detail, errors).await,
    }
}

/// Delete a post.
///
/// Redirects to the list whenever the service reports a valid outcome. A
/// delete-time conflict is not translated into a form error: the service's
/// fatal error propagates and the client sees the generic error response.
#[utoipa::path(
    post,
    path = "/posts/{id}/delete",
    params(("id" = i32, Path, description = "Post identifier")),
    responses(
        (status = 303, description = "Deleted; redirect to the list",
            headers(("Location" = String, description = "List URL"))),
        (status = 500, description = "Delete conflict or internal error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[post("/posts/{id}/delete")]
pub async fn delete(
    state: web::Data<HttpState>,
    flash: FlashContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = parse_post_id(path.into_inner())?;
    if let ServiceResponse::Valid { message, .. } = state.posts.delete(id).await? {
        flash.set_notice(&message)?;
    }
    Ok(see_other_index())
}

/// Display the total number of posts.
#[utoipa::path(
    get,
    path = "/posts/count",
    responses(
        (status = 200, description = "Count view", body = CountView),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "countPosts"
)]
#[get("/posts/count")]
pub async fn count(state: web::Data<HttpState>) -> ApiResult<web::Json<CountView>> {
    let count = state.posts.count().await?;
    Ok(web::Json(CountView {
        count,
        message: format!("The total number of posts is {count}"),
    }))
}

/// Sleep half a second, then render. Demonstration of a slow async action.
#[utoipa::path(
    get,
    path = "/posts/delay",
    responses((status = 200, description = "Delay view", body = DelayView)),
    tags = ["posts"],
    operation_id = "delayedView"
)]
#[get("/posts/delay")]
pub async fn delay() -> web::Json<DelayView> {
    const DELAY_MS: u64 = 500;
    tokio::time::sleep(std::time::Duration::from_millis(DELAY_MS)).await;
    web::Json(DelayView { delay_ms: DELAY_MS })
}

/// Re-seed the store with the medium data set.
#[utoipa::path(
    post,
    path = "/admin/reset",
    responses(
        (status = 303, description = "Store reseeded; redirect to the list",
            headers(("Location" = String, description = "List URL"))),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "resetStore"
)]
#[post("/admin/reset")]
pub async fn reset(state: web::Data<HttpState>, flash: FlashContext) -> ApiResult<HttpResponse> {
    state
        .store
        .reset(SeedSelection::Medium)
        .map_err(|err| Error::internal(format!("reset failed: {err}")))?;
    flash.set_notice("Successfully reset the database")?;
    Ok(see_other_index())
}
