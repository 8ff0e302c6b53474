//! Domain types and the post CRUD service.
//!
//! Purpose: define the entities, transfer objects, and service operations the
//! HTTP layer drives, independent of any transport or store. Invariants and
//! serialisation contracts (serde) live in each type's Rustdoc.
//!
//! Public surface:
//! - `Error` / `ErrorCode` — transport-agnostic failure payload.
//! - `Post`, `Blog`, `PostId`, `BlogId` — persisted entities and identifiers.
//! - `PostSummary`, `PostDetail`, `PostForm` — view-shaped transfer objects.
//! - `ServiceResponse` / `FieldError` — outcome of mutating operations.
//! - `PostsService` — the per-entity CRUD operations.
//! - `ports` — driven ports implemented by outbound adapters.

pub mod dto;
pub mod error;
pub mod ports;
pub mod post;
pub mod posts_service;
pub mod response;


pub use self::dto::{PostDetail, PostForm, PostSummary};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::post::{
    validate_content, validate_title, Blog, BlogId, InvalidIdError, Post, PostId,
    PostValidationError, CONTENT_MAX_LEN, TITLE_MAX_LEN,
};
pub use self::posts_service::PostsService;
pub use self::response::{FieldError, ServiceResponse};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("nothing here"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
