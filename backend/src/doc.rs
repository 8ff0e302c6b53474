//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the posts endpoints. The generated document backs Swagger UI in debug
//! builds.

use utoipa::OpenApi;

/// OpenAPI document for the posts API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Posts sample API",
        description = "Sample CRUD surface for posts filed under blogs."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::posts::index,
        crate::inbound::http::posts::details,
        crate::inbound::http::posts::create_form,
        crate::inbound::http::posts::create,
        crate::inbound::http::posts::edit_form,
        crate::inbound::http::posts::update,
        crate::inbound::http::posts::delete,
        crate::inbound::http::posts::count,
        crate::inbound::http::posts::delay,
        crate::inbound::http::posts::reset,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::FieldError,
        crate::domain::Blog,
        crate::domain::PostSummary,
        crate::domain::PostDetail,
        crate::inbound::http::posts_dto::PostFormData,
        crate::inbound::http::posts_dto::PostListView,
        crate::inbound::http::posts_dto::PostFormView,
        crate::inbound::http::posts_dto::CountView,
        crate::inbound::http::posts_dto::DelayView,
    )),
    tags(
        (name = "posts", description = "Post CRUD actions"),
        (name = "admin", description = "Demonstration utilities")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_every_posts_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/posts",
            "/posts/{id}",
            "/posts/new",
            "/posts/{id}/edit",
            "/posts/{id}/delete",
            "/posts/count",
            "/posts/delay",
            "/admin/reset",
        ] {
            assert!(
                paths.iter().any(|path| path.as_str() == expected),
                "missing path {expected}"
            );
        }
    }
}
