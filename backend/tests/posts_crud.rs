//! End-to-end CRUD flows over the HTTP surface.
//!
//! Exercises the list/detail/create/update/delete contract against the
//! seeded in-memory store, including the one-shot notice, the optimistic
//! concurrency asymmetry, and the demo utilities.

use std::sync::Arc;

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Cookie, Key};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::{json, Value};

use backend::inbound::http::posts::{
    count, create, create_form, delay, delete, details, edit_form, index, reset, update,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{InMemoryStore, SeedSelection};

fn seeded_app(
    selection: SeedSelection,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let store = Arc::new(InMemoryStore::new());
    store.reset(selection).expect("seed store");
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    // Literal segments must register ahead of the `{id}` matcher.
    App::new()
        .app_data(web::Data::new(HttpState::new(store)))
        .wrap(session)
        .service(count)
        .service(delay)
        .service(create_form)
        .service(index)
        .service(details)
        .service(edit_form)
        .service(create)
        .service(update)
        .service(delete)
        .service(reset)
}

fn session_cookie(response: &actix_web::dev::ServiceResponse) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
}

async fn get_json<S>(app: &S, uri: &str, cookie: Option<Cookie<'static>>) -> Value
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let mut request = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie);
    }
    let response = test::call_service(app, request.to_request()).await;
    assert!(
        response.status().is_success(),
        "GET {uri} failed with {}",
        response.status()
    );
    let body = test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON body")
}

#[actix_web::test]
async fn create_then_filtered_index_shows_the_new_post() {
    let app = test::init_service(seeded_app(SeedSelection::Small)).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({
                "blogId": 1,
                "title": "Hello",
                "content": "A freshly created post."
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok());
    assert_eq!(location, Some("/posts"));
    let cookie = session_cookie(&response).expect("notice stored in session");

    // The success notice set before the redirect is consumed by the next render.
    let list = get_json(&app, "/posts", Some(cookie)).await;
    let notice = list["notice"].as_str().expect("success notice");
    assert!(notice.contains("Hello"), "unexpected notice: {notice}");

    let filtered = get_json(&app, "/posts?blogId=1", None).await;
    let titles: Vec<&str> = filtered["posts"]
        .as_array()
        .expect("posts array")
        .iter()
        .filter_map(|post| post["title"].as_str())
        .collect();
    assert!(titles.contains(&"Hello"));
}

#[actix_web::test]
async fn filtered_index_is_a_subset_of_the_unfiltered_list() {
    let app = test::init_service(seeded_app(SeedSelection::Medium)).await;

    let all = get_json(&app, "/posts", None).await;
    let filtered = get_json(&app, "/posts?blogId=2", None).await;

    let all_ids: Vec<i64> = all["posts"]
        .as_array()
        .expect("posts array")
        .iter()
        .filter_map(|post| post["id"].as_i64())
        .collect();
    let filtered_posts = filtered["posts"].as_array().expect("posts array");
    assert!(!filtered_posts.is_empty());
    assert!(filtered_posts.len() < all_ids.len());
    for post in filtered_posts {
        assert_eq!(post["blogId"], json!(2));
        assert!(all_ids.contains(&post["id"].as_i64().expect("post id")));
    }
}

#[actix_web::test]
async fn edit_round_trip_of_an_unmodified_form_preserves_the_fields() {
    let app = test::init_service(seeded_app(SeedSelection::Small)).await;

    let before = get_json(&app, "/posts/1/edit", None).await;
    let form = &before["form"];
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts/1")
            .set_json(json!({
                "id": form["id"],
                "blogId": form["blogId"],
                "title": form["title"],
                "content": form["content"],
                "version": form["version"]
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let after = get_json(&app, "/posts/1", None).await;
    assert_eq!(after["title"], form["title"]);
    assert_eq!(after["content"], form["content"]);
    assert_eq!(after["blogId"], form["blogId"]);
}

#[actix_web::test]
async fn stale_updates_lose_to_the_intervening_write() {
    let app = test::init_service(seeded_app(SeedSelection::Small)).await;

    let original = get_json(&app, "/posts/1/edit", None).await;
    let stale_version = original["form"]["version"].clone();

    // Intervening edit by "someone else", using the same loaded version.
    let winner = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts/1")
            .set_json(json!({
                "blogId": original["form"]["blogId"],
                "title": "Intervening title",
                "content": "The write that wins.",
                "version": stale_version
            }))
            .to_request(),
    )
    .await;
    assert_eq!(winner.status(), StatusCode::SEE_OTHER);

    let loser = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts/1")
            .set_json(json!({
                "blogId": original["form"]["blogId"],
                "title": "Stale title",
                "content": "The write that loses.",
                "version": stale_version
            }))
            .to_request(),
    )
    .await;
    assert_eq!(loser.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = test::read_body(loser).await;
    let value: Value = serde_json::from_slice(&body).expect("form view");
    assert_eq!(value["errors"][0]["field"], json!("version"));
    // The re-rendered form still carries the loser's input.
    assert_eq!(value["form"]["title"], json!("Stale title"));

    let current = get_json(&app, "/posts/1", None).await;
    assert_eq!(current["title"], json!("Intervening title"));
}

#[actix_web::test]
async fn business_rule_failures_name_their_fields_and_write_nothing() {
    let app = test::init_service(seeded_app(SeedSelection::Small)).await;

    let overlong_title = "x".repeat(200);
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({
                "blogId": 1,
                "title": overlong_title,
                "content": "body"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = test::read_body(response).await;
    let value: Value = serde_json::from_slice(&body).expect("form view");
    assert_eq!(value["errors"][0]["field"], json!("title"));

    let counted = get_json(&app, "/posts/count", None).await;
    assert_eq!(counted["count"], json!(2));
}

#[actix_web::test]
async fn submissions_for_unknown_blogs_fail_on_the_blog_field() {
    let app = test::init_service(seeded_app(SeedSelection::Small)).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({
                "blogId": 42,
                "title": "title",
                "content": "body"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = test::read_body(response).await;
    let value: Value = serde_json::from_slice(&body).expect("form view");
    assert_eq!(value["errors"][0]["field"], json!("blogId"));
}

#[actix_web::test]
async fn delete_redirects_and_removes_the_post() {
    let app = test::init_service(seeded_app(SeedSelection::Small)).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts/2/delete")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&response).expect("notice stored in session");

    let list = get_json(&app, "/posts", Some(cookie)).await;
    let notice = list["notice"].as_str().expect("delete notice");
    assert!(notice.contains("deleted"), "unexpected notice: {notice}");

    let missing = test::call_service(
        &app,
        test::TestRequest::get().uri("/posts/2").to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn deleting_a_missing_post_is_a_fatal_error_not_a_form_error() {
    let app = test::init_service(seeded_app(SeedSelection::Small)).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts/999/delete")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = test::read_body(response).await;
    let value: Value = serde_json::from_slice(&body).expect("error payload");
    // The generic error response redacts the conflict detail.
    assert_eq!(value["message"], json!("Internal server error"));
}

#[actix_web::test]
async fn count_renders_the_display_message() {
    let app = test::init_service(seeded_app(SeedSelection::Small)).await;

    let counted = get_json(&app, "/posts/count", None).await;
    assert_eq!(counted["count"], json!(2));
    assert_eq!(counted["message"], json!("The total number of posts is 2"));
}

#[actix_web::test]
async fn reset_reseeds_the_medium_data_set() {
    let app = test::init_service(seeded_app(SeedSelection::Small)).await;

    let response = test::call_service(
        &app,
        test::TestRequest::post().uri("/admin/reset").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = session_cookie(&response).expect("notice stored in session");

    let list = get_json(&app, "/posts", Some(cookie)).await;
    assert_eq!(list["notice"], json!("Successfully reset the database"));

    let counted = get_json(&app, "/posts/count", None).await;
    assert_eq!(counted["count"], json!(5));
}
