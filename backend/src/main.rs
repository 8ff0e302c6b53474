//! Backend entry-point: wires the posts endpoints, session middleware, and
//! OpenAPI docs.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::{web, App, HttpServer};
use std::env;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::inbound::http::posts::{
    count, create, create_form, delay, delete, details, edit_form, index, reset, update,
};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::InMemoryStore;
use backend::startup;
#[cfg(debug_assertions)]
use backend::ApiDoc;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let store = Arc::new(InMemoryStore::new());
    startup::initialise(&store)?;
    let state = web::Data::new(HttpState::new(store));

    HttpServer::new(move || build_app(state.clone(), key.clone(), cookie_secure))
        .bind(("0.0.0.0", 8080))?
        .run()
        .await
}

fn build_app(
    state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build();

    // Literal segments must register ahead of the `{id}` matcher.
    let mut app = App::new()
        .app_data(state)
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
        .service(reset);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}
