//! One-shot notice stored in the session cookie.
//!
//! The MVC "TempData" analogue: a success or filter notice is set when an
//! action completes, survives the redirect, and is consumed and cleared by
//! the next render. A thin wrapper around the Actix session keeps handlers
//! free of framework-specific logic.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::Error;

pub(crate) const NOTICE_KEY: &str = "notice";

/// Newtype wrapper exposing the one-shot notice operations.
#[derive(Clone)]
pub struct FlashContext(Session);

impl FlashContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store a notice to be shown on the next render.
    pub fn set_notice(&self, message: &str) -> Result<(), Error> {
        self.0
            .insert(NOTICE_KEY, message)
            .map_err(|error| Error::internal(format!("failed to persist notice: {error}")))
    }

    /// Consume the pending notice, clearing it from the session.
    pub fn take_notice(&self) -> Option<String> {
        match self.0.remove_as::<String>(NOTICE_KEY) {
            Some(Ok(message)) => Some(message),
            Some(Err(raw)) => {
                warn!(%raw, "discarding malformed notice in session cookie");
                None
            }
            None => None,
        }
    }
}

impl FromRequest for FlashContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(FlashContext::new) })
    }
}
