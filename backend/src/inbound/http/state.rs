//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend on
//! the domain service rather than on any concrete store. The one exception
//! is the demo reset action, which drives the in-memory store directly.

use std::sync::Arc;

use crate::domain::PostsService;
use crate::outbound::persistence::InMemoryStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// CRUD operations over posts.
    pub posts: PostsService,
    /// Store handle for the demo reset action.
    pub store: Arc<InMemoryStore>,
}

impl HttpState {
    /// Wire the service and handlers onto one shared store.
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self {
            posts: PostsService::new(store.clone(), store.clone()),
            store,
        }
    }
}
