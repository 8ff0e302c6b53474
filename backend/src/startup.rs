//! Process-wide one-time initialisation.
//!
//! Called once from `main` before the server binds. This layer has no logic
//! of its own: it delegates to the persistence layer's seed routine.

use crate::outbound::persistence::{InMemoryStore, SeedSelection};

/// Initialise the service layer and everything beneath it.
pub fn initialise(store: &InMemoryStore) -> std::io::Result<()> {
    store
        .reset(SeedSelection::Medium)
        .map_err(std::io::Error::other)
}
