//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the generation client, constructed once at startup, and the map
//! of live browser sessions. Each session owns its own tool controllers, so
//! nothing is shared between sessions except the client.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::services::generation::GenerationClient;
use crate::services::session::Session;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<GenerationClient>,
    pub sessions: Arc<RwLock<HashMap<Uuid, Arc<Session>>>>,
}

impl AppState {
    #[must_use]
    pub fn new(generator: Arc<GenerationClient>) -> Self {
        Self { generator, sessions: Arc::new(RwLock::new(HashMap::new())) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
