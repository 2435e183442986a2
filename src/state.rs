use std::sync::Arc;

use crate::messages::MessageSource;
use crate::service::PlayerService;

/// Shared handler state. Collaborators are injected at construction.
#[derive(Clone)]
pub struct AppState {
    pub players: Arc<dyn PlayerService>,
    pub messages: Arc<dyn MessageSource>,
}

impl AppState {
    pub fn new(players: Arc<dyn PlayerService>, messages: Arc<dyn MessageSource>) -> Self {
        Self { players, messages }
    }
}
