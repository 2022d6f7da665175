use navigator::agent::Agent;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state: the single agent slot.
///
/// The slot is empty until the user initializes an agent and is replaced
/// wholesale on every re-initialization. Holding the lock across a reply
/// serializes turns, which is all this single-session app needs.
#[derive(Clone, Default)]
pub struct AppState {
    pub agent: Arc<Mutex<Option<Agent>>>,
}
