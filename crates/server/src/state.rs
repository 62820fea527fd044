use database::TermStore;
use identity::IdentityProvider;
use std::sync::Arc;

/// Collaborators shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TermStore>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(store: Arc<dyn TermStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { store, identity }
    }
}
