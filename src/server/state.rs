use crate::auth::TokenVerifier;
use crate::job_store::JobStore;
use crate::user_store::UserStore;
use axum::extract::FromRef;
use std::sync::Arc;

use super::ServerConfig;

pub type SharedJobStore = Arc<dyn JobStore>;
pub type SharedUserStore = Arc<dyn UserStore>;
pub type SharedTokenVerifier = Arc<dyn TokenVerifier>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub job_store: SharedJobStore,
    pub user_store: SharedUserStore,
    pub token_verifier: SharedTokenVerifier,
}

impl FromRef<ServerState> for SharedJobStore {
    fn from_ref(input: &ServerState) -> Self {
        input.job_store.clone()
    }
}

impl FromRef<ServerState> for SharedUserStore {
    fn from_ref(input: &ServerState) -> Self {
        input.user_store.clone()
    }
}

impl FromRef<ServerState> for SharedTokenVerifier {
    fn from_ref(input: &ServerState) -> Self {
        input.token_verifier.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
