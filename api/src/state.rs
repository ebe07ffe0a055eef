//! Shared application state

use std::sync::Arc;

use te_core::repositories::UserRepository;
use te_core::services::auth::SchemeChain;
use te_core::services::token::TokenService;
use te_core::services::verification::VerificationService;
use te_infra::dispatch::DispatchQueue;
use te_infra::google::IdTokenVerifier;
use te_shared::config::AppConfig;

/// Services shared by all request handlers
pub struct AppState<U: UserRepository> {
    pub config: AppConfig,
    pub users: Arc<U>,
    pub token_service: Arc<TokenService>,
    pub auth_chain: SchemeChain,
    pub verification: Arc<VerificationService<DispatchQueue>>,
    /// Google sign-in verifier; absent when no client id is configured
    pub google: Option<Arc<dyn IdTokenVerifier>>,
}
