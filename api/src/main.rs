//! TaxEase API server entry point

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenvy::dotenv;
use log::{info, warn};

use te_api::middleware::cors::create_cors;
use te_api::middleware::SecurityHeaders;
use te_api::{configure_app, AppState};
use te_core::services::auth::{CookieJwtScheme, SchemeChain};
use te_core::services::token::TokenService;
use te_core::services::verification::VerificationService;
use te_infra::database::connection::DatabasePool;
use te_infra::database::mysql::MySqlUserRepository;
use te_infra::dispatch::{ConsoleOtpChannel, DispatchQueue, InMemoryOtpStore};
use te_infra::google::{GoogleTokenVerifier, IdTokenVerifier};
use te_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    info!("starting TaxEase API ({})", config.environment);

    if config.auth.jwt.is_using_default_secret() && !config.environment.is_development() {
        warn!("JWT_SECRET is not set; tokens are signed with the built-in development secret");
    }

    let pool = DatabasePool::new(&config.database)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));

    let token_service = Arc::new(TokenService::new(config.auth.jwt.clone()));
    let auth_chain = SchemeChain::new().with_scheme(Arc::new(CookieJwtScheme::new(
        token_service.clone(),
        users.clone(),
        config.auth.cookies.access_name.clone(),
    )));

    if config.dispatch.channel != "console" {
        warn!(
            "unknown OTP channel {:?}, falling back to console",
            config.dispatch.channel
        );
    }
    let channel = Arc::new(ConsoleOtpChannel::new());
    let (queue, _dispatch_worker) = DispatchQueue::spawn(channel, config.dispatch.clone());
    let verification = Arc::new(VerificationService::new(
        queue,
        Arc::new(InMemoryOtpStore::new()),
        config.dispatch.clone(),
    ));

    let google: Option<Arc<dyn IdTokenVerifier>> = config
        .auth
        .google_client_id
        .as_ref()
        .map(|id| Arc::new(GoogleTokenVerifier::new(id.clone())) as Arc<dyn IdTokenVerifier>);
    if google.is_none() {
        info!("GOOGLE_CLIENT_ID not set; Google sign-in disabled");
    }

    let bind_address = config.server.bind_address();
    let state = web::Data::new(AppState {
        config,
        users,
        token_service,
        auth_chain,
        verification,
        google,
    });

    info!("listening on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(SecurityHeaders::new(state.config.environment))
            .wrap(create_cors(&state.config.cors))
            .configure(configure_app(state.clone()))
    })
    .bind(&bind_address)?
    .run()
    .await
}
