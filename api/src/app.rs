//! Application route table
//!
//! One place declares every route, which middleware wraps it, and the
//! conditional media mount. `main` and the integration tests both build
//! their apps from here so the surface under test is the real one.

use actix_web::{web, HttpResponse};

use te_core::repositories::UserRepository;

use crate::middleware::{CookieAuth, PhoneVerificationGate};
use crate::routes;
use crate::state::AppState;

/// Register routes, middleware, and shared state on an actix app
///
/// Everything under `/api` goes through cookie authentication and the
/// phone-verification gate; `/health` and the media mount stay outside.
pub fn configure_app<U: UserRepository + 'static>(
    state: web::Data<AppState<U>>,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let serve_media = state.config.serve_media();
        let media = state.config.media.clone();
        let auth_chain = state.auth_chain.clone();

        cfg.app_data(state);

        cfg.route("/health", web::get().to(routes::health::health_check));

        cfg.service(
            web::scope("/api")
                // Registered inside-out: authentication runs first, then the gate
                .wrap(PhoneVerificationGate::new())
                .wrap(CookieAuth::new(auth_chain))
                .service(
                    web::scope("/auth")
                        .route("/token", web::post().to(routes::auth::login::login::<U>))
                        .route(
                            "/token/refresh",
                            web::post().to(routes::auth::refresh::refresh::<U>),
                        )
                        .route(
                            "/google",
                            web::post().to(routes::auth::google::google_signin::<U>),
                        )
                        .route(
                            "/send-otp",
                            web::post().to(routes::auth::send_otp::send_otp::<U>),
                        )
                        .route(
                            "/verify-otp",
                            web::post().to(routes::auth::verify_otp::verify_otp::<U>),
                        )
                        .route("/logout", web::post().to(routes::auth::logout::logout::<U>))
                        .route(
                            "/dashboard",
                            web::get().to(routes::auth::dashboard::dashboard::<U>),
                        ),
                )
                .service(
                    web::scope("/client").service(
                        web::resource("/profile")
                            .route(web::get().to(routes::client::get_profile::<U>))
                            .route(web::patch().to(routes::client::update_profile::<U>)),
                    ),
                )
                .service(
                    web::scope("/consultant")
                        .route("/clients", web::get().to(routes::consultant::list_clients::<U>)),
                ),
        );

        if serve_media {
            log::info!("serving media from {} at {}", media.root, media.url_prefix);
            cfg.service(actix_files::Files::new(&media.url_prefix, &media.root));
        }

        cfg.default_service(web::route().to(not_found));
    }
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
