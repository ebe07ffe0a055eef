//! CORS configuration
//!
//! Cookie authentication requires credentialed CORS: the browser only
//! attaches the auth cookies cross-origin when the response names an
//! explicit origin and allows credentials, so wildcard origins are never
//! used here.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use te_shared::config::CorsConfig;

/// Build the CORS middleware from configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(
            config
                .allowed_methods
                .iter()
                .filter_map(|m| m.parse::<Method>().ok())
                .collect::<Vec<_>>(),
        )
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ])
        .max_age(config.max_age as usize);

    for origin in &config.allowed_origins {
        cors = cors.allowed_origin(origin);
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
