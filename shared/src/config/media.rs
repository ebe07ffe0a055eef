//! Media file serving configuration
//!
//! Media files are served by the application only in a debug configuration;
//! production deployments put a real file server in front.

use serde::{Deserialize, Serialize};

/// Media serving configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    /// Serve media files when running in a debug environment
    #[serde(default = "default_serve_in_debug")]
    pub serve_in_debug: bool,

    /// Filesystem root for media files
    #[serde(default = "default_media_root")]
    pub root: String,

    /// URL prefix under which media is mounted
    #[serde(default = "default_media_url")]
    pub url_prefix: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            serve_in_debug: default_serve_in_debug(),
            root: default_media_root(),
            url_prefix: default_media_url(),
        }
    }
}

impl MediaConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let serve_in_debug = std::env::var("SERVE_MEDIA_IN_DEBUG")
            .map(|v| v == "true" || v == "1")
            .unwrap_or_else(|_| default_serve_in_debug());
        let root = std::env::var("MEDIA_ROOT").unwrap_or_else(|_| default_media_root());
        let url_prefix = std::env::var("MEDIA_URL").unwrap_or_else(|_| default_media_url());

        Self {
            serve_in_debug,
            root,
            url_prefix,
        }
    }
}

fn default_serve_in_debug() -> bool {
    true
}

fn default_media_root() -> String {
    String::from("media")
}

fn default_media_url() -> String {
    String::from("/media")
}
