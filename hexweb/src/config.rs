//! Configuration loader and defaults for the hexweb server.
//!
//! Exposes a lazily-initialized `CONFIG` which reads values from environment
//! variables (with sensible defaults). Fields include the listening port
//! (`port`) and optional TLS assets (`cert`, `key`); without both TLS
//! values the server speaks plain HTTP.
//!
use std::env;

use base64::{Engine as _, engine::general_purpose};
use once_cell::sync::Lazy;

const DEFAULT_PORT: u16 = 8080;

/// Application configuration containing network and TLS settings
pub struct Config {
    /// Listening port
    pub port: u16,
    /// SSL/TLS certificate in PEM form, if configured
    pub cert: Option<String>,
    /// SSL/TLS private key in PEM form, if configured
    pub key: Option<String>,
}

impl Config {
    /// Certificate and key when both halves are configured
    pub fn tls_pair(&self) -> Option<(&str, &str)> {
        match (&self.cert, &self.key) {
            (Some(cert), Some(key)) => Some((cert.as_str(), key.as_str())),
            _ => None,
        }
    }
}

/// Global application configuration instance, lazily initialized
pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    // TLS material may arrive as raw PEM or base64-wrapped PEM.
    let decode_maybe_b64 = |val: String| -> String {
        general_purpose::STANDARD
            .decode(&val)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or(val)
    };

    Config {
        port: env::var("HEXWEB_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT),
        cert: env::var("HEXWEB_CERT").ok().map(decode_maybe_b64),
        key: env::var("HEXWEB_KEY").ok().map(decode_maybe_b64),
    }
});
