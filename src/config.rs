use std::env;

use anyhow::Result;

use crate::gemini::client::{DEFAULT_GEMINI_API_URL, DEFAULT_GEMINI_MODEL};

/// Origins of the local client dev servers, allowed by default.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://localhost:3000",
    "http://127.0.0.1:5173",
    "http://127.0.0.1:3000",
];

/// Default cap on uploaded bill images (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API key: required for extraction and chat
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Generative Language API base URL (override for testing/proxies)
    pub gemini_api_url: String,
    pub port: u16,
    pub bind_addr: String,
    /// Browser origins allowed to call the API
    pub cors_origins: Vec<String>,
    pub max_upload_bytes: usize,
    /// Deployed services pinged by `claimsense keep-alive`
    pub keepalive_urls: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the Gemini key, which is only
    /// checked by commands that call the model.
    pub fn load() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(p) => p
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a port number, got {p:?}"))?,
            Err(_) => 5000,
        };

        let max_upload_bytes = match env::var("CLAIMSENSE_MAX_UPLOAD_BYTES") {
            Ok(v) => v.trim().parse().map_err(|_| {
                anyhow::anyhow!("CLAIMSENSE_MAX_UPLOAD_BYTES must be a byte count, got {v:?}")
            })?,
            Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let cors_origins = match env::var("CORS_ORIGINS") {
            Ok(v) => parse_list(&v),
            Err(_) => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),
            port,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            cors_origins,
            max_upload_bytes,
            keepalive_urls: env::var("KEEPALIVE_URLS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
        })
    }

    /// Check that the Gemini API key is configured.
    /// Call this before any operation that talks to the model.
    pub fn require_gemini(&self) -> Result<()> {
        if self.gemini_api_key.is_empty() {
            anyhow::bail!(
                "GEMINI_API_KEY not set. Add it to your .env file.\n\
                 Get a key from https://aistudio.google.com/app/apikey"
            );
        }
        Ok(())
    }
}

/// Split a comma-separated env value, dropping blanks.
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
