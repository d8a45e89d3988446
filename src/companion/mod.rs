use axum::{
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN,
        },
        HeaderValue,
    },
    routing::post,
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::{anthropic::AnthropicClient, config::CompanionConfig};

pub mod error;
pub mod handlers;
pub mod types;

use handlers::{companion_message, method_not_allowed, preflight};

#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured; no upstream call is possible.
    pub anthropic: Option<AnthropicClient>,
}

impl AppState {
    pub fn from_config(config: &CompanionConfig) -> anyhow::Result<Self> {
        let anthropic = match &config.api_key {
            Some(key) => {
                let client = reqwest::Client::builder()
                    .timeout(config.upstream_timeout)
                    .build()?;
                Some(AnthropicClient::new(client, &config.base_url, key.clone()))
            }
            None => None,
        };
        Ok(Self { anthropic })
    }
}

/// Companion routes. Every response, including preflight and the JSON 405,
/// carries the allow-all CORS headers.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(companion_message)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        // Path used by the deployed frontend
        .route(
            "/api/companion",
            post(companion_message)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
}
