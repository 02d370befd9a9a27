//! Backend factory for creating backend instances from configuration.

use anyhow::{anyhow, Context, Result};
use std::time::Duration;

use super::{graphql::GraphQlBackend, Backend};
use crate::config::ApiConfig;

/// Environment variable overriding the configured GraphQL endpoint.
pub const ENDPOINT_ENV: &str = "COMMIT2ACT_GRAPHQL_ENDPOINT";

/// Resolve the endpoint, preferring the environment override.
pub fn resolve_endpoint(api: &ApiConfig) -> Option<String> {
    std::env::var(ENDPOINT_ENV)
        .ok()
        .filter(|value| !value.is_empty())
        .or_else(|| Some(api.endpoint.clone()).filter(|value| !value.is_empty()))
}

/// Create a backend instance from the `[api]` configuration section.
///
/// # Errors
/// Returns error if:
/// - Backend type is unknown
/// - No endpoint is configured
pub fn create_backend(api: &ApiConfig) -> Result<Box<dyn Backend>> {
    match api.backend_type.as_str() {
        "graphql" => {
            let endpoint = resolve_endpoint(api)
                .ok_or_else(|| anyhow!("No GraphQL endpoint configured (set [api] endpoint or {})", ENDPOINT_ENV))?;
            let api_key = read_secret(&api.api_key_env);
            let auth_token = read_secret(&api.auth_token_env);

            let backend = GraphQlBackend::new(
                endpoint,
                api_key,
                auth_token,
                Duration::from_secs(api.request_timeout_seconds),
            )
            .context("Failed to create GraphQL backend")?;
            Ok(Box::new(backend))
        }
        _ => Err(anyhow!("Unknown backend type: {}", api.backend_type)),
    }
}

fn read_secret(env_var: &str) -> Option<String> {
    if env_var.is_empty() {
        return None;
    }
    std::env::var(env_var).ok().filter(|value| !value.is_empty())
}
