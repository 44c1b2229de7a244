//! Gateway configuration loader for Parley.
//!
//! Sources, lowest priority first:
//! 1. built-in defaults ([`GatewayConfig::default()`])
//! 2. an optional TOML file
//! 3. `PARLEY_*` environment variables (a `.env` file is loaded first)
//!
//! CLI flags are applied on top by the binary. Secrets are read separately
//! with [`secret_from_env`] and never stored in [`GatewayConfig`].

use std::path::Path;

use secrecy::SecretString;

use parley_types::config::GatewayConfig;

/// Environment variable holding the Anthropic API key.
pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Environment variable that switches on span export.
pub const TELEMETRY_TOKEN_VAR: &str = "PARLEY_TELEMETRY_TOKEN";

/// Older variable names, read only when the `PARLEY_*` one is unset.
const LEGACY_HOST_VAR: &str = "API_HOST";
const LEGACY_PORT_VAR: &str = "API_PORT";
const LEGACY_MODEL_VAR: &str = "CLAUDE_MODEL";
const LEGACY_TELEMETRY_TOKEN_VAR: &str = "LOGFIRE_TOKEN";

/// Load `.env` from the working directory (or a parent), if present.
pub fn load_dotenv() {
    match dotenv::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!("Failed to load .env: {err}"),
    }
}

/// Load gateway configuration from an optional TOML file plus environment.
///
/// - No path, or a missing file: defaults.
/// - A file that fails to parse: logs a warning and uses defaults.
/// - Environment overrides are applied in every case.
pub async fn load_gateway_config(path: Option<&Path>) -> GatewayConfig {
    let mut config = match path {
        Some(path) => load_config_file(path).await,
        None => GatewayConfig::default(),
    };
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

async fn load_config_file(path: &Path) -> GatewayConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return GatewayConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return GatewayConfig::default();
        }
    };

    match toml::from_str::<GatewayConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            GatewayConfig::default()
        }
    }
}

/// Apply `PARLEY_*` overrides using `lookup` to read variables.
///
/// `API_HOST`, `API_PORT` and `CLAUDE_MODEL` are honored when the matching
/// `PARLEY_*` variable is unset. Empty values are ignored. Numeric values
/// that fail to parse are ignored with a warning.
pub fn apply_env_overrides<F>(config: &mut GatewayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(host) = get("PARLEY_HOST").or_else(|| get(LEGACY_HOST_VAR)) {
        config.host = host;
    }
    if let Some(model) = get("PARLEY_MODEL").or_else(|| get(LEGACY_MODEL_VAR)) {
        config.model = model;
    }
    if let Some(url) = get("PARLEY_ANTHROPIC_BASE_URL") {
        config.anthropic_base_url = url;
    }
    if let Some(origins) = get("PARLEY_CORS_ORIGINS") {
        config.cors_origins = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(port) =
        parse_var(&get, "PARLEY_PORT").or_else(|| parse_var(&get, LEGACY_PORT_VAR))
    {
        config.port = port;
    }
    if let Some(max_tokens) = parse_var(&get, "PARLEY_MAX_TOKENS") {
        config.max_tokens = max_tokens;
    }
    if let Some(timeout) = parse_var(&get, "PARLEY_UPSTREAM_TIMEOUT_SECS") {
        config.upstream_timeout_secs = timeout;
    }
}

fn parse_var<T, G>(get: &G, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    let raw = get(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("Ignoring {key}={raw}: {err}");
            None
        }
    }
}

/// Whether span export should be switched on.
///
/// True when `PARLEY_TELEMETRY_TOKEN` (or `LOGFIRE_TOKEN`) is set to a
/// non-empty value. The value itself is not sent anywhere: spans go to the
/// stdout exporter, which takes no credential.
pub fn telemetry_enabled<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    [TELEMETRY_TOKEN_VAR, LEGACY_TELEMETRY_TOKEN_VAR]
        .into_iter()
        .any(|key| lookup(key).is_some_and(|v| !v.trim().is_empty()))
}

/// Read a secret from the environment; empty values count as absent.
pub fn secret_from_env(key: &str) -> Option<SecretString> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(SecretString::from)
}
