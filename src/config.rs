// MCP Dashboard - Startup configuration
//
// Every upstream location and the bearer secret are read once at startup
// and injected into `AppState`; no call site carries literals.

use std::fmt;
use std::str::FromStr;

use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:4000";
const DEFAULT_MODEL_RUNTIME_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("{var} must use http or https (got '{scheme}')")]
    UnsupportedScheme { var: &'static str, scheme: String },

    #[error("PAYLOAD_PARSE_POLICY must be 'lenient' or 'strict' (got '{0}')")]
    InvalidPolicy(String),

    #[error("PORT must be a number between 1 and 65535 (got '{0}')")]
    InvalidPort(String),
}

/// What `submit` does when the payload buffer is not valid JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadParsePolicy {
    /// Send `{}` instead and say nothing.
    #[default]
    Lenient,
    /// Refuse to send and report the parse error.
    Strict,
}

impl FromStr for PayloadParsePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(ConfigError::InvalidPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for PayloadParsePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => f.write_str("lenient"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base of the MCP resource server (`GET /`, `POST /resource/{name}`).
    pub api_base_url: Url,
    /// Static bearer token sent to the resource server. `None` sends no header.
    pub api_key: Option<String>,
    /// Base of the Ollama-compatible runtime (`/api/tags`, `/api/pull`, `/api/delete`).
    pub model_runtime_base_url: Url,
    pub payload_parse_policy: PayloadParsePolicy,
    /// Port the dashboard itself listens on.
    pub port: u16,
}

impl DashboardConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unset or blank keys
    /// fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base_url = parse_base_url(
            "MCP_API_BASE_URL",
            get("MCP_API_BASE_URL").as_deref().unwrap_or(DEFAULT_API_BASE_URL),
        )?;
        let model_runtime_base_url = parse_base_url(
            "OLLAMA_BASE_URL",
            get("OLLAMA_BASE_URL")
                .as_deref()
                .unwrap_or(DEFAULT_MODEL_RUNTIME_BASE_URL),
        )?;
        let payload_parse_policy = match get("PAYLOAD_PARSE_POLICY") {
            Some(raw) => raw.parse()?,
            None => PayloadParsePolicy::default(),
        };
        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|p| *p != 0)
                .ok_or(ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            api_base_url,
            api_key: get("MCP_API_KEY").map(|k| k.trim().to_string()),
            model_runtime_base_url,
            payload_parse_policy,
            port,
        })
    }

    /// Configuration pointing at explicit upstreams, everything else default.
    pub fn for_upstreams(api_base_url: Url, model_runtime_base_url: Url) -> Self {
        Self {
            api_base_url,
            api_key: None,
            model_runtime_base_url,
            payload_parse_policy: PayloadParsePolicy::default(),
            port: DEFAULT_PORT,
        }
    }
}

fn parse_base_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl { var, source })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            var,
            scheme: url.scheme().to_string(),
        });
    }
    // Join semantics need a trailing slash, otherwise the last segment is replaced.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
