use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Resources (MCP server)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// `GET /` on the resource server. Extra keys (e.g. `"mcp": "ok"`) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceCatalog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub resources: Vec<Resource>,
}

// ---------------------------------------------------------------------------
// Models (Ollama runtime)
// ---------------------------------------------------------------------------

/// Model size as reported by the runtime: Ollama sends bytes, other
/// runtimes send a preformatted string. Display-only either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelSize {
    Bytes(u64),
    Number(f64),
    Text(String),
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSize::Bytes(n) => write!(f, "{}", n),
            ModelSize::Number(n) => write!(f, "{}", n),
            ModelSize::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub size: Option<ModelSize>,
}

/// `GET /api/tags` on the runtime.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelCatalog {
    #[serde(default, deserialize_with = "null_as_default")]
    pub models: Vec<Model>,
}

/// Body of `/api/pull` and `/api/delete`.
#[derive(Debug, Clone, Serialize)]
pub struct ModelNameRequest<'a> {
    pub name: &'a str,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub app: String,
    pub uptime_seconds: u64,
}
