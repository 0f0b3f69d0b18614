//! Client for the MCP resource server.
//!
//! The server exposes a flat registry: `GET /` lists the resources and
//! `POST /resource/{name}` invokes one with an arbitrary JSON payload.
//! Both routes require the static bearer token.

use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::models::{Resource, ResourceCatalog};
use crate::transport::{JsonReply, Transport, TransportError};

#[derive(Debug, Clone)]
pub struct ResourceClient {
    transport: Transport,
    base: Url,
    api_key: Option<String>,
}

impl ResourceClient {
    pub fn new(transport: Transport, base: Url, api_key: Option<String>) -> Self {
        Self {
            transport,
            base,
            api_key,
        }
    }

    /// Fetch the resource registry. A body without `resources` is an empty catalog.
    pub async fn list_resources(&self) -> Result<Vec<Resource>, TransportError> {
        let catalog: ResourceCatalog = self
            .transport
            .get_json(&self.base, self.api_key.as_deref())
            .await?;
        Ok(catalog.resources)
    }

    /// Invoke `name` with `payload`. Non-2xx replies still come back as long
    /// as their body is JSON, so the caller can show the server's error body.
    pub async fn invoke(&self, name: &str, payload: &Value) -> Result<JsonReply, TransportError> {
        let url = self.resource_url(name);
        tracing::debug!("mcp: POST {}", url);
        self.transport
            .send_json_any(Method::POST, &url, self.api_key.as_deref(), payload)
            .await
    }

    /// `{base}/resource/{name}` with `name` as a single escaped path segment.
    pub fn resource_url(&self, name: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("resource").push(name);
        }
        url
    }
}
