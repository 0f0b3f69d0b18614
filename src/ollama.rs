//! Ollama-compatible model runtime client: catalog and model management.
//!
//! Talks to `/api/tags`, `/api/pull` and `/api/delete` under the configured
//! runtime base URL. None of these routes are authenticated.

use reqwest::Method;
use url::Url;

use crate::models::{Model, ModelCatalog, ModelNameRequest};
use crate::transport::{Transport, TransportError};

#[derive(Debug, Clone)]
pub struct ModelRuntimeClient {
    transport: Transport,
    base: Url,
}

impl ModelRuntimeClient {
    pub fn new(transport: Transport, base: Url) -> Self {
        Self { transport, base }
    }

    /// List installed models. A body without `models` is an empty catalog.
    pub async fn list_models(&self) -> Result<Vec<Model>, TransportError> {
        let url = self.endpoint("api/tags")?;
        let catalog: ModelCatalog = self.transport.get_json(&url, None).await?;
        tracing::debug!("ollama: {} models listed", catalog.models.len());
        Ok(catalog.models)
    }

    /// Pull (download/install) `name`. Resolves once the runtime has finished
    /// answering; only the status is consumed.
    pub async fn pull(&self, name: &str) -> Result<(), TransportError> {
        let url = self.endpoint("api/pull")?;
        self.transport
            .send_for_status(Method::POST, &url, None, &ModelNameRequest { name })
            .await?;
        Ok(())
    }

    /// Delete `name` from the runtime.
    pub async fn delete(&self, name: &str) -> Result<(), TransportError> {
        let url = self.endpoint("api/delete")?;
        self.transport
            .send_for_status(Method::DELETE, &url, None, &ModelNameRequest { name })
            .await?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base.join(path).map_err(|e| TransportError::Decode {
            url: format!("{}{}", self.base, path),
            reason: format!("invalid endpoint URL: {}", e),
        })
    }
}
