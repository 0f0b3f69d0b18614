// MCP Dashboard - HTTP transport
//
// Thin wrapper over `reqwest::Client`: attaches the bearer token and the
// JSON content type, and decodes responses into the shape the caller names.
// Every failure comes back as a `TransportError`, never as a half-parsed value.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request never reached the server, or the response never arrived.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: StatusCode,
        /// Body of the failed response, when it was JSON.
        body: Option<Value>,
    },

    /// The server answered, but not with the expected shape.
    #[error("unexpected response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// A decoded JSON body together with the status it arrived with.
#[derive(Debug, Clone)]
pub struct JsonReply {
    pub status: StatusCode,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
}

impl Transport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// GET `url` and decode the JSON body as `T`, whatever the status.
    /// A non-2xx reply is an error only when its body is not JSON.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        bearer: Option<&str>,
    ) -> Result<T, TransportError> {
        let req = self.request(Method::GET, url, bearer);
        let reply = self.execute_json(url, req).await?;
        if !reply.status.is_success() {
            tracing::debug!("transport: {} answered {} with a JSON body", url, reply.status);
        }
        decode(url, reply.body)
    }

    /// Send `body` as JSON and return whatever JSON came back, whatever the status.
    /// Only a transport failure or a non-JSON body is an error here.
    pub async fn send_json_any<B>(
        &self,
        method: Method,
        url: &Url,
        bearer: Option<&str>,
        body: &B,
    ) -> Result<JsonReply, TransportError>
    where
        B: Serialize + ?Sized,
    {
        let req = self
            .request(method, url, bearer)
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        self.execute_json(url, req).await
    }

    /// Send `body` as JSON and consume only the status. The body is drained so
    /// that a streamed response has finished before this returns.
    pub async fn send_for_status<B>(
        &self,
        method: Method,
        url: &Url,
        bearer: Option<&str>,
        body: &B,
    ) -> Result<StatusCode, TransportError>
    where
        B: Serialize + ?Sized,
    {
        let resp = self
            .request(method, url, bearer)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|source| network(url, source))?;

        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|source| network(url, source))?;

        if status.is_success() {
            Ok(status)
        } else {
            tracing::debug!("transport: {} {} ({} bytes)", url, status, bytes.len());
            Err(TransportError::Status {
                url: url.to_string(),
                status,
                body: serde_json::from_slice(&bytes).ok(),
            })
        }
    }

    fn request(&self, method: Method, url: &Url, bearer: Option<&str>) -> RequestBuilder {
        let mut req = self.client.request(method, url.clone());
        if let Some(token) = bearer.map(str::trim).filter(|t| !t.is_empty()) {
            req = req.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        req
    }

    async fn execute_json(&self, url: &Url, req: RequestBuilder) -> Result<JsonReply, TransportError> {
        let resp = req.send().await.map_err(|source| network(url, source))?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|source| network(url, source))?;

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(body) => Ok(JsonReply { status, body }),
            Err(_) if !status.is_success() => Err(TransportError::Status {
                url: url.to_string(),
                status,
                body: None,
            }),
            Err(e) => Err(TransportError::Decode {
                url: url.to_string(),
                reason: format!("body is not JSON: {}", e),
            }),
        }
    }
}

fn network(url: &Url, source: reqwest::Error) -> TransportError {
    TransportError::Network {
        url: url.to_string(),
        source,
    }
}

fn decode<T: DeserializeOwned>(url: &Url, body: Value) -> Result<T, TransportError> {
    serde_json::from_value(body).map_err(|e| TransportError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
