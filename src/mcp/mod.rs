//! MCP resource server support.
//!
//! The dashboard only consumes the server's flat resource registry
//! (`GET /` and `POST /resource/{name}`); see [`client::ResourceClient`].

pub mod client;
