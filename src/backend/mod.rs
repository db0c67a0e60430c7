// src/backend/mod.rs

//! The visualization-creation collaborator. `RemoteBackend` talks to a
//! Lightning server over HTTP; `LocalBackend` renders self-contained HTML.

pub mod local;
pub mod remote;

pub use local::LocalBackend;
pub use remote::RemoteBackend;

use serde_json::{Map, Value};

use crate::error::{Result, VizError};
use crate::session::{Credentials, Endpoint};

/// What a session-creation call hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub id: String,
    pub name: Option<String>,
}

/// A newly created visualization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub id: String,
    /// Rendered document, local mode only.
    pub html: Option<String>,
}

/// Parameters of one creation call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateRequest {
    pub type_name: String,
    /// Structured data; `None` when creating from an image.
    pub data: Option<Value>,
    pub options: Map<String, Value>,
    pub description: Option<String>,
}

/// Interface shared by the remote and local renderers.
///
/// All calls are synchronous and issue at most one request.
pub trait Backend {
    fn create_session(
        &self,
        host: &str,
        auth: Option<&Credentials>,
        name: Option<&str>,
    ) -> Result<SessionInfo>;

    /// Creates a visualization from structured data.
    fn create_with_data(&self, session: &Endpoint, request: &CreateRequest) -> Result<Created>;

    /// Creates a visualization from its first image.
    fn create_with_image(
        &self,
        session: &Endpoint,
        request: &CreateRequest,
        png: &[u8],
    ) -> Result<Created>;

    fn append_image(&self, session: &Endpoint, viz_id: &str, png: &[u8]) -> Result<()>;

    /// Grows the visualization's data (or one `field` of it).
    fn append_data(
        &self,
        session: &Endpoint,
        viz_id: &str,
        field: Option<&str>,
        data: &Value,
    ) -> Result<()>;

    /// Replaces the visualization's data (or one `field` of it).
    fn update_data(
        &self,
        session: &Endpoint,
        viz_id: &str,
        field: Option<&str>,
        data: &Value,
    ) -> Result<()>;

    /// User interaction state stored with the visualization.
    fn settings(&self, session: &Endpoint, viz_id: &str) -> Result<Value>;

    /// Embeddable HTML for the visualization.
    fn html(&self, session: &Endpoint, viz_id: &str) -> Result<String>;

    fn delete(&self, session: &Endpoint, viz_id: &str) -> Result<()>;

    /// Local backends have no server, so no links or stored settings.
    fn is_local(&self) -> bool {
        false
    }
}

/// Reads an `id` member that the server may send as a number or a string.
pub(crate) fn id_of(response: &Value) -> Result<String> {
    match response.get("id") {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(VizError::Transport {
            status: None,
            detail: format!("response carried no id: {response}"),
        }),
    }
}
