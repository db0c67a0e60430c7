//! Recording backend for driving the client without a server.
//!
//! Every call is appended to a log the test can inspect afterwards; ids are
//! handed out in sequence and settings are whatever the test planted.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lightning_viz::backend::{Backend, CreateRequest, Created, SessionInfo};
use lightning_viz::session::{Credentials, Endpoint};
use lightning_viz::{Config, Lightning, Result};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum Call {
    CreateSession { name: Option<String> },
    CreateWithData { type_name: String, data: Value, options: Value, description: Option<String> },
    CreateWithImage { type_name: String, png: Vec<u8> },
    AppendImage { viz_id: String, png: Vec<u8> },
    AppendData { viz_id: String, field: Option<String>, data: Value },
    UpdateData { viz_id: String, field: Option<String>, data: Value },
    Settings { viz_id: String },
    Delete { viz_id: String },
}

#[derive(Default)]
pub struct RecordingBackend {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
    settings: RefCell<Value>,
}

#[allow(dead_code)]
impl RecordingBackend {
    pub fn new() -> Rc<Self> {
        Rc::new(RecordingBackend::default())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn set_settings(&self, settings: Value) {
        *self.settings.borrow_mut() = settings;
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn next(&self) -> String {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id.to_string()
    }
}

impl Backend for RecordingBackend {
    fn create_session(
        &self,
        _host: &str,
        _auth: Option<&Credentials>,
        name: Option<&str>,
    ) -> Result<SessionInfo> {
        self.record(Call::CreateSession {
            name: name.map(str::to_string),
        });
        Ok(SessionInfo {
            id: format!("s{}", self.next()),
            name: name.map(str::to_string),
        })
    }

    fn create_with_data(&self, _session: &Endpoint, request: &CreateRequest) -> Result<Created> {
        self.record(Call::CreateWithData {
            type_name: request.type_name.clone(),
            data: request.data.clone().unwrap_or(Value::Null),
            options: Value::Object(request.options.clone()),
            description: request.description.clone(),
        });
        Ok(Created {
            id: self.next(),
            html: None,
        })
    }

    fn create_with_image(
        &self,
        _session: &Endpoint,
        request: &CreateRequest,
        png: &[u8],
    ) -> Result<Created> {
        self.record(Call::CreateWithImage {
            type_name: request.type_name.clone(),
            png: png.to_vec(),
        });
        Ok(Created {
            id: self.next(),
            html: None,
        })
    }

    fn append_image(&self, _session: &Endpoint, viz_id: &str, png: &[u8]) -> Result<()> {
        self.record(Call::AppendImage {
            viz_id: viz_id.to_string(),
            png: png.to_vec(),
        });
        Ok(())
    }

    fn append_data(
        &self,
        _session: &Endpoint,
        viz_id: &str,
        field: Option<&str>,
        data: &Value,
    ) -> Result<()> {
        self.record(Call::AppendData {
            viz_id: viz_id.to_string(),
            field: field.map(str::to_string),
            data: data.clone(),
        });
        Ok(())
    }

    fn update_data(
        &self,
        _session: &Endpoint,
        viz_id: &str,
        field: Option<&str>,
        data: &Value,
    ) -> Result<()> {
        self.record(Call::UpdateData {
            viz_id: viz_id.to_string(),
            field: field.map(str::to_string),
            data: data.clone(),
        });
        Ok(())
    }

    fn settings(&self, _session: &Endpoint, viz_id: &str) -> Result<Value> {
        self.record(Call::Settings {
            viz_id: viz_id.to_string(),
        });
        Ok(self.settings.borrow().clone())
    }

    fn html(&self, session: &Endpoint, viz_id: &str) -> Result<String> {
        Ok(format!("<iframe src=\"{}\"></iframe>", session.permalink(viz_id)))
    }

    fn delete(&self, _session: &Endpoint, viz_id: &str) -> Result<()> {
        self.record(Call::Delete {
            viz_id: viz_id.to_string(),
        });
        Ok(())
    }
}

/// A client wired to a fresh recording backend.
#[allow(dead_code)]
pub fn recording_client(config: Config) -> (Lightning, Rc<RecordingBackend>) {
    let backend = RecordingBackend::new();
    let lgn = Lightning::with_backend(config, backend.clone());
    (lgn, backend)
}

/// The data sent by the only `CreateWithData` call in `calls`.
#[allow(dead_code)]
pub fn created_data(calls: &[Call]) -> Value {
    calls
        .iter()
        .find_map(|call| match call {
            Call::CreateWithData { data, .. } => Some(data.clone()),
            _ => None,
        })
        .unwrap_or_else(|| json!(null))
}
