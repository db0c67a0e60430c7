// src/backend/local.rs

//! Offline backend: every visualization is a standalone HTML document with
//! its payload inlined. Documents live in memory and are re-rendered after
//! each append or update.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::{debug, info, warn};
use serde_json::{json, Map, Value};

use super::{Backend, CreateRequest, Created, SessionInfo};
use crate::config::LocalConfig;
use crate::error::{Result, VizError};
use crate::session::{Credentials, Endpoint};

#[derive(Debug, Clone)]
struct Document {
    type_name: String,
    data: Value,
    images: Vec<Vec<u8>>,
    options: Map<String, Value>,
    description: Option<String>,
}

pub struct LocalBackend {
    config: LocalConfig,
    documents: RefCell<BTreeMap<String, Document>>,
    next_id: Cell<u64>,
}

impl LocalBackend {
    pub fn new(config: LocalConfig) -> Self {
        LocalBackend {
            config,
            documents: RefCell::new(BTreeMap::new()),
            next_id: Cell::new(1),
        }
    }

    fn allocate(&self, prefix: &str) -> String {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        format!("{prefix}-{id}")
    }

    fn insert(&self, doc: Document) -> Created {
        let id = self.allocate("local");
        let html = self.render(&id, &doc);
        info!("rendered local {} visualization {id}", doc.type_name);
        self.documents.borrow_mut().insert(id.clone(), doc);
        Created {
            id,
            html: Some(html),
        }
    }

    fn with_document<T>(&self, viz_id: &str, f: impl FnOnce(&mut Document) -> T) -> Result<T> {
        let mut documents = self.documents.borrow_mut();
        let doc = documents
            .get_mut(viz_id)
            .ok_or_else(|| VizError::config(format!("no local visualization {viz_id}")))?;
        Ok(f(doc))
    }

    fn render(&self, id: &str, doc: &Document) -> String {
        let images: Vec<String> = doc
            .images
            .iter()
            .map(|png| format!("data:image/png;base64,{}", STANDARD.encode(png)))
            .collect();
        let spec = json!({
            "id": id,
            "type": doc.type_name,
            "data": doc.data,
            "images": images,
            "options": doc.options,
        });
        let description = doc
            .description
            .as_deref()
            .map(|d| format!("<p class=\"lightning-description\">{}</p>\n", escape_html(d)))
            .unwrap_or_default();
        format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
{description}<div id="{id}" class="lightning-viz" style="width: {width}; height: {height}px"></div>
<script id="{id}-spec" type="application/json">{spec}</script>
<script src="{script}"></script>
<script>
(function () {{
  var spec = JSON.parse(document.getElementById("{id}-spec").textContent);
  if (window.lightning) {{ window.lightning.render(document.getElementById("{id}"), spec); }}
}})();
</script>
</body>
</html>
"#,
            title = escape_html(&doc.type_name),
            width = escape_html(&self.config.container_width),
            height = self.config.container_height,
            script = escape_html(&self.config.script_url),
            spec = inline_json(&spec),
        )
    }
}

/// JSON safe to place inside a `<script>` element.
fn inline_json(value: &Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Grows `target` by `data`: arrays are extended, objects merged key by key.
fn merge(target: &mut Value, data: &Value) {
    match (target, data) {
        (Value::Array(existing), Value::Array(more)) => existing.extend(more.iter().cloned()),
        (Value::Object(existing), Value::Object(more)) => {
            for (key, value) in more {
                match existing.get_mut(key) {
                    Some(slot) => merge(slot, value),
                    None => {
                        existing.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}

fn field_mut<'a>(data: &'a mut Value, field: Option<&str>) -> &'a mut Value {
    match field {
        None => data,
        Some(field) => {
            if !data.is_object() {
                *data = json!({});
            }
            &mut data[field]
        }
    }
}

impl Backend for LocalBackend {
    fn create_session(
        &self,
        _host: &str,
        _auth: Option<&Credentials>,
        name: Option<&str>,
    ) -> Result<SessionInfo> {
        Ok(SessionInfo {
            id: self.allocate("session"),
            name: name.map(str::to_string),
        })
    }

    fn create_with_data(&self, _session: &Endpoint, request: &CreateRequest) -> Result<Created> {
        Ok(self.insert(Document {
            type_name: request.type_name.clone(),
            data: request.data.clone().unwrap_or_else(|| json!({})),
            images: Vec::new(),
            options: request.options.clone(),
            description: request.description.clone(),
        }))
    }

    fn create_with_image(
        &self,
        _session: &Endpoint,
        request: &CreateRequest,
        png: &[u8],
    ) -> Result<Created> {
        Ok(self.insert(Document {
            type_name: request.type_name.clone(),
            data: json!({}),
            images: vec![png.to_vec()],
            options: request.options.clone(),
            description: request.description.clone(),
        }))
    }

    fn append_image(&self, _session: &Endpoint, viz_id: &str, png: &[u8]) -> Result<()> {
        self.with_document(viz_id, |doc| doc.images.push(png.to_vec()))
    }

    fn append_data(
        &self,
        _session: &Endpoint,
        viz_id: &str,
        field: Option<&str>,
        data: &Value,
    ) -> Result<()> {
        debug!("appending to local visualization {viz_id}");
        self.with_document(viz_id, |doc| merge(field_mut(&mut doc.data, field), data))
    }

    fn update_data(
        &self,
        _session: &Endpoint,
        viz_id: &str,
        field: Option<&str>,
        data: &Value,
    ) -> Result<()> {
        debug!("replacing data of local visualization {viz_id}");
        self.with_document(viz_id, |doc| *field_mut(&mut doc.data, field) = data.clone())
    }

    fn settings(&self, _session: &Endpoint, viz_id: &str) -> Result<Value> {
        self.with_document(viz_id, |_| ())?;
        warn!("local visualization {viz_id} has no stored settings");
        Ok(json!({}))
    }

    fn html(&self, _session: &Endpoint, viz_id: &str) -> Result<String> {
        let doc = self.with_document(viz_id, |doc| doc.clone())?;
        Ok(self.render(viz_id, &doc))
    }

    fn delete(&self, _session: &Endpoint, viz_id: &str) -> Result<()> {
        self.documents
            .borrow_mut()
            .remove(viz_id)
            .map(|_| ())
            .ok_or_else(|| VizError::config(format!("no local visualization {viz_id}")))
    }

    fn is_local(&self) -> bool {
        true
    }
}
