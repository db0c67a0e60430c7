// src/backend/remote.rs

//! HTTP backend: one blocking request per call against a Lightning server.

use std::time::Duration;

use log::{debug, info, trace};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde_json::{json, Value};

use super::{id_of, Backend, CreateRequest, Created, SessionInfo};
use crate::error::{Result, VizError};
use crate::session::{Credentials, Endpoint};

pub struct RemoteBackend {
    client: Client,
}

impl RemoteBackend {
    /// `timeout` bounds each request; `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(RemoteBackend {
            client: builder.build()?,
        })
    }

    /// Sends `request`, turning non-success statuses into transport errors
    /// carrying the response body.
    fn send(&self, request: RequestBuilder, auth: Option<&Credentials>) -> Result<Response> {
        let request = match auth {
            Some(creds) => request.basic_auth(&creds.username, Some(&creds.password)),
            None => request,
        };
        let response = request.send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .text()
            .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
        Err(VizError::Transport {
            status: Some(status.as_u16()),
            detail,
        })
    }

    fn image_part(png: &[u8]) -> Result<Part> {
        Ok(Part::bytes(png.to_vec())
            .file_name("image.png")
            .mime_str("image/png")?)
    }

    fn data_url(session: &Endpoint, viz_id: &str, field: Option<&str>) -> String {
        let url = format!(
            "{}/data/{}",
            session.visualization_url(viz_id),
            field.unwrap_or_default()
        );
        session.with_host_query(&url)
    }
}

impl Backend for RemoteBackend {
    fn create_session(
        &self,
        host: &str,
        auth: Option<&Credentials>,
        name: Option<&str>,
    ) -> Result<SessionInfo> {
        let url = format!("{}/sessions/", host.trim_end_matches('/'));
        let body = match name {
            Some(name) => json!({ "name": name }),
            None => json!({}),
        };
        debug!("POST {url}");
        let response: Value = self.send(self.client.post(&url).json(&body), auth)?.json()?;
        let info = SessionInfo {
            id: id_of(&response)?,
            name: response
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string),
        };
        info!("created session {} on {host}", info.id);
        Ok(info)
    }

    fn create_with_data(&self, session: &Endpoint, request: &CreateRequest) -> Result<Created> {
        let url = session.visualizations_url();
        let mut body = json!({
            "type": request.type_name,
            "data": request.data.clone().unwrap_or_else(|| json!({})),
        });
        if !request.options.is_empty() {
            body["options"] = Value::Object(request.options.clone());
        }
        if let Some(description) = &request.description {
            body["description"] = Value::String(description.clone());
        }
        debug!("POST {url} ({})", request.type_name);
        let response: Value = self
            .send(self.client.post(&url).json(&body), session.auth.as_ref())?
            .json()?;
        Ok(Created {
            id: id_of(&response)?,
            html: None,
        })
    }

    fn create_with_image(
        &self,
        session: &Endpoint,
        request: &CreateRequest,
        png: &[u8],
    ) -> Result<Created> {
        let url = session.visualizations_url();
        let mut form = Form::new()
            .text("type", request.type_name.clone())
            .part("file", Self::image_part(png)?);
        if !request.options.is_empty() {
            form = form.text("options", Value::Object(request.options.clone()).to_string());
        }
        if let Some(description) = &request.description {
            form = form.text("description", description.clone());
        }
        debug!("POST {url} ({}, {} byte image)", request.type_name, png.len());
        let response: Value = self
            .send(self.client.post(&url).multipart(form), session.auth.as_ref())?
            .json()?;
        Ok(Created {
            id: id_of(&response)?,
            html: None,
        })
    }

    fn append_image(&self, session: &Endpoint, viz_id: &str, png: &[u8]) -> Result<()> {
        let url = session.with_host_query(&format!(
            "{}/data/images",
            session.visualization_url(viz_id)
        ));
        let form = Form::new()
            .text("type", "image")
            .part("file", Self::image_part(png)?);
        trace!("POST {url} ({} bytes)", png.len());
        self.send(self.client.post(&url).multipart(form), session.auth.as_ref())?;
        Ok(())
    }

    fn append_data(
        &self,
        session: &Endpoint,
        viz_id: &str,
        field: Option<&str>,
        data: &Value,
    ) -> Result<()> {
        let url = Self::data_url(session, viz_id, field);
        debug!("POST {url}");
        self.send(
            self.client.post(&url).json(&json!({ "data": data })),
            session.auth.as_ref(),
        )?;
        Ok(())
    }

    fn update_data(
        &self,
        session: &Endpoint,
        viz_id: &str,
        field: Option<&str>,
        data: &Value,
    ) -> Result<()> {
        let url = Self::data_url(session, viz_id, field);
        debug!("PUT {url}");
        self.send(
            self.client.put(&url).json(&json!({ "data": data })),
            session.auth.as_ref(),
        )?;
        Ok(())
    }

    fn settings(&self, session: &Endpoint, viz_id: &str) -> Result<Value> {
        let url = format!("{}/settings/", session.visualization_url(viz_id));
        debug!("GET {url}");
        let response: Value = self
            .send(self.client.get(&url), session.auth.as_ref())?
            .json()?;
        Ok(response.get("settings").cloned().unwrap_or_else(|| json!({})))
    }

    fn html(&self, session: &Endpoint, viz_id: &str) -> Result<String> {
        let url = session.with_host_query(&format!("{}/embed", session.permalink(viz_id)));
        debug!("GET {url}");
        Ok(self
            .send(self.client.get(&url), session.auth.as_ref())?
            .text()?)
    }

    fn delete(&self, session: &Endpoint, viz_id: &str) -> Result<()> {
        let url = session.visualization_url(viz_id);
        debug!("DELETE {url}");
        self.send(self.client.delete(&url), session.auth.as_ref())?;
        info!("deleted visualization {viz_id}");
        Ok(())
    }
}
