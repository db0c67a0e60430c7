// src/session.rs

//! A session groups visualizations on the server. In local mode it is a
//! placeholder with a locally assigned id.

use std::fmt;

use serde::{Deserialize, Serialize};

/// HTTP basic-auth credentials attached to every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Everything needed to address requests at one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub session_id: String,
    pub auth: Option<Credentials>,
}

impl Endpoint {
    pub fn new(host: &str, session_id: impl Into<String>, auth: Option<Credentials>) -> Self {
        Endpoint {
            host: host.trim_end_matches('/').to_string(),
            session_id: session_id.into(),
            auth,
        }
    }

    /// `POST` target for new visualizations.
    pub fn visualizations_url(&self) -> String {
        format!("{}/sessions/{}/visualizations", self.host, self.session_id)
    }

    /// Base URL of one visualization inside this session.
    pub fn visualization_url(&self, viz_id: &str) -> String {
        format!("{}/{viz_id}", self.visualizations_url())
    }

    /// Session-independent link to a visualization.
    pub fn permalink(&self, viz_id: &str) -> String {
        format!("{}/visualizations/{viz_id}", self.host)
    }

    /// Appends the `?host=` query the server uses to build asset URLs.
    pub fn with_host_query(&self, url: &str) -> String {
        format!("{url}?host={}", self.host)
    }
}

/// The client's current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    endpoint: Endpoint,
    name: Option<String>,
    visualizations: Vec<String>,
}

impl Session {
    pub fn new(endpoint: Endpoint, name: Option<String>) -> Self {
        Session {
            endpoint,
            name,
            visualizations: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.endpoint.session_id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn host(&self) -> &str {
        &self.endpoint.host
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Ids of the visualizations created through this session, oldest first.
    pub fn visualizations(&self) -> &[String] {
        &self.visualizations
    }

    pub(crate) fn record(&mut self, viz_id: &str) {
        self.visualizations.push(viz_id.to_string());
    }

    /// Server page listing this session's visualizations.
    pub fn feed_url(&self) -> String {
        format!("{}/sessions/{}/feed/", self.endpoint.host, self.endpoint.session_id)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}", self.endpoint.session_id),
        }
    }
}
