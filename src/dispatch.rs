// src/dispatch.rs

//! Routes a cleaned payload to the right creation path.
//!
//! Structured fields go out in one JSON call. Images go out one per request:
//! a payload of only images creates the visualization from the first image,
//! a mixed payload creates it from the fields. Either way the remaining
//! images are appended afterwards in their original order.

use log::{debug, trace};
use serde_json::{Map, Value};

use crate::backend::{Backend, CreateRequest, Created};
use crate::error::Result;
use crate::payload::{wire_data, Payload};
use crate::session::Endpoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Structured fields only.
    Data,
    /// Images only.
    Images,
    /// Fields first, then each image appended.
    DataThenImages,
}

pub fn classify(payload: &Payload) -> Route {
    match (payload.has_fields(), payload.has_images()) {
        (_, false) => Route::Data,
        (false, true) => Route::Images,
        (true, true) => Route::DataThenImages,
    }
}

/// Everything about a creation call except the payload itself.
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    pub session: &'a Endpoint,
    pub type_name: &'a str,
    pub options: &'a Map<String, Value>,
    pub description: Option<&'a str>,
    /// Send row fields as keyed objects.
    pub keyed: bool,
}

pub fn create(backend: &dyn Backend, target: Target<'_>, payload: Payload) -> Result<Created> {
    let route = classify(&payload);
    debug!("creating {} via {route:?}", target.type_name);
    let (fields, images) = payload.into_parts();
    let mut request = CreateRequest {
        type_name: target.type_name.to_string(),
        data: None,
        options: target.options.clone(),
        description: target.description.map(str::to_string),
    };

    let (mut created, pending) = match (route, images.split_first()) {
        (Route::Images, Some((first, rest))) => {
            let created = backend.create_with_image(target.session, &request, first)?;
            (created, rest)
        }
        _ => {
            request.data = Some(wire_data(fields, target.keyed)?);
            let created = backend.create_with_data(target.session, &request)?;
            (created, &images[..])
        }
    };

    for (i, png) in pending.iter().enumerate() {
        trace!("appending image {} to {}", i + 1, created.id);
        backend.append_image(target.session, &created.id, png)?;
    }
    if created.html.is_some() && !pending.is_empty() {
        created.html = Some(backend.html(target.session, &created.id)?);
    }
    Ok(created)
}
