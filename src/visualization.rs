// src/visualization.rs

//! Handle to one created visualization.
//!
//! A handle is returned by every plotting call and is never reused. Appends
//! and updates act on the server copy; `delete` removes it there but leaves
//! the handle itself untouched, so tracking validity is up to the caller.

use std::fmt;
use std::rc::Rc;

use log::{debug, warn};
use serde_json::Value;

use crate::backend::Backend;
use crate::convert::{array_to_im, polygon_to_mask, polygon_to_points, Mask};
use crate::data::Data;
use crate::error::{Result, VizError};
use crate::payload::wire_data;
use crate::plots::{Interaction, Plot, PlotType};
use crate::session::Endpoint;
use crate::validate::{check_coordinates, Polygon};

pub struct Visualization {
    id: String,
    type_name: String,
    plot_type: &'static PlotType,
    session: Endpoint,
    backend: Rc<dyn Backend>,
    html: Option<String>,
    keyed: bool,
}

impl Visualization {
    pub(crate) fn new(
        id: String,
        type_name: &str,
        plot_type: &'static PlotType,
        session: Endpoint,
        backend: Rc<dyn Backend>,
        html: Option<String>,
        keyed: bool,
    ) -> Self {
        Visualization {
            id,
            type_name: type_name.to_string(),
            plot_type,
            session,
            backend,
            html,
            keyed,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn plot_type(&self) -> &'static PlotType {
        self.plot_type
    }

    pub fn session(&self) -> &Endpoint {
        &self.session
    }

    /// Document rendered at creation time (local mode only).
    pub fn rendered(&self) -> Option<&str> {
        self.html.as_deref()
    }

    // --- Streaming and updates ---

    /// Cleans `plot` and appends its data, then its images in order.
    pub fn append<P: Plot>(&self, plot: &P) -> Result<()> {
        self.check_same_type(plot)?;
        let (fields, images) = plot.clean()?.into_parts();
        if !fields.is_empty() {
            let data = wire_data(fields, self.keyed)?;
            self.backend.append_data(&self.session, &self.id, None, &data)?;
        }
        for png in &images {
            self.backend.append_image(&self.session, &self.id, png)?;
        }
        Ok(())
    }

    /// Cleans `plot` and replaces the visualization's data with it.
    pub fn update<P: Plot>(&self, plot: &P) -> Result<()> {
        self.check_same_type(plot)?;
        let payload = plot.clean()?;
        if payload.has_images() {
            return Err(VizError::config(
                "images cannot be replaced in place; use append_image",
            ));
        }
        let (fields, _) = payload.into_parts();
        let data = wire_data(fields, self.keyed)?;
        self.backend.update_data(&self.session, &self.id, None, &data)
    }

    /// Appends raw data, optionally to a single field.
    pub fn append_data(&self, field: Option<&str>, data: impl Into<Data>) -> Result<()> {
        let data = data.into().to_json();
        self.backend.append_data(&self.session, &self.id, field, &data)
    }

    /// Replaces raw data, optionally of a single field.
    pub fn update_data(&self, field: Option<&str>, data: impl Into<Data>) -> Result<()> {
        let data = data.into().to_json();
        self.backend.update_data(&self.session, &self.id, field, &data)
    }

    /// Encodes `image` and appends it after any existing images.
    pub fn append_image(&self, image: impl Into<Data>) -> Result<()> {
        let png = array_to_im(&image.into())?;
        self.backend.append_image(&self.session, &self.id, &png)
    }

    fn check_same_type<P: Plot>(&self, plot: &P) -> Result<()> {
        if plot.type_name() != self.type_name {
            return Err(VizError::config(format!(
                "cannot send {} data to a {} visualization",
                plot.type_name(),
                self.type_name
            )));
        }
        Ok(())
    }

    // --- Links and markup ---

    pub fn permalink(&self) -> Result<String> {
        self.require_server("permalink")?;
        Ok(self.session.permalink(&self.id))
    }

    pub fn embed_link(&self) -> Result<String> {
        self.require_server("embed link")?;
        Ok(self
            .session
            .with_host_query(&format!("{}/embed", self.session.permalink(&self.id))))
    }

    /// Embeddable HTML: the server's embed page, or the current local document.
    pub fn html(&self) -> Result<String> {
        self.backend.html(&self.session, &self.id)
    }

    /// Deletes the visualization on the server.
    pub fn delete(&self) -> Result<()> {
        self.backend.delete(&self.session, &self.id)
    }

    fn require_server(&self, what: &str) -> Result<()> {
        if self.backend.is_local() {
            return Err(VizError::config(format!(
                "local visualizations have no {what}"
            )));
        }
        Ok(())
    }

    // --- Interaction state ---

    /// Everything the user has set on the visualization.
    pub fn settings(&self) -> Result<Value> {
        self.backend.settings(&self.session, &self.id)
    }

    /// Indices of the brushed/selected points.
    pub fn selected(&self) -> Result<Vec<usize>> {
        self.require_interaction(Interaction::Selection, "selected")?;
        let settings = self.settings()?;
        let Some(selected) = settings.get("selected") else {
            return Ok(Vec::new());
        };
        let Value::Array(items) = selected else {
            return Err(VizError::shape(format!(
                "selection must be a list of indices, got {selected}"
            )));
        };
        items
            .iter()
            .map(|item| {
                item.as_u64().map(|i| i as usize).ok_or_else(|| {
                    VizError::range(format!("selected index must be non-negative, got {item}"))
                })
            })
            .collect()
    }

    /// Polygons drawn on the visualization, as `(x, y)` pairs.
    pub fn coords(&self) -> Result<Vec<Polygon>> {
        self.require_interaction(Interaction::Polygons, "coords")?;
        let settings = self.settings()?;
        match settings.get("coords") {
            None | Some(Value::Null) => {
                warn!("no polygons drawn on visualization {}", self.id);
                Ok(Vec::new())
            }
            Some(Value::Array(items)) if items.is_empty() => Ok(Vec::new()),
            Some(coords) => check_coordinates(&Data::try_from(coords.clone())?, true),
        }
    }

    /// Integer points inside each drawn polygon, as `[row, col(, z)]`.
    pub fn polygon_points(&self, z: Option<i64>) -> Result<Vec<Vec<Vec<i64>>>> {
        self.coords()?
            .iter()
            .map(|polygon| polygon_to_points(polygon, z))
            .collect()
    }

    /// One binary mask of shape `dims` per drawn polygon.
    pub fn masks(&self, dims: &[usize], z: Option<usize>) -> Result<Vec<Mask>> {
        let polygons = self.coords()?;
        debug!("rasterising {} polygons into {dims:?}", polygons.len());
        polygons
            .iter()
            .map(|polygon| polygon_to_mask(polygon, dims, z))
            .collect()
    }

    fn require_interaction(&self, wanted: Interaction, accessor: &str) -> Result<()> {
        if self.plot_type.interaction != wanted {
            return Err(VizError::config(format!(
                "{accessor} is not available on {} visualizations",
                self.type_name
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for Visualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visualization")
            .field("id", &self.id)
            .field("type", &self.type_name)
            .field("session", &self.session.session_id)
            .field("local", &self.backend.is_local())
            .finish()
    }
}
