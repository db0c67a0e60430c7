// src/plots/mod.rs

//! Plot-type registry.
//!
//! Every plot kind is described by a static [`PlotType`] (its wire name, the
//! name of its entry point on [`crate::Lightning`], its declared display
//! options and the interaction state it exposes) and by a typed parameter
//! struct implementing [`Plot`], whose `clean` step turns caller input into a
//! [`Payload`]. The registry maps names to descriptors and is built once, on
//! first use.

use std::borrow::Cow;
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::data::{normalize_numbers, Data};
use crate::error::{Result, VizError};
use crate::payload::Payload;
use crate::validate::check_colormap;

pub mod basic;
pub mod geo;
pub mod images;
pub mod network;
pub mod three;

#[cfg(test)]
mod tests;

pub use basic::{Generic, Line, LineStacked, LineStreaming, Scatter, ScatterLine, ScatterStreaming};
pub use geo::Map as RegionMap;
pub use images::{Gallery, Image, ImagePoly, Volume};
pub use network::{Adjacency, Force, Graph, GraphBundled, Matrix};
pub use three::Particles;

// --- Descriptors ---

/// A display option value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    Text(Cow<'static, str>),
}

impl OptionValue {
    fn same_kind(&self, other: &OptionValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Number(v)
    }
}

impl From<u32> for OptionValue {
    fn from(v: u32) -> Self {
        OptionValue::Number(v as f64)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::Text(Cow::Owned(v.to_string()))
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::Text(Cow::Owned(v))
    }
}

/// One declared display option. Options without a default are accepted
/// but only sent when the caller sets them.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionDecl {
    pub name: &'static str,
    pub default: Option<OptionValue>,
}

const fn flag(name: &'static str, default: bool) -> OptionDecl {
    OptionDecl {
        name,
        default: Some(OptionValue::Bool(default)),
    }
}

const fn unset(name: &'static str) -> OptionDecl {
    OptionDecl {
        name,
        default: None,
    }
}

/// Pixel dimensions, accepted by every plot type.
pub(crate) const WIDTH: OptionDecl = unset("width");
pub(crate) const HEIGHT: OptionDecl = unset("height");

pub(crate) static INTERACTIVE_OPTIONS: [OptionDecl; 5] = [
    flag("tooltips", true),
    flag("zoom", true),
    flag("brush", true),
    WIDTH,
    HEIGHT,
];

pub(crate) static ZOOM_OPTIONS: [OptionDecl; 3] = [flag("zoom", true), WIDTH, HEIGHT];

pub(crate) static SIZE_OPTIONS: [OptionDecl; 2] = [WIDTH, HEIGHT];

/// Interaction state a plot type stores server-side and exposes through
/// [`crate::Visualization`] accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    None,
    /// Brushed / selected point indices (`selected`).
    Selection,
    /// Polygons drawn over an image (`coords`, `polygon_points`, `masks`).
    Polygons,
}

/// Static description of one plot kind.
#[derive(Debug)]
pub struct PlotType {
    /// Name sent to the server as `type`.
    pub name: &'static str,
    /// Entry-point name when it differs from `name` (e.g. `linestacked`).
    pub func: Option<&'static str>,
    pub options: &'static [OptionDecl],
    pub interaction: Interaction,
    /// Accept options that are not declared (the generic plot).
    pub open_options: bool,
}

impl PlotType {
    /// Name of the operation exposed on the client.
    pub fn entry_name(&self) -> &'static str {
        self.func.unwrap_or(self.name)
    }

    pub fn option(&self, name: &str) -> Option<&'static OptionDecl> {
        self.options.iter().find(|decl| decl.name == name)
    }
}

static ALL: [&PlotType; 18] = [
    &basic::GENERIC,
    &basic::SCATTER,
    &basic::SCATTER_STREAMING,
    &basic::LINE,
    &basic::LINE_STREAMING,
    &basic::LINE_STACKED,
    &basic::SCATTER_LINE,
    &network::MATRIX,
    &network::ADJACENCY,
    &network::FORCE,
    &network::GRAPH,
    &network::GRAPH_BUNDLED,
    &geo::MAP,
    &three::PARTICLES,
    &images::IMAGE,
    &images::GALLERY,
    &images::VOLUME,
    &images::IMAGE_POLY,
];

/// Name (and entry-point name) to descriptor.
pub static REGISTRY: Lazy<BTreeMap<&'static str, &'static PlotType>> = Lazy::new(|| {
    let mut map = BTreeMap::new();
    for ty in ALL {
        map.insert(ty.name, ty);
        if let Some(func) = ty.func {
            map.insert(func, ty);
        }
    }
    map
});

/// Looks a plot type up by wire name or entry-point name.
pub fn lookup(name: &str) -> Option<&'static PlotType> {
    REGISTRY.get(name).copied()
}

/// All registered descriptors, in registration order.
pub fn registered() -> impl Iterator<Item = &'static PlotType> {
    ALL.iter().copied()
}

// --- Display options supplied per call ---

/// Display options for one plotting call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    description: Option<String>,
    values: BTreeMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free text shown alongside the visualization.
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn set(mut self, name: &str, value: impl Into<OptionValue>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn width(self, px: u32) -> Self {
        self.set("width", px)
    }

    pub fn height(self, px: u32) -> Self {
        self.set("height", px)
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Declared defaults for `ty`, overridden by the values set here.
    ///
    /// Undeclared names and values of the wrong kind are configuration
    /// errors, except on plot types with open options.
    pub fn resolve(&self, ty: &PlotType) -> Result<Map<String, Value>> {
        let mut resolved = Map::new();
        for decl in ty.options {
            if let Some(default) = &decl.default {
                resolved.insert(
                    decl.name.to_string(),
                    normalize_numbers(serde_json::to_value(default)?),
                );
            }
        }
        for (name, value) in &self.values {
            match ty.option(name) {
                Some(OptionDecl {
                    default: Some(default),
                    ..
                }) if !default.same_kind(value) => {
                    return Err(VizError::config(format!(
                        "option '{name}' of plot type '{}' expects a value like {default:?}, got {value:?}",
                        ty.name
                    )));
                }
                Some(_) => {}
                None if ty.open_options => {}
                None => {
                    let known: Vec<&str> = ty.options.iter().map(|d| d.name).collect();
                    return Err(VizError::config(format!(
                        "plot type '{}' has no option '{name}' (declared: {})",
                        ty.name,
                        known.join(", ")
                    )));
                }
            }
            resolved.insert(name.clone(), normalize_numbers(serde_json::to_value(value)?));
        }
        Ok(resolved)
    }
}

// --- Plot trait ---

/// A typed set of plotting parameters for one plot type.
pub trait Plot {
    fn plot_type(&self) -> &'static PlotType;

    /// Name sent to the server; the descriptor's name unless overridden.
    fn type_name(&self) -> &str {
        self.plot_type().name
    }

    /// Validates and converts the parameters into a payload.
    fn clean(&self) -> Result<Payload>;
}

// --- Shared decorative properties ---

/// Per-point decoration shared by the point-like plot types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    /// One RGB triple, or one per point.
    pub color: Option<Data>,
    /// Integer group labels, colored categorically.
    pub group: Option<Data>,
    /// Continuous values, colored through `colormap`.
    pub values: Option<Data>,
    pub colormap: Option<String>,
    pub size: Option<Data>,
    pub alpha: Option<Data>,
}

impl Style {
    pub(crate) fn apply(&self, payload: &mut Payload) -> Result<()> {
        payload.add_property("color", self.color.as_ref())?;
        payload.add_property("group", self.group.as_ref())?;
        payload.add_property("values", self.values.as_ref())?;
        payload.add_property("size", self.size.as_ref())?;
        payload.add_property("alpha", self.alpha.as_ref())?;
        apply_colormap(payload, self.colormap.as_deref())
    }
}

pub(crate) fn apply_colormap(payload: &mut Payload, colormap: Option<&str>) -> Result<()> {
    if let Some(name) = colormap {
        let cmap = check_colormap(name)?;
        payload.add_text("colormap", Some(cmap.name()));
    }
    Ok(())
}

/// Builder setters for `Option<Data>` fields, directly or inside `style`.
macro_rules! data_setters {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $ty {
            $(
                pub fn $field(mut self, value: impl Into<$crate::data::Data>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }
    };
}

macro_rules! style_setters {
    ($ty:ident) => {
        impl $ty {
            pub fn color(mut self, value: impl Into<$crate::data::Data>) -> Self {
                self.style.color = Some(value.into());
                self
            }

            pub fn group(mut self, value: impl Into<$crate::data::Data>) -> Self {
                self.style.group = Some(value.into());
                self
            }

            pub fn values(mut self, value: impl Into<$crate::data::Data>) -> Self {
                self.style.values = Some(value.into());
                self
            }

            pub fn colormap(mut self, name: impl Into<String>) -> Self {
                self.style.colormap = Some(name.into());
                self
            }

            pub fn size(mut self, value: impl Into<$crate::data::Data>) -> Self {
                self.style.size = Some(value.into());
                self
            }

            pub fn alpha(mut self, value: impl Into<$crate::data::Data>) -> Self {
                self.style.alpha = Some(value.into());
                self
            }
        }
    };
}

pub(crate) use data_setters;
pub(crate) use style_setters;
