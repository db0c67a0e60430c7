// src/plots/images.rs

//! Image plots. Every image is PNG-encoded during `clean`; the payload keeps
//! them in the order given, which is the display order for galleries and
//! the z-order for volumes.

use super::{Interaction, Plot, PlotType, SIZE_OPTIONS};
use crate::convert::array_to_im;
use crate::data::Data;
use crate::error::{Result, VizError};
use crate::payload::Payload;
use crate::validate::check_coordinates;

pub static IMAGE: PlotType = PlotType {
    name: "image",
    func: None,
    options: &SIZE_OPTIONS,
    interaction: Interaction::None,
    open_options: false,
};

pub static GALLERY: PlotType = PlotType {
    name: "gallery",
    func: None,
    options: &SIZE_OPTIONS,
    interaction: Interaction::None,
    open_options: false,
};

pub static VOLUME: PlotType = PlotType {
    name: "volume",
    func: None,
    options: &SIZE_OPTIONS,
    interaction: Interaction::None,
    open_options: false,
};

pub static IMAGE_POLY: PlotType = PlotType {
    name: "image-poly",
    func: Some("imagepoly"),
    options: &SIZE_OPTIONS,
    interaction: Interaction::Polygons,
    open_options: false,
};

fn encode_all(images: &[Data]) -> Result<Payload> {
    if images.is_empty() {
        return Err(VizError::shape("at least one image is required"));
    }
    let mut payload = Payload::new();
    for image in images {
        payload.push_image(array_to_im(image)?);
    }
    Ok(payload)
}

/// A single grayscale or color image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    pub image: Data,
}

impl Image {
    pub fn new(image: impl Into<Data>) -> Self {
        Image {
            image: image.into(),
        }
    }
}

impl Plot for Image {
    fn plot_type(&self) -> &'static PlotType {
        &IMAGE
    }

    fn clean(&self) -> Result<Payload> {
        encode_all(std::slice::from_ref(&self.image))
    }
}

/// Images browsed one at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gallery {
    pub images: Vec<Data>,
}

impl Gallery {
    pub fn new(images: Vec<Data>) -> Self {
        Gallery { images }
    }
}

impl Plot for Gallery {
    fn plot_type(&self) -> &'static PlotType {
        &GALLERY
    }

    fn clean(&self) -> Result<Payload> {
        encode_all(&self.images)
    }
}

/// A stack of planes, first image at z = 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Volume {
    pub images: Vec<Data>,
}

impl Volume {
    pub fn new(images: Vec<Data>) -> Self {
        Volume { images }
    }
}

impl Plot for Volume {
    fn plot_type(&self) -> &'static PlotType {
        &VOLUME
    }

    fn clean(&self) -> Result<Payload> {
        encode_all(&self.images)
    }
}

/// An image on which polygons can be drawn and read back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImagePoly {
    pub image: Data,
    /// Polygons to draw initially.
    pub coordinates: Option<Data>,
    /// Coordinates are already `(x, y)` rather than `(row, column)`.
    pub xy: bool,
}

impl ImagePoly {
    pub fn new(image: impl Into<Data>) -> Self {
        ImagePoly {
            image: image.into(),
            ..Default::default()
        }
    }

    pub fn coordinates(mut self, coordinates: impl Into<Data>, xy: bool) -> Self {
        self.coordinates = Some(coordinates.into());
        self.xy = xy;
        self
    }
}

impl Plot for ImagePoly {
    fn plot_type(&self) -> &'static PlotType {
        &IMAGE_POLY
    }

    fn clean(&self) -> Result<Payload> {
        let mut payload = encode_all(std::slice::from_ref(&self.image))?;
        if let Some(coordinates) = &self.coordinates {
            payload.insert("coordinates", &check_coordinates(coordinates, self.xy)?)?;
        }
        Ok(payload)
    }
}
