// src/plots/three.rs

//! Three-dimensional point clouds.

use super::{style_setters, Interaction, Plot, PlotType, Style, SIZE_OPTIONS};
use crate::convert::vecs_to_points_three;
use crate::data::Data;
use crate::error::Result;
use crate::payload::Payload;

pub static PARTICLES: PlotType = PlotType {
    name: "particles",
    func: None,
    options: &SIZE_OPTIONS,
    interaction: Interaction::None,
    open_options: false,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Particles {
    pub x: Data,
    pub y: Data,
    pub z: Data,
    pub style: Style,
}

impl Particles {
    pub fn new(x: impl Into<Data>, y: impl Into<Data>, z: impl Into<Data>) -> Self {
        Particles {
            x: x.into(),
            y: y.into(),
            z: z.into(),
            ..Default::default()
        }
    }
}

style_setters!(Particles);

impl Plot for Particles {
    fn plot_type(&self) -> &'static PlotType {
        &PARTICLES
    }

    fn clean(&self) -> Result<Payload> {
        let points = vecs_to_points_three(&self.x, &self.y, &self.z)?;
        let mut payload = Payload::new().with("points", &points)?;
        self.style.apply(&mut payload)?;
        Ok(payload)
    }
}
