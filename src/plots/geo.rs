// src/plots/geo.rs

//! Choropleth maps over US states or world countries.

use super::{apply_colormap, Interaction, Plot, PlotType, SIZE_OPTIONS};
use crate::convert::{list_to_regions, Regions};
use crate::data::Data;
use crate::error::{Result, VizError};
use crate::payload::Payload;
use crate::validate::check_1d;

pub static MAP: PlotType = PlotType {
    name: "map",
    func: None,
    options: &SIZE_OPTIONS,
    interaction: Interaction::None,
    open_options: false,
};

/// One value per region. Two-letter codes select the US map, three-letter
/// codes the world map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    pub regions: Regions,
    pub values: Data,
    pub colormap: Option<String>,
}

impl Map {
    pub fn new(regions: impl Into<Regions>, values: impl Into<Data>) -> Self {
        Map {
            regions: regions.into(),
            values: values.into(),
            colormap: None,
        }
    }

    pub fn colormap(mut self, name: impl Into<String>) -> Self {
        self.colormap = Some(name.into());
        self
    }
}

impl Plot for Map {
    fn plot_type(&self) -> &'static PlotType {
        &MAP
    }

    fn clean(&self) -> Result<Payload> {
        let regions = list_to_regions(&self.regions)?;
        let values = check_1d(&self.values, "values")?;
        if values.len() != regions.len() {
            return Err(VizError::length("regions and values", regions.len(), values.len()));
        }
        let mut payload = Payload::new()
            .with("regions", &regions)?
            .with("values", &values)?;
        apply_colormap(&mut payload, self.colormap.as_deref())?;
        Ok(payload)
    }
}
