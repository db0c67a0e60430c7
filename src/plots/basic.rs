// src/plots/basic.rs

//! Scatter and line plots, plus the generic pass-through plot.

use super::{
    style_setters, Interaction, Plot, PlotType, Style, INTERACTIVE_OPTIONS, SIZE_OPTIONS,
    ZOOM_OPTIONS,
};
use crate::convert::{array_to_lines, vecs_to_points};
use crate::data::Data;
use crate::error::{Result, VizError};
use crate::payload::{ensure_dict_or_list, Payload, DATA_KEY};

pub static GENERIC: PlotType = PlotType {
    name: "generic",
    func: Some("plot"),
    options: &SIZE_OPTIONS,
    interaction: Interaction::None,
    open_options: true,
};

pub static SCATTER: PlotType = PlotType {
    name: "scatter",
    func: None,
    options: &INTERACTIVE_OPTIONS,
    interaction: Interaction::Selection,
    open_options: false,
};

pub static SCATTER_STREAMING: PlotType = PlotType {
    name: "scatter-streaming",
    func: Some("scatterstreaming"),
    options: &ZOOM_OPTIONS,
    interaction: Interaction::None,
    open_options: false,
};

pub static LINE: PlotType = PlotType {
    name: "line",
    func: None,
    options: &ZOOM_OPTIONS,
    interaction: Interaction::None,
    open_options: false,
};

pub static LINE_STREAMING: PlotType = PlotType {
    name: "line-streaming",
    func: Some("linestreaming"),
    options: &ZOOM_OPTIONS,
    interaction: Interaction::None,
    open_options: false,
};

pub static LINE_STACKED: PlotType = PlotType {
    name: "line-stacked",
    func: Some("linestacked"),
    options: &ZOOM_OPTIONS,
    interaction: Interaction::None,
    open_options: false,
};

pub static SCATTER_LINE: PlotType = PlotType {
    name: "scatter-line",
    func: Some("scatterline"),
    options: &INTERACTIVE_OPTIONS,
    interaction: Interaction::Selection,
    open_options: false,
};

// --- Generic ---

/// A caller-built payload for any server-side plot type.
///
/// `data` is sent as-is (after checking it is a list or mapping) and skips
/// every per-field validator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generic {
    pub type_name: String,
    pub data: Data,
}

impl Generic {
    pub fn new(type_name: impl Into<String>, data: impl Into<Data>) -> Self {
        Generic {
            type_name: type_name.into(),
            data: data.into(),
        }
    }
}

impl Plot for Generic {
    fn plot_type(&self) -> &'static PlotType {
        &GENERIC
    }

    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn clean(&self) -> Result<Payload> {
        if self.type_name.trim().is_empty() {
            return Err(VizError::config("must provide a plot type"));
        }
        Payload::new().with(DATA_KEY, &ensure_dict_or_list(&self.data)?)
    }
}

// --- Scatter ---

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scatter {
    pub x: Data,
    pub y: Data,
    pub style: Style,
    pub xaxis: Option<String>,
    pub yaxis: Option<String>,
}

impl Scatter {
    pub fn new(x: impl Into<Data>, y: impl Into<Data>) -> Self {
        Scatter {
            x: x.into(),
            y: y.into(),
            ..Default::default()
        }
    }

    pub fn axes(mut self, xaxis: impl Into<String>, yaxis: impl Into<String>) -> Self {
        self.xaxis = Some(xaxis.into());
        self.yaxis = Some(yaxis.into());
        self
    }
}

style_setters!(Scatter);

impl Plot for Scatter {
    fn plot_type(&self) -> &'static PlotType {
        &SCATTER
    }

    fn clean(&self) -> Result<Payload> {
        let mut payload = Payload::new().with("points", &vecs_to_points(&self.x, &self.y)?)?;
        self.style.apply(&mut payload)?;
        payload.add_text("xaxis", self.xaxis.as_deref());
        payload.add_text("yaxis", self.yaxis.as_deref());
        Ok(payload)
    }
}

/// Streaming scatter: plot once, then `append` batches of points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterStreaming {
    pub x: Data,
    pub y: Data,
    pub style: Style,
}

impl ScatterStreaming {
    pub fn new(x: impl Into<Data>, y: impl Into<Data>) -> Self {
        ScatterStreaming {
            x: x.into(),
            y: y.into(),
            ..Default::default()
        }
    }
}

style_setters!(ScatterStreaming);

impl Plot for ScatterStreaming {
    fn plot_type(&self) -> &'static PlotType {
        &SCATTER_STREAMING
    }

    fn clean(&self) -> Result<Payload> {
        let mut payload = Payload::new().with("points", &vecs_to_points(&self.x, &self.y)?)?;
        self.style.apply(&mut payload)?;
        Ok(payload)
    }
}

// --- Lines ---

/// Series shared by the three line plot flavours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    /// One series, or a list of series (lengths may differ).
    pub series: Data,
    pub color: Option<Data>,
    pub group: Option<Data>,
    pub thickness: Option<Data>,
    /// Shared x positions for the samples.
    pub index: Option<Data>,
    pub xaxis: Option<String>,
    pub yaxis: Option<String>,
}

impl Series {
    fn clean(&self) -> Result<Payload> {
        let mut payload = Payload::new().with("series", &array_to_lines(&self.series)?)?;
        payload.add_property("color", self.color.as_ref())?;
        payload.add_property("group", self.group.as_ref())?;
        payload.add_property("thickness", self.thickness.as_ref())?;
        payload.add_property("index", self.index.as_ref())?;
        payload.add_text("xaxis", self.xaxis.as_deref());
        payload.add_text("yaxis", self.yaxis.as_deref());
        Ok(payload)
    }
}

macro_rules! line_plot {
    ($(#[$doc:meta])* $ty:ident, $descriptor:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $ty(pub Series);

        impl $ty {
            pub fn new(series: impl Into<Data>) -> Self {
                $ty(Series {
                    series: series.into(),
                    ..Default::default()
                })
            }

            pub fn color(mut self, value: impl Into<Data>) -> Self {
                self.0.color = Some(value.into());
                self
            }

            pub fn group(mut self, value: impl Into<Data>) -> Self {
                self.0.group = Some(value.into());
                self
            }

            pub fn thickness(mut self, value: impl Into<Data>) -> Self {
                self.0.thickness = Some(value.into());
                self
            }

            pub fn index(mut self, value: impl Into<Data>) -> Self {
                self.0.index = Some(value.into());
                self
            }

            pub fn axes(mut self, xaxis: impl Into<String>, yaxis: impl Into<String>) -> Self {
                self.0.xaxis = Some(xaxis.into());
                self.0.yaxis = Some(yaxis.into());
                self
            }
        }

        impl Plot for $ty {
            fn plot_type(&self) -> &'static PlotType {
                &$descriptor
            }

            fn clean(&self) -> Result<Payload> {
                self.0.clean()
            }
        }
    };
}

line_plot!(
    /// One or more line series.
    Line,
    LINE
);
line_plot!(
    /// Line plot that grows as data is appended.
    LineStreaming,
    LINE_STREAMING
);
line_plot!(
    /// Series drawn as stacked, separately scaled lines.
    LineStacked,
    LINE_STACKED
);

// --- Scatter + line ---

/// A scatter plot where each point is linked to a line series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterLine {
    pub x: Data,
    pub y: Data,
    pub series: Data,
    pub style: Style,
}

impl ScatterLine {
    pub fn new(x: impl Into<Data>, y: impl Into<Data>, series: impl Into<Data>) -> Self {
        ScatterLine {
            x: x.into(),
            y: y.into(),
            series: series.into(),
            ..Default::default()
        }
    }
}

style_setters!(ScatterLine);

impl Plot for ScatterLine {
    fn plot_type(&self) -> &'static PlotType {
        &SCATTER_LINE
    }

    fn clean(&self) -> Result<Payload> {
        let mut payload = Payload::new()
            .with("points", &vecs_to_points(&self.x, &self.y)?)?
            .with("series", &array_to_lines(&self.series)?)?;
        self.style.apply(&mut payload)?;
        Ok(payload)
    }
}
