// src/plots/network.rs

//! Connectivity plots: dense matrices, adjacency, force-directed and
//! positioned graphs.

use super::{
    apply_colormap, data_setters, flag, style_setters, Interaction, OptionDecl, Plot, PlotType,
    Style, HEIGHT, INTERACTIVE_OPTIONS, SIZE_OPTIONS, WIDTH,
};
use crate::convert::{array_to_im, mat_to_array, parse_links, vecs_to_points, Connectivity};
use crate::data::Data;
use crate::error::Result;
use crate::payload::Payload;

static MATRIX_OPTIONS: [OptionDecl; 3] = [flag("numbers", false), WIDTH, HEIGHT];

pub static MATRIX: PlotType = PlotType {
    name: "matrix",
    func: None,
    options: &MATRIX_OPTIONS,
    interaction: Interaction::None,
    open_options: false,
};

pub static ADJACENCY: PlotType = PlotType {
    name: "adjacency",
    func: None,
    options: &SIZE_OPTIONS,
    interaction: Interaction::None,
    open_options: false,
};

pub static FORCE: PlotType = PlotType {
    name: "force",
    func: None,
    options: &INTERACTIVE_OPTIONS,
    interaction: Interaction::Selection,
    open_options: false,
};

pub static GRAPH: PlotType = PlotType {
    name: "graph",
    func: None,
    options: &INTERACTIVE_OPTIONS,
    interaction: Interaction::Selection,
    open_options: false,
};

pub static GRAPH_BUNDLED: PlotType = PlotType {
    name: "graph-bundled",
    func: Some("graphbundled"),
    options: &INTERACTIVE_OPTIONS,
    interaction: Interaction::Selection,
    open_options: false,
};

/// Node indices `0..n`, the node list of plots without positions.
fn node_indices(conn: &Connectivity) -> Vec<usize> {
    (0..conn.node_count).collect()
}

// --- Matrix ---

/// A dense matrix drawn as a heat map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matrix {
    pub matrix: Data,
    pub colormap: Option<String>,
    pub row_labels: Option<Vec<String>>,
    pub column_labels: Option<Vec<String>>,
}

impl Matrix {
    pub fn new(matrix: impl Into<Data>) -> Self {
        Matrix {
            matrix: matrix.into(),
            ..Default::default()
        }
    }

    pub fn colormap(mut self, name: impl Into<String>) -> Self {
        self.colormap = Some(name.into());
        self
    }

    pub fn labels(mut self, rows: Vec<String>, columns: Vec<String>) -> Self {
        self.row_labels = Some(rows);
        self.column_labels = Some(columns);
        self
    }
}

impl Plot for Matrix {
    fn plot_type(&self) -> &'static PlotType {
        &MATRIX
    }

    fn clean(&self) -> Result<Payload> {
        let mut payload = Payload::new().with("matrix", &mat_to_array(&self.matrix)?)?;
        apply_colormap(&mut payload, self.colormap.as_deref())?;
        if let Some(rows) = &self.row_labels {
            payload.insert("rowLabels", rows)?;
        }
        if let Some(columns) = &self.column_labels {
            payload.insert("columnLabels", columns)?;
        }
        Ok(payload)
    }
}

// --- Adjacency ---

/// Connectivity drawn as an ordered adjacency matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Adjacency {
    pub conn: Data,
    pub group: Option<Data>,
    pub labels: Option<Vec<String>>,
}

impl Adjacency {
    pub fn new(conn: impl Into<Data>) -> Self {
        Adjacency {
            conn: conn.into(),
            ..Default::default()
        }
    }

    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }
}

data_setters!(Adjacency { group });

impl Plot for Adjacency {
    fn plot_type(&self) -> &'static PlotType {
        &ADJACENCY
    }

    fn clean(&self) -> Result<Payload> {
        let conn = parse_links(&self.conn)?;
        let mut payload = Payload::new()
            .with("links", &conn.links)?
            .with("nodes", &node_indices(&conn))?;
        payload.add_property("group", self.group.as_ref())?;
        if let Some(labels) = &self.labels {
            payload.insert("labels", labels)?;
        }
        Ok(payload)
    }
}

// --- Force ---

/// Force-directed network layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Force {
    pub conn: Data,
    pub style: Style,
}

impl Force {
    pub fn new(conn: impl Into<Data>) -> Self {
        Force {
            conn: conn.into(),
            ..Default::default()
        }
    }
}

style_setters!(Force);

impl Plot for Force {
    fn plot_type(&self) -> &'static PlotType {
        &FORCE
    }

    fn clean(&self) -> Result<Payload> {
        let conn = parse_links(&self.conn)?;
        let mut payload = Payload::new()
            .with("links", &conn.links)?
            .with("nodes", &node_indices(&conn))?;
        self.style.apply(&mut payload)?;
        Ok(payload)
    }
}

// --- Positioned graphs ---

/// Nodes at fixed positions, optionally over a background image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Positioned {
    pub x: Data,
    pub y: Data,
    pub conn: Data,
    pub style: Style,
    pub image: Option<Data>,
}

impl Positioned {
    fn clean(&self) -> Result<Payload> {
        let nodes = vecs_to_points(&self.x, &self.y)?;
        let conn = parse_links(&self.conn)?;
        conn.check_bounds(nodes.len())?;
        let mut payload = Payload::new()
            .with("links", &conn.links)?
            .with("nodes", &nodes)?;
        self.style.apply(&mut payload)?;
        if let Some(image) = &self.image {
            payload.push_image(array_to_im(image)?);
        }
        Ok(payload)
    }
}

macro_rules! graph_plot {
    ($(#[$doc:meta])* $ty:ident, $descriptor:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $ty(pub Positioned);

        impl $ty {
            pub fn new(x: impl Into<Data>, y: impl Into<Data>, conn: impl Into<Data>) -> Self {
                $ty(Positioned {
                    x: x.into(),
                    y: y.into(),
                    conn: conn.into(),
                    ..Default::default()
                })
            }

            /// Background image drawn beneath the nodes.
            pub fn image(mut self, image: impl Into<Data>) -> Self {
                self.0.image = Some(image.into());
                self
            }

            pub fn color(mut self, value: impl Into<Data>) -> Self {
                self.0.style.color = Some(value.into());
                self
            }

            pub fn group(mut self, value: impl Into<Data>) -> Self {
                self.0.style.group = Some(value.into());
                self
            }

            pub fn values(mut self, value: impl Into<Data>) -> Self {
                self.0.style.values = Some(value.into());
                self
            }

            pub fn colormap(mut self, name: impl Into<String>) -> Self {
                self.0.style.colormap = Some(name.into());
                self
            }

            pub fn size(mut self, value: impl Into<Data>) -> Self {
                self.0.style.size = Some(value.into());
                self
            }

            pub fn alpha(mut self, value: impl Into<Data>) -> Self {
                self.0.style.alpha = Some(value.into());
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

graph_plot!(
    /// Node-link graph with nodes at given positions.
    Graph,
    GRAPH
);
graph_plot!(
    /// Positioned graph with edge bundling.
    GraphBundled,
    GRAPH_BUNDLED
);
