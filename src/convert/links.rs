// src/convert/links.rs

//! Connectivity normalization: dense matrices and explicit edge lists both
//! end up as sparse `(source, target, weight)` links.

use log::debug;
use serde::ser::{Serialize, SerializeTuple, Serializer};

use crate::data::Data;
use crate::error::{Result, VizError};

/// One weighted, directed edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

impl Link {
    pub fn new(source: usize, target: usize, weight: f64) -> Self {
        Link {
            source,
            target,
            weight,
        }
    }
}

// Links travel as `[source, target, weight]` triples.
impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(3)?;
        tup.serialize_element(&self.source)?;
        tup.serialize_element(&self.target)?;
        tup.serialize_element(&self.weight)?;
        tup.end()
    }
}

/// Links plus the size of the node set they index into.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Connectivity {
    pub links: Vec<Link>,
    pub node_count: usize,
}

/// Sparsifies a dense matrix: one link per non-zero cell, row-major order.
pub fn mat_to_links(matrix: &Data) -> Result<Vec<Link>> {
    let rows = matrix.to_rows("connectivity matrix")?;
    let links: Vec<Link> = rows
        .iter()
        .enumerate()
        .flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, w)| **w != 0.0)
                .map(move |(j, w)| Link::new(i, j, *w))
        })
        .collect();
    debug!(
        "sparsified {}x{} matrix into {} links",
        rows.len(),
        rows.first().map_or(0, Vec::len),
        links.len()
    );
    Ok(links)
}

/// Normalizes either a square adjacency matrix or an explicit link list.
///
/// A square matrix is always read as adjacency, even when it happens to have
/// two or three columns. Otherwise each row is `[source, target]` (weight
/// defaults to 1) or `[source, target, weight]`.
pub fn parse_links(conn: &Data) -> Result<Connectivity> {
    let shape = conn.shape()?;
    match shape.as_slice() {
        [n, m] if n == m => Ok(Connectivity {
            links: mat_to_links(conn)?,
            node_count: *n,
        }),
        [_, cols @ (2 | 3)] => {
            let cols = *cols;
            let links = conn
                .to_rows("links")?
                .into_iter()
                .map(|row| {
                    let weight = if cols == 3 { row[2] } else { 1.0 };
                    Ok(Link::new(
                        link_index(row[0], "source")?,
                        link_index(row[1], "target")?,
                        weight,
                    ))
                })
                .collect::<Result<Vec<_>>>()?;
            let node_count = match links.iter().map(|l| l.source.max(l.target)).max() {
                Some(last) => last
                    .checked_add(1)
                    .ok_or_else(|| VizError::range("link index overflows the node count"))?,
                None => 0,
            };
            Ok(Connectivity { links, node_count })
        }
        [_, cols] => Err(VizError::shape(format!(
            "too many entries per link, must be 2 or 3, got {cols}"
        ))),
        other => Err(VizError::shape(format!(
            "connectivity must be a square matrix or a list of links, got shape {other:?}"
        ))),
    }
}

/// Largest node index a link may name. Node lists are materialized, so this
/// also bounds their allocation.
pub const MAX_NODE_INDEX: usize = (1 << 24) - 1;

fn link_index(v: f64, role: &str) -> Result<usize> {
    if v < 0.0 || v.fract() != 0.0 || !v.is_finite() {
        return Err(VizError::range(format!(
            "link {role} must be a non-negative integer index, got {v}"
        )));
    }
    if v > MAX_NODE_INDEX as f64 {
        return Err(VizError::range(format!(
            "link {role} index {v} exceeds the largest node index {MAX_NODE_INDEX}"
        )));
    }
    Ok(v as usize)
}

impl Connectivity {
    /// Fails if any link points outside a node set of size `nodes`.
    pub fn check_bounds(&self, nodes: usize) -> Result<()> {
        match self
            .links
            .iter()
            .find(|l| l.source >= nodes || l.target >= nodes)
        {
            Some(bad) => Err(VizError::range(format!(
                "link ({}, {}) references a node outside 0..{nodes}",
                bad.source, bad.target
            ))),
            None => Ok(()),
        }
    }
}
