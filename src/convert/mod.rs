// src/convert/mod.rs

//! Shape converters.
//!
//! These turn raw array-like input into the canonical wire shapes: point
//! lists, line series, dense matrices, sparse link lists, region codes,
//! rasterised polygons and encoded images.

mod image;
mod links;
mod polygon;

#[cfg(test)]
mod tests;

pub use image::array_to_im;
pub use links::{mat_to_links, parse_links, Connectivity, Link, MAX_NODE_INDEX};
pub use polygon::{polygon_to_mask, polygon_to_points, Mask};

use crate::data::Data;
use crate::error::{Result, VizError};

/// Reads an input coordinate vector; scalars count as length one.
fn coordinate_vector(v: &Data, name: &str) -> Result<Vec<f64>> {
    let ndim = v.ndim()?;
    if ndim > 1 {
        return Err(VizError::shape(format!(
            "{name} must be one-dimensional, got {ndim} dimensions"
        )));
    }
    v.flatten()
}

/// Stacks two equal-length vectors into `(x, y)` points.
pub fn vecs_to_points(x: &Data, y: &Data) -> Result<Vec<[f64; 2]>> {
    let x = coordinate_vector(x, "x")?;
    let y = coordinate_vector(y, "y")?;
    if x.len() != y.len() {
        return Err(VizError::length("x and y vectors must be the same length", x.len(), y.len()));
    }
    Ok(x.into_iter().zip(y).map(|(x, y)| [x, y]).collect())
}

/// Stacks three equal-length vectors into `(x, y, z)` points.
pub fn vecs_to_points_three(x: &Data, y: &Data, z: &Data) -> Result<Vec<[f64; 3]>> {
    let x = coordinate_vector(x, "x")?;
    let y = coordinate_vector(y, "y")?;
    let z = coordinate_vector(z, "z")?;
    if x.len() != y.len() {
        return Err(VizError::length("x and y vectors must be the same length", x.len(), y.len()));
    }
    if x.len() != z.len() {
        return Err(VizError::length("x and z vectors must be the same length", x.len(), z.len()));
    }
    Ok(x.into_iter()
        .zip(y)
        .zip(z)
        .map(|((x, y), z)| [x, y, z])
        .collect())
}

/// Canonicalizes one series or a collection of series.
///
/// A flat list of numbers is a single series. A list of lists is a
/// collection, and the inner lists may differ in length: they are kept as
/// given, never padded or truncated.
pub fn array_to_lines(series: &Data) -> Result<Vec<Vec<f64>>> {
    let Data::Seq(items) = series else {
        return Err(VizError::shape("series must be a list of numbers or a list of lists"));
    };
    if items.iter().all(|item| matches!(item, Data::Scalar(_))) {
        return Ok(if items.is_empty() {
            Vec::new()
        } else {
            vec![series.flatten()?]
        });
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            if matches!(item, Data::Seq(_)) && item.ndim()? == 1 {
                item.flatten()
            } else {
                Err(VizError::shape(format!(
                    "series {i} must be a flat list of numbers"
                )))
            }
        })
        .collect()
}

/// A dense matrix payload (heat maps); rank must be exactly two.
pub fn mat_to_array(matrix: &Data) -> Result<Vec<Vec<f64>>> {
    matrix.to_rows("matrix")
}

// --- Regions ---

/// Region identifiers: two-letter US state codes or three-letter country codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Regions(pub Vec<String>);

impl From<&str> for Regions {
    fn from(code: &str) -> Self {
        Regions(vec![code.to_string()])
    }
}

impl From<String> for Regions {
    fn from(code: String) -> Self {
        Regions(vec![code])
    }
}

impl From<Vec<String>> for Regions {
    fn from(codes: Vec<String>) -> Self {
        Regions(codes)
    }
}

impl From<Vec<&str>> for Regions {
    fn from(codes: Vec<&str>) -> Self {
        Regions(codes.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Regions {
    fn from(codes: [&str; N]) -> Self {
        Regions(codes.into_iter().map(str::to_string).collect())
    }
}

/// Checks that every code has the same length class, all 2 or all 3 letters.
pub fn list_to_regions(regions: &Regions) -> Result<Vec<String>> {
    let codes = &regions.0;
    let all_len = |n: usize| codes.iter().all(|c| c.chars().count() == n);
    if !(all_len(2) || all_len(3)) {
        return Err(VizError::config(
            "all region names must be two letters (for US) or three letters (for world)",
        ));
    }
    Ok(codes.clone())
}
