// src/convert/polygon.rs

//! Polygon rasterisation for drawn regions of interest.
//!
//! Vertices are `(x, y)` pairs, `x` running along columns and `y` along
//! rows. They are rounded to the integer grid before testing. Membership
//! uses the even-odd crossing rule, so left/bottom edges count as inside
//! and right/top edges do not.

use crate::error::{Result, VizError};

/// A binary occupancy grid stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    dims: Vec<usize>,
    data: Vec<u8>,
}

impl Mask {
    fn zeros(dims: Vec<usize>) -> Self {
        let len = dims.iter().product();
        Mask {
            dims,
            data: vec![0; len],
        }
    }

    fn offset(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.dims.len() {
            return None;
        }
        index
            .iter()
            .zip(&self.dims)
            .try_fold(0usize, |acc, (&i, &d)| (i < d).then_some(acc * d + i))
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Cell value at `index` (one coordinate per dimension).
    pub fn get(&self, index: &[usize]) -> Option<u8> {
        self.offset(index).map(|o| self.data[o])
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|v| **v != 0).count()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

fn rounded(coords: &[[f64; 2]]) -> Result<Vec<[f64; 2]>> {
    if coords.is_empty() {
        return Err(VizError::shape("polygon must have at least one vertex"));
    }
    Ok(coords.iter().map(|[x, y]| [x.round(), y.round()]).collect())
}

/// Even-odd point-in-polygon test.
fn contains(polygon: &[[f64; 2]], x: f64, y: f64) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let [xi, yi] = polygon[i];
        let [xj, yj] = polygon[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Rasterises `coords` into a mask of shape `dims[0..2]` (rows, columns).
///
/// With `z`, `dims` must have a third dimension and the 2-D mask is embedded
/// at plane `z` of an otherwise empty volume.
pub fn polygon_to_mask(coords: &[[f64; 2]], dims: &[usize], z: Option<usize>) -> Result<Mask> {
    let polygon = rounded(coords)?;
    if dims.len() < 2 || dims.len() > 3 {
        return Err(VizError::shape(format!(
            "mask dims must have two or three dimensions, got {}",
            dims.len()
        )));
    }
    let (rows, cols) = (dims[0], dims[1]);

    let mut mask = match z {
        None => Mask::zeros(vec![rows, cols]),
        Some(_) if dims.len() < 3 => {
            return Err(VizError::shape(
                "dims must have three dimensions for embedding a z-index",
            ))
        }
        Some(z) if z >= dims[2] => {
            return Err(VizError::range(format!(
                "z-index {z} exceeds third dimension {}",
                dims[2]
            )))
        }
        Some(_) => Mask::zeros(dims.to_vec()),
    };

    for r in 0..rows {
        for c in 0..cols {
            if !contains(&polygon, c as f64, r as f64) {
                continue;
            }
            let offset = match z {
                Some(z) => (r * cols + c) * dims[2] + z,
                None => r * cols + c,
            };
            mask.data[offset] = 1;
        }
    }
    Ok(mask)
}

/// Lists the integer grid points inside `coords` as `[row, col]` (or
/// `[row, col, z]`), scanning the polygon's bounding box row by row.
pub fn polygon_to_points(coords: &[[f64; 2]], z: Option<i64>) -> Result<Vec<Vec<i64>>> {
    let polygon = rounded(coords)?;
    let (mut xmin, mut ymin) = (f64::INFINITY, f64::INFINITY);
    let (mut xmax, mut ymax) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for [x, y] in &polygon {
        xmin = xmin.min(*x);
        xmax = xmax.max(*x);
        ymin = ymin.min(*y);
        ymax = ymax.max(*y);
    }

    let mut points = Vec::new();
    for y in (ymin as i64)..=(ymax as i64) {
        for x in (xmin as i64)..=(xmax as i64) {
            if contains(&polygon, x as f64, y as f64) {
                let mut p = vec![y, x];
                p.extend(z);
                points.push(p);
            }
        }
    }
    Ok(points)
}
