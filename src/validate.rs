// src/validate.rs

//! Property validators.
//!
//! Each validator takes the loosely-typed value supplied for one named
//! property and either returns its canonical form or fails. They are pure:
//! no I/O, no shared state.

use std::fmt;
use std::str::FromStr;

use crate::data::Data;
use crate::error::{Result, VizError};

/// One polygon as a list of coordinate pairs.
pub type Polygon = Vec<[f64; 2]>;

/// Flattens a scalar-or-vector property into a rank-1 vector.
///
/// A single value (`3`, `[3]`, `[[3]]`) is broadcast to a one-element
/// vector. Anything with two or more dimensions and more than one element
/// is rejected.
pub fn check_1d(value: &Data, name: &str) -> Result<Vec<f64>> {
    let shape = value.shape()?;
    let size: usize = shape.iter().product();
    if size == 1 || shape.len() <= 1 {
        return value.flatten();
    }
    Err(VizError::shape(format!(
        "property {name} must be one-dimensional, got shape {shape:?}"
    )))
}

/// Canonicalizes a color spec to a list of RGB triples.
///
/// Accepts a single `[r, g, b]` (broadcast to one row) or a list of triples.
pub fn check_color(value: &Data) -> Result<Vec<[f64; 3]>> {
    let shape = value.shape()?;
    let rows = match shape.as_slice() {
        [3] => vec![value.flatten()?],
        [_, 3] => value.to_rows("color")?,
        [n] => {
            return Err(VizError::shape(format!(
                "color must have three values per point, got {n}"
            )))
        }
        [_, n] => {
            return Err(VizError::shape(format!(
                "color array must have three values per point, got {n}"
            )))
        }
        other => {
            return Err(VizError::shape(format!(
                "color must be a triple or a list of triples, got shape {other:?}"
            )))
        }
    };
    Ok(rows.into_iter().map(|r| [r[0], r[1], r[2]]).collect())
}

/// Point or line sizes; every entry must be strictly positive.
pub fn check_size(value: &Data) -> Result<Vec<f64>> {
    check_positive(check_1d(value, "size")?, "size")
}

/// Opacities; every entry must be strictly positive.
pub fn check_alpha(value: &Data) -> Result<Vec<f64>> {
    check_positive(check_1d(value, "alpha")?, "alpha")
}

fn check_positive(values: Vec<f64>, name: &str) -> Result<Vec<f64>> {
    // `!(v > 0.0)` also rejects NaN.
    if let Some(bad) = values.iter().find(|v| !(**v > 0.0)) {
        return Err(VizError::range(format!(
            "{name} cannot be 0 or negative (found {bad})"
        )));
    }
    Ok(values)
}

/// An index vector: exactly one dimension, at least one entry.
pub fn check_index(value: &Data) -> Result<Vec<f64>> {
    let shape = value.shape()?;
    match shape.as_slice() {
        [n] if *n > 0 => value.flatten(),
        _ => Err(VizError::shape(format!(
            "index must be one-dimensional and non-empty, got shape {shape:?}"
        ))),
    }
}

/// Normalizes one polygon or a list of polygons to a list of polygons.
///
/// Coordinates arrive as `(row, column)` pairs unless `xy` is set, in which
/// case they are already `(x, y)`. Pairs given in row/column order are
/// reversed so the result is always `(x, y)`.
pub fn check_coordinates(value: &Data, xy: bool) -> Result<Vec<Polygon>> {
    let Data::Seq(items) = value else {
        return Err(VizError::shape("coordinates must be a list of pairs"));
    };
    let nested = matches!(
        items.first(),
        Some(Data::Seq(inner)) if matches!(inner.first(), Some(Data::Seq(_)))
    );
    let polygons: Vec<&Data> = if nested {
        items.iter().collect()
    } else {
        vec![value]
    };

    polygons
        .into_iter()
        .map(|polygon| {
            let rows = polygon.to_rows("coordinates")?;
            rows.into_iter()
                .map(|pair| match pair.as_slice() {
                    [a, b] if xy => Ok([*a, *b]),
                    [a, b] => Ok([*b, *a]),
                    _ => Err(VizError::shape(format!(
                        "coordinates must be pairs, got {} values",
                        pair.len()
                    ))),
                })
                .collect()
        })
        .collect()
}

// --- Colormaps ---

/// Palette names understood by the server (the ColorBrewer set).
pub const COLORMAPS: [&str; 35] = [
    "BrBG", "PiYG", "PRGn", "PuOr", "RdBu", "RdGy", "RdYlBu", "RdYlGn", "Spectral", "Blues",
    "BuGn", "BuPu", "GnBu", "Greens", "Greys", "Oranges", "OrRd", "PuBu", "PuBuGn", "PuRd",
    "Purples", "RdPu", "Reds", "YlGn", "YlGnBu", "YlOrBr", "YlOrRd", "Accent", "Dark2",
    "Paired", "Pastel1", "Pastel2", "Set1", "Set2", "Set3",
];

/// A validated palette name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Colormap(&'static str);

impl Colormap {
    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for Colormap {
    type Err = VizError;

    fn from_str(name: &str) -> Result<Self> {
        check_colormap(name)
    }
}

/// Looks `name` up in [`COLORMAPS`] (case-sensitive).
pub fn check_colormap(name: &str) -> Result<Colormap> {
    COLORMAPS
        .iter()
        .copied()
        .find(|candidate| *candidate == name)
        .map(Colormap)
        .ok_or_else(|| {
            VizError::config(format!(
                "invalid colormap '{name}', must be one of {}",
                COLORMAPS.join(", ")
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn it_should_broadcast_scalars_to_vectors() {
        assert_eq!(check_1d(&Data::from(5.0), "size").unwrap(), vec![5.0]);
        assert_eq!(check_1d(&Data::from(vec![vec![5.0]]), "size").unwrap(), vec![5.0]);
        assert_eq!(
            check_1d(&Data::from(vec![1.0, 2.0, 3.0]), "group").unwrap(),
            vec![1.0, 2.0, 3.0]
        );
    }

    #[test]
    fn it_should_reject_matrices_as_vectors() {
        let mat = Data::from(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert!(matches!(check_1d(&mat, "group"), Err(VizError::Shape(_))));
    }

    #[test]
    fn it_should_broadcast_colors_idempotently() {
        let single = check_color(&Data::from(vec![1.0, 0.0, 0.0])).unwrap();
        let wrapped = check_color(&Data::from(vec![vec![1.0, 0.0, 0.0]])).unwrap();
        assert_eq!(single, vec![[1.0, 0.0, 0.0]]);
        assert_eq!(single, wrapped);
    }

    #[test]
    fn it_should_require_color_triples() {
        assert!(matches!(
            check_color(&Data::from(vec![1.0, 0.0])),
            Err(VizError::Shape(_))
        ));
        assert!(matches!(
            check_color(&Data::from(vec![vec![1.0, 0.0, 0.0, 1.0]])),
            Err(VizError::Shape(_))
        ));
        assert!(matches!(check_color(&Data::from(1.0)), Err(VizError::Shape(_))));
    }

    #[test]
    fn it_should_require_positive_size_and_alpha() {
        for bad in [Data::from(0.0), Data::from(-1.0), Data::from(vec![1.0, 0.0, 2.0])] {
            assert!(matches!(check_size(&bad), Err(VizError::Range(_))));
            assert!(matches!(check_alpha(&bad), Err(VizError::Range(_))));
        }
        assert_eq!(check_size(&Data::from(vec![1.0, 2.0])).unwrap(), vec![1.0, 2.0]);
        assert_eq!(check_alpha(&Data::from(0.5)).unwrap(), vec![0.5]);
    }

    #[test]
    fn it_should_require_a_nonempty_index() {
        assert_eq!(check_index(&Data::from(vec![0, 1, 2])).unwrap(), vec![0.0, 1.0, 2.0]);
        assert!(check_index(&Data::from(Vec::<f64>::new())).is_err());
        assert!(check_index(&Data::from(3.0)).is_err());
        assert!(check_index(&Data::from(vec![vec![1.0], vec![2.0]])).is_err());
    }

    #[test]
    fn it_should_wrap_and_reverse_coordinates() {
        let single = Data::from(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);
        let polygons = check_coordinates(&single, false).unwrap();
        assert_eq!(polygons, vec![vec![[2.0, 1.0], [4.0, 3.0], [6.0, 5.0]]]);

        let as_xy = check_coordinates(&single, true).unwrap();
        assert_eq!(as_xy, vec![vec![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]]);

        let many = Data::from(vec![
            vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
            vec![vec![5.0, 5.0], vec![6.0, 6.0], vec![5.0, 6.0], vec![6.0, 5.0]],
        ]);
        let polygons = check_coordinates(&many, true).unwrap();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[1].len(), 4);
    }

    #[test]
    fn it_should_list_valid_colormaps_on_failure() {
        assert_eq!(check_colormap("Purples").unwrap().name(), "Purples");
        let err = check_colormap("Rainbow").unwrap_err();
        assert!(matches!(err, VizError::Configuration(_)));
        assert!(err.to_string().contains("Blues"));
        assert!("Set3".parse::<Colormap>().is_ok());
    }
}
