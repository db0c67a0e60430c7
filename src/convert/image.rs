// src/convert/image.rs

//! Raster encoding of array data.

use log::trace;
use png::{BitDepth, ColorType, Encoder};

use crate::data::Data;
use crate::error::{Result, VizError};

/// Encodes a rank-2 (grayscale) or rank-3 (RGB / RGBA) array as PNG bytes.
///
/// Grayscale data is stretched so its minimum maps to black and its maximum
/// to white. Colour data in `[0, 1]` is scaled to 8 bits; anything with a
/// larger maximum is taken to already be on the 0..255 scale and clamped.
pub fn array_to_im(image: &Data) -> Result<Vec<u8>> {
    let shape = image.shape()?;
    let values = image.flatten()?;

    let (height, width, color, pixels) = match shape.as_slice() {
        [h, w] => (*h, *w, ColorType::Grayscale, grayscale(&values)),
        [h, w, 3] => (*h, *w, ColorType::Rgb, color_channels(&values)),
        [h, w, 4] => (*h, *w, ColorType::Rgba, color_channels(&values)),
        [_, _, c] => {
            return Err(VizError::shape(format!(
                "color images must have 3 or 4 channels, got {c}"
            )))
        }
        other => {
            return Err(VizError::shape(format!(
                "images must be 2 or 3 dimensions, got {}",
                other.len()
            )))
        }
    };
    if height == 0 || width == 0 {
        return Err(VizError::shape("image must not be empty"));
    }

    let mut out = Vec::new();
    {
        let mut encoder = Encoder::new(&mut out, width as u32, height as u32);
        encoder.set_color(color);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&pixels)?;
        writer.finish()?;
    }
    trace!("encoded {width}x{height} {color:?} image into {} bytes", out.len());
    Ok(out)
}

fn grayscale(values: &[f64]) -> Vec<u8> {
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let span = hi - lo;
    values
        .iter()
        .map(|v| {
            if span > 0.0 {
                ((v - lo) / span * 255.0).round() as u8
            } else {
                0
            }
        })
        .collect()
}

fn color_channels(values: &[f64]) -> Vec<u8> {
    let scale = if values.iter().all(|v| *v <= 1.0) { 255.0 } else { 1.0 };
    values
        .iter()
        .map(|v| (v * scale).round().clamp(0.0, 255.0) as u8)
        .collect()
}
