//! Label map export: one pixel per cell, rows from north to south.

use std::io::BufWriter;
use std::path::Path;

use tilekit_grid::{LabelId, LatLongGrid, VecGrid};

use crate::error::AppError;

const WATER_COLOR: [u8; 4] = [32, 72, 160, 255];

/// A stable color for `label`; the water label is always blue.
pub fn label_color(label: LabelId, water: LabelId) -> [u8; 4] {
    if label == water {
        return WATER_COLOR;
    }
    // Golden-ratio hue stepping keeps neighbouring ids apart.
    let hue = (f32::from(label.0) * 0.618_034).fract();
    let [r, g, b] = hsv_to_rgb(hue, 0.55, 0.85);
    [r, g, b, 255]
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [u8; 3] {
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    let (r, g, b) = match sector as i32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let to_byte = |c: f32| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    [to_byte(r), to_byte(g), to_byte(b)]
}

/// RGBA pixels for the grid, row-major.
pub fn render_labels(shape: &LatLongGrid, grid: &VecGrid, water: LabelId) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(shape.cell_count() * 4);
    for cell in grid.cells() {
        pixels.extend_from_slice(&label_color(cell.label, water));
    }
    pixels
}

/// Writes the label map as an 8-bit RGBA PNG.
///
/// # Errors
///
/// Returns [`AppError::MapTooLarge`] if a side exceeds `u32`,
/// [`AppError::Write`] if the file cannot be created, or [`AppError::Png`] if
/// encoding fails.
pub fn write_label_map(
    path: &Path,
    shape: &LatLongGrid,
    grid: &VecGrid,
    water: LabelId,
) -> Result<(), AppError> {
    let too_large = || AppError::MapTooLarge {
        rows: shape.rows,
        columns: shape.columns,
    };
    let width = u32::try_from(shape.columns).map_err(|_| too_large())?;
    let height = u32::try_from(shape.rows).map_err(|_| too_large())?;

    let pixels = render_labels(shape, grid, water);
    let file = std::fs::File::create(path).map_err(|source| AppError::Write {
        path: path.display().to_string(),
        source,
    })?;

    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&pixels)?;
    writer.finish()?;

    tracing::info!("Wrote label map to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_is_blue() {
        assert_eq!(label_color(LabelId(0), LabelId(0)), WATER_COLOR);
        assert_ne!(label_color(LabelId(1), LabelId(0)), WATER_COLOR);
    }

    #[test]
    fn test_colors_distinct() {
        let water = LabelId(0);
        let colors: Vec<_> = (1..10).map(|i| label_color(LabelId(i), water)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_oversized_map_rejected() {
        let shape = LatLongGrid::new(1, usize::MAX);
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("labels.png");
        let result = write_label_map(&path, &shape, &VecGrid::new(), LabelId(0));
        assert!(matches!(result, Err(AppError::MapTooLarge { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_label_map() {
        let shape = LatLongGrid::new(3, 4);
        let grid = shape.build(LabelId(0)).unwrap();
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("labels.png");
        write_label_map(&path, &shape, &grid, LabelId(0)).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(render_labels(&shape, &grid, LabelId(0)).len(), 3 * 4 * 4);
    }
}
