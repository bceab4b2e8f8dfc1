//! Flattening a chart into an RGBA image and writing it as PNG
//!
//! The dense grid is the base image. Visible layers are composited over it
//! bottom to top with "source over" alpha, using each layer's opacity as the
//! alpha of its cells.

use crate::chart::Chart;
use crate::color::{Color, ColorError};
use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[derive(Debug, Error)]
pub enum ExportError {
    /// A painted cell holds a color that cannot be rendered
    #[error("cannot render color '{token}': {source}")]
    Color {
        token: String,
        #[source]
        source: ColorError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A composited plane: resolved cell colors and the alpha they are drawn with.
struct Plane {
    cells: HashMap<(i32, i32), Rgba<u8>>,
    alpha: f32,
}

fn resolve<'a>(cache: &mut HashMap<&'a Color, Rgba<u8>>, color: &'a Color) -> Result<Rgba<u8>, ExportError> {
    if let Some(rgba) = cache.get(color) {
        return Ok(*rgba);
    }
    let rgba = color
        .to_rgba()
        .map_err(|source| ExportError::Color { token: color.as_str().to_string(), source })?;
    cache.insert(color, rgba);
    Ok(rgba)
}

/// Composite `src` over `dst` with "source over", scaling the source's own
/// alpha by `opacity` (0.0-1.0).
pub fn blend_over(src: Rgba<u8>, dst: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let src_alpha = src[3] as f32 / 255.0 * opacity;
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);

    if out_alpha == 0.0 {
        return TRANSPARENT;
    }

    let composite = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let result = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        (result.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    Rgba([
        composite(src[0], dst[0]),
        composite(src[1], dst[1]),
        composite(src[2], dst[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}

/// Flatten the chart into a `width`×`height` image, one pixel per cell.
///
/// Unpainted cells show `background`, or stay transparent without one.
pub fn flatten(chart: &Chart, background: Option<Rgba<u8>>) -> Result<RgbaImage, ExportError> {
    let mut cache = HashMap::new();
    let mut planes = Vec::new();

    let mut base = HashMap::new();
    for (pos, color) in chart.grid().painted() {
        base.insert(pos, resolve(&mut cache, color)?);
    }
    planes.push(Plane { cells: base, alpha: 1.0 });

    for (layer, cells) in chart.visible_layer_cells() {
        let mut resolved = HashMap::with_capacity(cells.len());
        for (pos, color) in cells {
            resolved.insert(pos, resolve(&mut cache, color)?);
        }
        planes.push(Plane { cells: resolved, alpha: layer.opacity as f32 / 100.0 });
    }

    let (width, height) = (chart.width(), chart.height());
    let background = background.unwrap_or(TRANSPARENT);

    // Rows are independent; composite them in parallel
    let rows: Vec<Vec<Rgba<u8>>> = (0..height as i32)
        .into_par_iter()
        .map(|y| {
            (0..width as i32)
                .map(|x| {
                    planes.iter().fold(background, |pixel, plane| match plane.cells.get(&(x, y)) {
                        Some(&src) => blend_over(src, pixel, plane.alpha),
                        None => pixel,
                    })
                })
                .collect()
        })
        .collect();

    let mut image = RgbaImage::new(width, height);
    for (y, row) in rows.into_iter().enumerate() {
        for (x, pixel) in row.into_iter().enumerate() {
            image.put_pixel(x as u32, y as u32, pixel);
        }
    }
    debug!(width, height, planes = planes.len(), "flattened chart");
    Ok(image)
}

/// Scale an image by an integer factor with nearest-neighbor sampling, so
/// each cell becomes a `factor`×`factor` block.
pub fn scale_image(image: RgbaImage, factor: u32) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(&image, w * factor, h * factor, FilterType::Nearest)
}

/// Save an RGBA image as PNG, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    image.save(path)?;
    Ok(())
}

/// Flatten, scale by `cell_size` and save the chart as a PNG.
pub fn export_png(
    chart: &Chart,
    path: &Path,
    cell_size: u32,
    background: Option<Rgba<u8>>,
) -> Result<RgbaImage, ExportError> {
    let image = scale_image(flatten(chart, background)?, cell_size);
    save_png(&image, path)?;
    info!(path = %path.display(), width = image.width(), height = image.height(), "exported PNG");
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_blend_opaque_replaces() {
        assert_eq!(blend_over(RED, BLUE, 1.0), RED);
        assert_eq!(blend_over(RED, TRANSPARENT, 1.0), RED);
        assert_eq!(blend_over(RED, BLUE, 0.0), BLUE);
    }

    #[test]
    fn test_blend_half_opacity() {
        let mixed = blend_over(RED, WHITE, 0.5);
        assert_eq!(mixed, Rgba([255, 128, 128, 255]));
    }

    #[test]
    fn test_flatten_layers_bottom_to_top() {
        let mut chart = Chart::new(5, 5).unwrap();
        chart.select_color(Color::new("#FF0000"));
        chart.paint(0, 0).unwrap();
        chart.paint(1, 0).unwrap();
        chart.add_layer(None);
        chart.select_color(Color::new("#0000FF"));
        chart.paint(1, 0).unwrap();

        let image = flatten(&chart, None).unwrap();
        assert_eq!(image.dimensions(), (5, 5));
        assert_eq!(*image.get_pixel(0, 0), RED);
        assert_eq!(*image.get_pixel(1, 0), BLUE);
        assert_eq!(*image.get_pixel(2, 0), TRANSPARENT);
    }

    #[test]
    fn test_flatten_respects_opacity_and_visibility() {
        let mut chart = Chart::new(5, 5).unwrap();
        let background = chart.active_layer_id().unwrap();
        chart.select_color(Color::new("#FF0000"));
        chart.paint(0, 0).unwrap();
        chart.set_layer_opacity(background, 50).unwrap();

        let image = flatten(&chart, Some(WHITE)).unwrap();
        assert_eq!(*image.get_pixel(0, 0), Rgba([255, 128, 128, 255]));
        assert_eq!(*image.get_pixel(4, 4), WHITE);

        chart.toggle_layer_visibility(background).unwrap();
        let image = flatten(&chart, Some(WHITE)).unwrap();
        assert_eq!(*image.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn test_flatten_flat_chart_uses_grid() {
        let mut chart = Chart::flat(5, 5).unwrap();
        chart.select_color(Color::new("blue"));
        chart.paint(4, 4).unwrap();
        let image = flatten(&chart, None).unwrap();
        assert_eq!(*image.get_pixel(4, 4), BLUE);
    }

    #[test]
    fn test_flatten_reports_bad_color() {
        let mut chart = Chart::new(5, 5).unwrap();
        chart.set_cell(0, 0, Some(Color::new("not-a-color"))).unwrap();
        let err = flatten(&chart, None).unwrap_err();
        assert!(matches!(err, ExportError::Color { ref token, .. } if token == "not-a-color"));
    }

    #[test]
    fn test_export_png_scales_by_cell_size() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("out").join("chart.png");
        let mut chart = Chart::new(5, 6).unwrap();
        chart.paint(0, 0).unwrap();

        let image = export_png(&chart, &path, 4, None).unwrap();
        assert_eq!(image.dimensions(), (20, 24));
        assert!(path.exists());
        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(*reloaded.get_pixel(3, 3), Rgba([0, 0, 0, 255]));
        assert_eq!(*reloaded.get_pixel(4, 0), TRANSPARENT);
    }
}
