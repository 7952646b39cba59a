use super::*;
use crate::error::{Error, Result};
use std::path::PathBuf;

/// Something that can show a figure.
pub trait Renderer {
    fn render(&mut self, label: &str, figure: &Figure) -> Result<()>;
}

const MARGIN: u32 = 8;
/// Smallest panel side that leaves a drawable area inside the margins.
pub const MIN_PANEL_SIZE: u32 = 2 * MARGIN + 2;
const BACKGROUND: [u8; 3] = [255, 255, 255];
const FRAME: [u8; 3] = [160, 160, 160];

/// Rasterise figures to numbered PNG files.
pub struct PngRenderer {
    output_dir: PathBuf,
    panel_width: u32,
    panel_height: u32,
    frame: u32,
}

impl PngRenderer {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        PngRenderer {
            output_dir: output_dir.into(),
            panel_width: 320,
            panel_height: 320,
            frame: 0,
        }
    }

    /// Panel size in pixels, raised to `MIN_PANEL_SIZE` when smaller.
    pub fn with_panel_size(mut self, width: u32, height: u32) -> Self {
        self.panel_width = width.max(MIN_PANEL_SIZE);
        self.panel_height = height.max(MIN_PANEL_SIZE);
        self
    }

    pub fn frame_name(&self, i: u32) -> PathBuf {
        let mut result = self.output_dir.clone();
        result.push(format!("snapshot_{:04}.png", i));
        result
    }

    /// Draw `figure` into an image without touching the disk.
    pub fn rasterize(&self, figure: &Figure) -> Result<image::RgbImage> {
        let n_panels = figure.panels.len().max(1) as u32;
        let mut img = image::RgbImage::from_pixel(
            n_panels * self.panel_width,
            self.panel_height,
            image::Rgb(BACKGROUND),
        );
        for (i, axes) in figure.panels.iter().enumerate() {
            let area = Rect {
                left: i as u32 * self.panel_width + MARGIN,
                top: MARGIN,
                width: self.panel_width - 2 * MARGIN,
                height: self.panel_height - 2 * MARGIN,
            };
            draw_axes(&mut img, axes, &area)?;
        }
        Ok(img)
    }
}

impl Renderer for PngRenderer {
    fn render(&mut self, label: &str, figure: &Figure) -> Result<()> {
        let img = self.rasterize(figure)?;
        let path = self.frame_name(self.frame);
        log::debug!("Rendering {label:?} to {path:?}");
        img.save(&path)?;
        self.frame += 1;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone)]
struct Rect {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

/// Data limits of the line and scatter layers, padded when degenerate.
fn data_limits(axes: &Axes) -> Option<([f64; 2], [f64; 2])> {
    let mut x_lim = [f64::INFINITY, f64::NEG_INFINITY];
    let mut y_lim = [f64::INFINITY, f64::NEG_INFINITY];
    for layer in &axes.layers {
        if let Layer::Line { x, y, .. } | Layer::Scatter { x, y, .. } = layer {
            for (xi, yi) in x.iter().zip(y) {
                if xi.is_finite() && yi.is_finite() {
                    x_lim = [x_lim[0].min(*xi), x_lim[1].max(*xi)];
                    y_lim = [y_lim[0].min(*yi), y_lim[1].max(*yi)];
                }
            }
        }
    }
    if x_lim[0] > x_lim[1] {
        return None;
    }
    for lim in [&mut x_lim, &mut y_lim] {
        if lim[0] == lim[1] {
            lim[0] -= 0.5;
            lim[1] += 0.5;
        }
    }
    Some((x_lim, y_lim))
}

fn draw_axes(img: &mut image::RgbImage, axes: &Axes, area: &Rect) -> Result<()> {
    let limits = data_limits(axes);
    if limits.is_some() {
        draw_frame(img, area);
    }
    for layer in &axes.layers {
        match layer {
            Layer::Image {
                rows,
                cols,
                data,
                colormap,
            } => draw_image(img, area, *rows, *cols, data, *colormap)?,
            Layer::Line { x, y, style } => {
                if let Some((x_lim, y_lim)) = limits {
                    let points = to_pixels(area, x, y, x_lim, y_lim);
                    for pair in points.windows(2) {
                        draw_segment(img, pair[0], pair[1], style);
                    }
                }
            }
            Layer::Scatter { x, y, style } => {
                if let Some((x_lim, y_lim)) = limits {
                    for p in to_pixels(area, x, y, x_lim, y_lim) {
                        stamp(img, p, style.width + 1, style.color);
                    }
                }
            }
        }
    }
    Ok(())
}

fn draw_frame(img: &mut image::RgbImage, area: &Rect) {
    let right = area.left + area.width - 1;
    let bottom = area.top + area.height - 1;
    for x in area.left..=right {
        img.put_pixel(x, area.top, image::Rgb(FRAME));
        img.put_pixel(x, bottom, image::Rgb(FRAME));
    }
    for y in area.top..=bottom {
        img.put_pixel(area.left, y, image::Rgb(FRAME));
        img.put_pixel(right, y, image::Rgb(FRAME));
    }
}

/// Nearest neighbor scaling, aspect ratio kept, centered in `area`.
fn draw_image(
    img: &mut image::RgbImage,
    area: &Rect,
    rows: usize,
    cols: usize,
    data: &[f64],
    colormap: Colormap,
) -> Result<()> {
    if rows == 0 || cols == 0 || rows.checked_mul(cols) != Some(data.len()) {
        return Err(Error::Config(format!(
            "image layer has {} values for a {rows} x {cols} shape",
            data.len()
        )));
    }
    let finite = data.iter().filter(|v| v.is_finite());
    let lo = finite.clone().fold(f64::INFINITY, |a, b| a.min(*b));
    let hi = finite.fold(f64::NEG_INFINITY, |a, b| a.max(*b));
    let span = if hi > lo { hi - lo } else { 1.0 };

    let scale = (area.width as f64 / cols as f64).min(area.height as f64 / rows as f64);
    let draw_w = ((cols as f64 * scale) as u32).max(1);
    let draw_h = ((rows as f64 * scale) as u32).max(1);
    let left = area.left + (area.width - draw_w.min(area.width)) / 2;
    let top = area.top + (area.height - draw_h.min(area.height)) / 2;
    for py in 0..draw_h.min(area.height) {
        let r = source_index(py, draw_h, rows);
        for px in 0..draw_w.min(area.width) {
            let c = source_index(px, draw_w, cols);
            let v = data[r * cols + c];
            let t = if v.is_finite() { (v - lo) / span } else { 0.0 };
            img.put_pixel(left + px, top + py, image::Rgb(colormap.rgb(t)));
        }
    }
    Ok(())
}

/// Cell of an `n` long axis shown at pixel `p` of `drawn` pixels.
fn source_index(p: u32, drawn: u32, n: usize) -> usize {
    let i = p as u128 * n as u128 / drawn as u128;
    (i as usize).min(n - 1)
}

fn to_pixels(
    area: &Rect,
    x: &[f64],
    y: &[f64],
    x_lim: [f64; 2],
    y_lim: [f64; 2],
) -> Vec<(i64, i64)> {
    let w = (area.width - 1) as f64;
    let h = (area.height - 1) as f64;
    x.iter()
        .zip(y)
        .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
        .map(|(xi, yi)| {
            let fx = (xi - x_lim[0]) / (x_lim[1] - x_lim[0]);
            let fy = (yi - y_lim[0]) / (y_lim[1] - y_lim[0]);
            (
                area.left as i64 + (fx * w).round() as i64,
                area.top as i64 + ((1.0 - fy) * h).round() as i64,
            )
        })
        .collect()
}

/// Simple DDA line.
fn draw_segment(img: &mut image::RgbImage, a: (i64, i64), b: (i64, i64), style: &Style) {
    let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).max(1);
    for s in 0..=steps {
        let t = s as f64 / steps as f64;
        let x = a.0 as f64 + t * (b.0 - a.0) as f64;
        let y = a.1 as f64 + t * (b.1 - a.1) as f64;
        stamp(img, (x.round() as i64, y.round() as i64), style.width, style.color);
    }
}

/// Square brush centered on `p`, clipped to the image.
fn stamp(img: &mut image::RgbImage, p: (i64, i64), size: u32, color: [u8; 3]) {
    let size = size.max(1) as i64;
    let half = size / 2;
    for dy in 0..size {
        for dx in 0..size {
            let x = p.0 - half + dx;
            let y = p.1 - half + dy;
            if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
                img.put_pixel(x as u32, y as u32, image::Rgb(color));
            }
        }
    }
}
