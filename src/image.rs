use crate::domain::*;
use crate::error::{Error, Result};
use crate::plot_log::Colormap;
use crate::util::*;

/// Read one RGB channel of an image file as raw 0-255 values.
/// The domain has shape `(height, width)`, row 0 is the top of the image.
pub fn load_channel<P: AsRef<std::path::Path>>(
    path: &P,
    channel: usize,
) -> Result<OwnedDomain<2>> {
    if channel > 2 {
        return Err(Error::Config(format!(
            "channel {channel} is out of range, expected 0, 1 or 2"
        )));
    }
    log::info!("Reading: {:?}", path.as_ref());
    let img = image::open(path)?.into_rgb8();
    let (width, height) = img.dimensions();
    let aabb = AABB::from_shape([height as usize, width as usize]);
    let buffer = img
        .pixels()
        .map(|p| p.0[channel] as f64)
        .collect::<Vec<f64>>();
    OwnedDomain::from_buffer(aabb, buffer)
}

/// Rasterise `domain` one pixel per cell.
/// Values are normalised over `range`, or over their own min/max without one.
pub fn image2d<DomainType: DomainView<2>>(
    domain: &DomainType,
    colormap: Colormap,
    range: Option<(f64, f64)>,
) -> image::RgbImage {
    let [rows, cols] = domain.aabb().shape();
    let (lo, hi) = range.or_else(|| domain.min_max()).unwrap_or((0.0, 1.0));
    let span = if hi > lo { hi - lo } else { 1.0 };
    let mut img = image::RgbImage::new(cols as u32, rows as u32);
    for (coord, v) in domain.aabb().coord_iter().zip(domain.buffer()) {
        let c = colormap.rgb((v - lo) / span);
        img.put_pixel(coord[1] as u32, coord[0] as u32, image::Rgb(c));
    }
    img
}

pub fn write_png<P: AsRef<std::path::Path>, DomainType: DomainView<2>>(
    domain: &DomainType,
    path: &P,
    colormap: Colormap,
    range: Option<(f64, f64)>,
) -> Result<()> {
    log::debug!("Writing: {:?}", path.as_ref());
    image2d(domain, colormap, range).save(path)?;
    Ok(())
}
