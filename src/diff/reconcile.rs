//! Canvas reconciliation for differently-sized screenshots
//!
//! Full-page captures routinely change height between runs. Both images are
//! placed top-left on a shared canvas of the larger dimensions, with the
//! uncovered margin painted opaque white.

use std::borrow::Cow;

use crate::raster::{RasterImage, CHANNELS, WHITE};

/// Bring two images onto a canvas of `max(width) x max(height)`.
///
/// Images already at the target size are borrowed unchanged.
///
/// # Examples
///
/// ```
/// use shotdiff::diff::reconcile;
/// use shotdiff::raster::RasterImage;
///
/// let short = RasterImage::filled(10, 5, [0, 0, 0, 255]);
/// let tall = RasterImage::filled(8, 9, [0, 0, 0, 255]);
///
/// let (a, b) = reconcile(&short, &tall);
/// assert_eq!(a.dimensions(), (10, 9));
/// assert_eq!(b.dimensions(), (10, 9));
/// assert_eq!(a.pixel(0, 8), [255, 255, 255, 255]);
/// ```
pub fn reconcile<'a>(
    a: &'a RasterImage,
    b: &'a RasterImage,
) -> (Cow<'a, RasterImage>, Cow<'a, RasterImage>) {
    let width = a.width().max(b.width());
    let height = a.height().max(b.height());
    (fit(a, width, height), fit(b, width, height))
}

fn fit(image: &RasterImage, width: u32, height: u32) -> Cow<'_, RasterImage> {
    if image.dimensions() == (width, height) {
        Cow::Borrowed(image)
    } else {
        Cow::Owned(pad_to(image, width, height))
    }
}

/// Copy `image` into the top-left of a white `width x height` canvas.
///
/// Callers pass the larger of both images' dimensions, so the canvas always
/// covers the image.
fn pad_to(image: &RasterImage, width: u32, height: u32) -> RasterImage {
    debug_assert!(image.width() <= width && image.height() <= height);

    let mut canvas = RasterImage::filled(width, height, WHITE);
    let src_stride = image.width() as usize * CHANNELS;
    let dst_stride = width as usize * CHANNELS;
    let dst = canvas.raw_mut();

    for y in 0..image.height() {
        let start = y as usize * dst_stride;
        dst[start..start + src_stride].copy_from_slice(image.row(y));
    }

    canvas
}
