//! Perceptual per-pixel comparison
//!
//! Colour distance is measured in YIQ space, weighted towards luma, so the
//! `threshold` behaves like a perceptual tolerance rather than a raw channel
//! delta. Semi-transparent pixels are blended onto white before comparison,
//! which keeps alpha-only changes visible. Anti-aliased edge pixels are
//! detected by looking at the local neighbourhood in both images.

use crate::raster::{RasterImage, CHANNELS};

/// Largest possible YIQ delta between two colours (black vs white)
const MAX_YIQ_DELTA: f64 = 35215.0;

/// Tuning for [`compare`]
#[derive(Debug, Clone, PartialEq)]
pub struct DiffOptions {
    /// Matching threshold in 0..=1; smaller is more sensitive
    pub threshold: f64,
    /// Opacity of unchanged pixels drawn into the diff image, 0..=1
    pub alpha: f64,
    /// Count anti-aliased pixels as mismatches
    pub include_aa: bool,
    /// Colour of mismatched pixels in the diff image
    pub diff_color: [u8; 3],
    /// Colour of anti-aliased pixels when they are not counted
    pub aa_color: [u8; 3],
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            alpha: 0.5,
            include_aa: true,
            diff_color: [255, 0, 0],
            aa_color: [255, 255, 0],
        }
    }
}

impl DiffOptions {
    /// Sets the matching threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the opacity of unchanged pixels in the diff image.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Enables or disables counting anti-aliased pixels.
    pub fn with_include_aa(mut self, include_aa: bool) -> Self {
        self.include_aa = include_aa;
        self
    }

    fn max_delta(&self) -> f64 {
        MAX_YIQ_DELTA * self.threshold * self.threshold
    }
}

/// Outcome of comparing two same-sized images
#[derive(Debug, Clone)]
pub struct PixelDiff {
    /// Number of pixels counted as different
    pub mismatched_pixels: u64,
    /// Visualisation: mismatches highlighted, everything else dimmed grey
    pub diff_image: RasterImage,
}

impl PixelDiff {
    /// Mismatched pixels as a percentage of the canvas (unrounded).
    pub fn mismatch_percent(&self) -> f64 {
        let total = self.diff_image.pixel_count();
        if total == 0 {
            0.0
        } else {
            self.mismatched_pixels as f64 / total as f64 * 100.0
        }
    }
}

/// Compare two images of identical dimensions.
///
/// Callers reconcile sizes first; mismatched dimensions are a programming
/// error and panic.
///
/// # Examples
///
/// ```
/// use shotdiff::diff::{compare, DiffOptions};
/// use shotdiff::raster::RasterImage;
///
/// let a = RasterImage::filled(4, 4, [255, 255, 255, 255]);
/// let b = RasterImage::filled(4, 4, [0, 0, 0, 255]);
///
/// let same = compare(&a, &a, &DiffOptions::default());
/// assert_eq!(same.mismatched_pixels, 0);
///
/// let diff = compare(&a, &b, &DiffOptions::default());
/// assert_eq!(diff.mismatched_pixels, 16);
/// assert_eq!(diff.mismatch_percent(), 100.0);
/// ```
pub fn compare(expected: &RasterImage, actual: &RasterImage, options: &DiffOptions) -> PixelDiff {
    assert_eq!(
        expected.dimensions(),
        actual.dimensions(),
        "images must be reconciled before comparison"
    );

    let (width, height) = expected.dimensions();
    let mut output = RasterImage::filled(width, height, [0, 0, 0, 0]);
    let img1 = Frame::new(expected);
    let img2 = Frame::new(actual);

    if expected.as_bytes() == actual.as_bytes() {
        let out = output.raw_mut();
        for i in 0..expected.pixel_count() as usize {
            draw_gray_pixel(expected.as_bytes(), i * CHANNELS, options.alpha, out);
        }
        return PixelDiff {
            mismatched_pixels: 0,
            diff_image: output,
        };
    }

    let max_delta = options.max_delta();
    let mut mismatched = 0u64;
    let out = output.raw_mut();

    for y in 0..height {
        for x in 0..width {
            let pos = img1.offset(x, y);
            let delta = color_delta(img1.data, img2.data, pos, pos, false);

            if delta.abs() > max_delta {
                if !options.include_aa
                    && (antialiased(&img1, x, y, &img2) || antialiased(&img2, x, y, &img1))
                {
                    draw_pixel(out, pos, options.aa_color);
                } else {
                    draw_pixel(out, pos, options.diff_color);
                    mismatched += 1;
                }
            } else {
                draw_gray_pixel(img1.data, pos, options.alpha, out);
            }
        }
    }

    PixelDiff {
        mismatched_pixels: mismatched,
        diff_image: output,
    }
}

/// Borrowed view used by the neighbourhood checks
struct Frame<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> Frame<'a> {
    fn new(image: &'a RasterImage) -> Self {
        Self {
            data: image.as_bytes(),
            width: image.width(),
            height: image.height(),
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Clamped 3x3 window around `(x, y)`: `(x0, y0, x2, y2)`
    fn window(&self, x: u32, y: u32) -> (u32, u32, u32, u32) {
        (
            x.saturating_sub(1),
            y.saturating_sub(1),
            (x + 1).min(self.width - 1),
            (y + 1).min(self.height - 1),
        )
    }

    fn on_edge(&self, x: u32, y: u32) -> bool {
        let (x0, y0, x2, y2) = self.window(x, y);
        x == x0 || x == x2 || y == y0 || y == y2
    }
}

/// Whether the pixel at `(x, y)` in `img` looks like an anti-aliased edge,
/// judged against the same neighbourhood in `other`.
fn antialiased(img: &Frame<'_>, x: u32, y: u32, other: &Frame<'_>) -> bool {
    let (x0, y0, x2, y2) = img.window(x, y);
    let pos = img.offset(x, y);
    let mut zeroes = u32::from(img.on_edge(x, y));

    let mut min = 0.0;
    let mut max = 0.0;
    let mut darkest = (0, 0);
    let mut brightest = (0, 0);

    for nx in x0..=x2 {
        for ny in y0..=y2 {
            if nx == x && ny == y {
                continue;
            }

            let delta = color_delta(img.data, img.data, pos, img.offset(nx, ny), true);

            if delta == 0.0 {
                zeroes += 1;
                if zeroes > 2 {
                    return false;
                }
            } else if delta < min {
                min = delta;
                darkest = (nx, ny);
            } else if delta > max {
                max = delta;
                brightest = (nx, ny);
            }
        }
    }

    // No darker or no brighter neighbour: not an edge gradient
    if min == 0.0 || max == 0.0 {
        return false;
    }

    (has_many_siblings(img, darkest.0, darkest.1) && has_many_siblings(other, darkest.0, darkest.1))
        || (has_many_siblings(img, brightest.0, brightest.1)
            && has_many_siblings(other, brightest.0, brightest.1))
}

/// Whether at least three neighbours of `(x, y)` share its exact colour.
fn has_many_siblings(img: &Frame<'_>, x: u32, y: u32) -> bool {
    let (x0, y0, x2, y2) = img.window(x, y);
    let pos = img.offset(x, y);
    let pixel = &img.data[pos..pos + CHANNELS];
    let mut zeroes = u32::from(img.on_edge(x, y));

    for nx in x0..=x2 {
        for ny in y0..=y2 {
            if nx == x && ny == y {
                continue;
            }
            let other = img.offset(nx, ny);
            if pixel == &img.data[other..other + CHANNELS] {
                zeroes += 1;
            }
            if zeroes > 2 {
                return true;
            }
        }
    }

    false
}

/// Squared YIQ distance between two pixels, negative when the first is
/// brighter. With `y_only` the signed luma difference is returned instead.
fn color_delta(img1: &[u8], img2: &[u8], k: usize, m: usize, y_only: bool) -> f64 {
    let p1 = &img1[k..k + CHANNELS];
    let p2 = &img2[m..m + CHANNELS];

    if p1 == p2 {
        return 0.0;
    }

    let (r1, g1, b1) = blend_on_white(p1);
    let (r2, g2, b2) = blend_on_white(p2);

    let y1 = rgb_to_y(r1, g1, b1);
    let y2 = rgb_to_y(r2, g2, b2);
    let y = y1 - y2;

    if y_only {
        return y;
    }

    let i = rgb_to_i(r1, g1, b1) - rgb_to_i(r2, g2, b2);
    let q = rgb_to_q(r1, g1, b1) - rgb_to_q(r2, g2, b2);
    let delta = 0.5053 * y * y + 0.299 * i * i + 0.1957 * q * q;

    if y1 > y2 {
        -delta
    } else {
        delta
    }
}

fn blend_on_white(px: &[u8]) -> (f64, f64, f64) {
    let (r, g, b, a) = (px[0] as f64, px[1] as f64, px[2] as f64, px[3]);
    if a < 255 {
        let a = a as f64 / 255.0;
        (blend(r, a), blend(g, a), blend(b, a))
    } else {
        (r, g, b)
    }
}

fn blend(c: f64, a: f64) -> f64 {
    255.0 + (c - 255.0) * a
}

fn rgb_to_y(r: f64, g: f64, b: f64) -> f64 {
    r * 0.298_895_31 + g * 0.586_622_47 + b * 0.114_482_23
}

fn rgb_to_i(r: f64, g: f64, b: f64) -> f64 {
    r * 0.595_977_99 - g * 0.274_176_10 - b * 0.321_801_89
}

fn rgb_to_q(r: f64, g: f64, b: f64) -> f64 {
    r * 0.211_470_17 - g * 0.522_617_11 + b * 0.311_146_94
}

fn draw_pixel(out: &mut [u8], pos: usize, [r, g, b]: [u8; 3]) {
    out[pos..pos + CHANNELS].copy_from_slice(&[r, g, b, 255]);
}

fn draw_gray_pixel(src: &[u8], pos: usize, alpha: f64, out: &mut [u8]) {
    let luma = rgb_to_y(src[pos] as f64, src[pos + 1] as f64, src[pos + 2] as f64);
    let value = blend(luma, alpha * src[pos + 3] as f64 / 255.0);
    let v = value.round().clamp(0.0, 255.0) as u8;
    draw_pixel(out, pos, [v, v, v]);
}
