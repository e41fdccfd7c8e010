//! RGBA raster images loaded from screenshot files

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use std::path::Path;

use crate::error::ShotdiffError;
use crate::infra::FileSystem;

/// Bytes per pixel (R, G, B, A)
pub const CHANNELS: usize = 4;

/// Opaque white, the padding colour for reconciled canvases
pub const WHITE: [u8; 4] = [255, 255, 255, 255];

/// An immutable RGBA8 image, row-major, top-to-bottom
///
/// The buffer always holds exactly `width * height * 4` bytes.
///
/// # Examples
///
/// ```
/// use shotdiff::raster::RasterImage;
///
/// let img = RasterImage::filled(3, 2, [10, 20, 30, 255]);
/// assert_eq!(img.dimensions(), (3, 2));
/// assert_eq!(img.as_bytes().len(), 3 * 2 * 4);
/// assert_eq!(img.pixel(2, 1), [10, 20, 30, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterImage {
    /// Wrap a raw RGBA buffer, checking its length against the dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ShotdiffError> {
        if data.len() != buffer_len(width, height) {
            return Err(ShotdiffError::RasterShape {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A canvas with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(buffer_len(width, height));
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Decode PNG bytes into RGBA8. `path` is only used for error reporting.
    pub fn decode_png(bytes: &[u8], path: &Path) -> Result<Self, ShotdiffError> {
        let rgba = image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .map_err(|source| ShotdiffError::ImageDecode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_raw(width, height, rgba.into_raw())
    }

    /// Read and decode a PNG file.
    pub fn load<FS: FileSystem>(fs: &FS, path: &Path) -> Result<Self, ShotdiffError> {
        let bytes = fs
            .read(path)
            .map_err(|e| ShotdiffError::io(format!("reading {}", path.display()), e))?;
        Self::decode_png(&bytes, path)
    }

    /// Encode as PNG bytes. `path` is only used for error reporting.
    pub fn encode_png(&self, path: &Path) -> Result<Vec<u8>, ShotdiffError> {
        let mut buffer = Vec::new();
        PngEncoder::new(&mut buffer)
            .write_image(&self.data, self.width, self.height, ExtendedColorType::Rgba8)
            .map_err(|source| ShotdiffError::ImageEncode {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(buffer)
    }

    /// Encode as PNG and write to `path`, replacing any existing file.
    pub fn save<FS: FileSystem>(&self, fs: &FS, path: &Path) -> Result<(), ShotdiffError> {
        let bytes = self.encode_png(path)?;
        fs.write(path, bytes)
            .map_err(|e| ShotdiffError::io(format!("writing {}", path.display()), e))
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Raw RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// One row of RGBA bytes.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * CHANNELS;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }

    /// The RGBA value at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}
