use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
    slice::ChunksMut,
};

use image::{ExtendedColorType, ImageBuffer, ImageError, ImageFormat, Pixel};
use thiserror::Error;

/// Errors that may occur when loading or saving raster images.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Reading or decoding an image file failed.
    #[error("failed to load image: {0}")]
    Load(#[source] ImageError),

    /// Encoding or writing an image file failed.
    #[error("failed to save image: {0}")]
    Save(#[source] ImageError),

    /// The image holds no pixels at all.
    #[error("image has no pixels to process")]
    Empty,

    /// The channel count is not one the codec can represent.
    #[error("unsupported channel count: {0}")]
    Channels(u8),

    /// A raw pixel buffer does not match its stated dimensions.
    #[error("buffer of {len} bytes does not match {width}x{height} pixels with {channels} channels")]
    Geometry {
        len: usize,
        width: u32,
        height: u32,
        channels: u8,
    },
}

/// An 8-bit raster image held fully in memory.
///
/// Pixels are stored in one flat row-major buffer with `channels`
/// interleaved samples per pixel, matching the layout produced by the
/// underlying codec. Constructed images are never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

impl RasterImage {
    /// Decodes the image file at the given `path`.
    ///
    /// The source channel count (gray, gray-alpha, RGB or RGBA) is
    /// preserved; deeper sample formats are narrowed to 8 bits per
    /// channel.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RasterError> {
        let image = image::open(path).map_err(RasterError::Load)?;

        let (channels, (pixels, width, height)) = match image.color().channel_count() {
            1 => (1, into_parts(image.into_luma8())),
            2 => (2, into_parts(image.into_luma_alpha8())),
            3 => (3, into_parts(image.into_rgb8())),
            _ => (4, into_parts(image.into_rgba8())),
        };

        Self::from_raw(width, height, channels, pixels)
    }

    /// Builds an image from a raw pixel buffer and its geometry.
    pub fn from_raw(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<Self, RasterError> {
        if !(1..=4).contains(&channels) {
            return Err(RasterError::Channels(channels));
        }

        // An overflowing product cannot match any real buffer.
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(usize::from(channels)));
        if expected != Some(pixels.len()) {
            return Err(RasterError::Geometry {
                len: pixels.len(),
                width,
                height,
                channels,
            });
        }

        if pixels.is_empty() {
            return Err(RasterError::Empty);
        }

        Ok(Self {
            pixels,
            width,
            height,
            channels,
        })
    }

    /// Gets the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Gets the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Gets the number of interleaved channels per pixel.
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Gets the length of one pixel row in bytes.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * usize::from(self.channels)
    }

    /// Gets the raw pixel data as one flat byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Splits the pixel buffer into disjoint mutable row views.
    ///
    /// Each view covers exactly one row and together they cover the
    /// whole buffer without overlap, so they can be handed to
    /// concurrent workers without further synchronization.
    pub fn rows_mut(&mut self) -> ChunksMut<'_, u8> {
        let row_len = self.row_len();
        self.pixels.chunks_mut(row_len)
    }

    /// Encodes the image as PNG and writes it to `path`.
    ///
    /// Dimensions and channel count carry over unchanged.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), RasterError> {
        let color = match self.channels {
            1 => ExtendedColorType::L8,
            2 => ExtendedColorType::La8,
            3 => ExtendedColorType::Rgb8,
            _ => ExtendedColorType::Rgba8,
        };

        image::save_buffer_with_format(
            path,
            &self.pixels,
            self.width,
            self.height,
            color,
            ImageFormat::Png,
        )
        .map_err(RasterError::Save)
    }
}

fn into_parts<P>(buf: ImageBuffer<P, Vec<u8>>) -> (Vec<u8>, u32, u32)
where
    P: Pixel<Subpixel = u8>,
{
    let (width, height) = buf.dimensions();
    (buf.into_raw(), width, height)
}

/// Derives the output path for an inverted image.
///
/// The input's extension is replaced by the `_inverted.png` suffix,
/// so `photo.jpg` maps to `photo_inverted.png` in the same directory.
/// Inputs without an extension gain the suffix whole; dots in parent
/// directories are ignored.
pub fn output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or(OsStr::new("")).to_string_lossy();
    input.with_file_name(format!("{stem}_inverted.png"))
}
