// renderer/texture.rs (decode, formats, mip chains)

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageBuffer, Pixel, Rgb, Rgba};

use crate::error::{TextureError, TextureResult};

/// Opaque identifier of a texture object owned by a [`TextureBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Pixel layouts the scene shader can sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Opaque RGB, three bytes per pixel.
    Rgb8,
    /// RGB plus alpha, four bytes per pixel.
    Rgba8,
}

impl PixelFormat {
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            3 => Some(PixelFormat::Rgb8),
            4 => Some(PixelFormat::Rgba8),
            _ => None,
        }
    }

    pub fn bytes_per_pixel(self) -> u32 {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Raw decoded pixels, tightly packed rows, `channels` bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Keeps the source's channel count, narrowing wider sample types to 8 bits.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let channels = img.color().channel_count();
        let (width, height) = (img.width(), img.height());
        let pixels = match channels {
            1 => img.into_luma8().into_raw(),
            2 => img.into_luma_alpha8().into_raw(),
            3 => img.into_rgb8().into_raw(),
            _ => img.into_rgba8().into_raw(),
        };

        Self {
            width,
            height,
            channels,
            pixels,
        }
    }

    pub fn format(&self) -> Option<PixelFormat> {
        PixelFormat::from_channels(self.channels)
    }
}

/// Turns an image file into raw pixels.
pub trait ImageDecoder {
    /// With `flip_vertically` the first row of the result is the bottom row of
    /// the file, so texture coordinate (0, 0) lands bottom-left.
    fn decode(&self, path: &Path, flip_vertically: bool) -> TextureResult<DecodedImage>;
}

/// [`ImageDecoder`] backed by the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFileDecoder;

impl ImageDecoder for ImageFileDecoder {
    fn decode(&self, path: &Path, flip_vertically: bool) -> TextureResult<DecodedImage> {
        let img = image::open(path).map_err(|err| TextureError::Decode {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        let img = if flip_vertically { img.flipv() } else { img };
        Ok(DecodedImage::from_dynamic(img))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureDescriptor {
    pub label: String,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub mip_level_count: u32,
}

/// GPU side of the texture registry: allocation, unit binding, release.
///
/// Textures are always sampled with repeat wrapping and linear filtering.
pub trait TextureBackend {
    fn create_texture(
        &mut self,
        desc: &TextureDescriptor,
        pixels: &[u8],
    ) -> TextureResult<TextureId>;

    /// Make `texture` the one sampled through texture unit `unit`.
    fn bind_unit(&mut self, unit: usize, texture: TextureId);

    fn release(&mut self, texture: TextureId);
}

/// Number of mip levels down to 1x1 for the larger dimension.
pub fn calculate_mip_levels(width: u32, height: u32) -> u32 {
    let max_dimension = width.max(height).max(1);
    u32::BITS - max_dimension.leading_zeros()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipLevel {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Levels 1..`mip_level_count` of a mip chain, each half the previous size
/// (clamped to 1). Level 0 is the source itself and is not repeated.
pub fn build_mip_chain(
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: &[u8],
    mip_level_count: u32,
) -> Vec<MipLevel> {
    match format {
        PixelFormat::Rgb8 => downsample::<Rgb<u8>>(width, height, pixels, mip_level_count),
        PixelFormat::Rgba8 => downsample::<Rgba<u8>>(width, height, pixels, mip_level_count),
    }
}

fn downsample<P>(width: u32, height: u32, pixels: &[u8], mip_level_count: u32) -> Vec<MipLevel>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let Some(mut current) = ImageBuffer::<P, Vec<u8>>::from_raw(width, height, pixels.to_vec())
    else {
        log::warn!(
            "Pixel buffer of {} bytes does not match {}x{}; skipping mipmaps",
            pixels.len(),
            width,
            height
        );
        return Vec::new();
    };

    let mut levels = Vec::with_capacity(mip_level_count.saturating_sub(1) as usize);
    for _ in 1..mip_level_count {
        let next_width = (current.width() / 2).max(1);
        let next_height = (current.height() / 2).max(1);
        current = image::imageops::resize(&current, next_width, next_height, FilterType::Triangle);
        levels.push(MipLevel {
            width: next_width,
            height: next_height,
            pixels: current.as_raw().clone(),
        });
    }
    levels
}

/// Expands opaque RGB rows to RGBA with alpha 255.
pub fn expand_rgb_to_rgba(pixels: &[u8]) -> Vec<u8> {
    pixels
        .chunks_exact(3)
        .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 255])
        .collect()
}
