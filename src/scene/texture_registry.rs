// scene/texture_registry.rs
//
// Tagged textures, each owning the texture unit equal to its load order.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{TextureError, TextureResult};
use crate::renderer::texture::{
    calculate_mip_levels, ImageDecoder, PixelFormat, TextureBackend, TextureDescriptor, TextureId,
};
use crate::settings::SceneSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureLoadOptions {
    pub flip_vertically: bool,
    pub generate_mipmaps: bool,
}

impl Default for TextureLoadOptions {
    fn default() -> Self {
        Self {
            flip_vertically: true,
            generate_mipmaps: true,
        }
    }
}

impl From<&SceneSettings> for TextureLoadOptions {
    fn from(settings: &SceneSettings) -> Self {
        Self {
            flip_vertically: settings.flip_vertically,
            generate_mipmaps: settings.generate_mipmaps,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureEntry {
    pub handle: TextureId,
    pub tag: String,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

#[derive(Debug, Default)]
pub struct TextureRegistry {
    entries: Vec<TextureEntry>,
    by_tag: HashMap<String, usize>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `path`, uploads it and registers it under `tag` at the next
    /// slot. Returns that slot. On failure nothing is registered and the
    /// error is logged before it is returned.
    pub fn load<D, B>(
        &mut self,
        decoder: &D,
        backend: &mut B,
        path: &Path,
        tag: &str,
        options: TextureLoadOptions,
    ) -> TextureResult<usize>
    where
        D: ImageDecoder + ?Sized,
        B: TextureBackend + ?Sized,
    {
        self.try_load(decoder, backend, path, tag, options)
            .inspect_err(|err| log::warn!("Could not load texture '{}': {}", tag, err))
    }

    fn try_load<D, B>(
        &mut self,
        decoder: &D,
        backend: &mut B,
        path: &Path,
        tag: &str,
        options: TextureLoadOptions,
    ) -> TextureResult<usize>
    where
        D: ImageDecoder + ?Sized,
        B: TextureBackend + ?Sized,
    {
        let image = decoder.decode(path, options.flip_vertically)?;

        let format = PixelFormat::from_channels(image.channels).ok_or_else(|| {
            TextureError::UnsupportedChannels {
                path: path.to_path_buf(),
                channels: image.channels,
            }
        })?;

        let mip_level_count = if options.generate_mipmaps {
            calculate_mip_levels(image.width, image.height)
        } else {
            1
        };

        let handle = backend.create_texture(
            &TextureDescriptor {
                label: tag.to_string(),
                width: image.width,
                height: image.height,
                format,
                mip_level_count,
            },
            &image.pixels,
        )?;

        log::info!(
            "Loaded texture '{}' from {:?} ({}x{}, {} channels)",
            tag,
            path,
            image.width,
            image.height,
            image.channels
        );

        let slot = self.entries.len();
        if self.by_tag.contains_key(tag) {
            log::warn!(
                "Texture tag '{}' is already registered; slot {} is unreachable by tag",
                tag,
                slot
            );
        } else {
            self.by_tag.insert(tag.to_string(), slot);
        }

        self.entries.push(TextureEntry {
            handle,
            tag: tag.to_string(),
            width: image.width,
            height: image.height,
            format,
        });
        Ok(slot)
    }

    /// Binds each texture to the unit matching its slot, in load order.
    pub fn bind_all<B: TextureBackend + ?Sized>(&self, backend: &mut B) {
        for (slot, entry) in self.entries.iter().enumerate() {
            backend.bind_unit(slot, entry.handle);
        }
    }

    pub fn find_handle(&self, tag: &str) -> Option<TextureId> {
        self.find_slot(tag).map(|slot| self.entries[slot].handle)
    }

    pub fn find_slot(&self, tag: &str) -> Option<usize> {
        let slot = self.by_tag.get(tag).copied();
        if slot.is_none() {
            log::debug!("No texture tagged '{}'", tag);
        }
        slot
    }

    /// Releases every texture object and empties the registry.
    pub fn release_all<B: TextureBackend + ?Sized>(&mut self, backend: &mut B) {
        for entry in self.entries.drain(..) {
            backend.release(entry.handle);
        }
        self.by_tag.clear();
    }

    /// Successful loads so far, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }
}
