// renderer/gpu.rs
//
// wgpu-backed texture objects and the fixed table of texture units the
// scene shader samples from.

use crate::error::{TextureError, TextureResult};
use crate::renderer::texture::{
    build_mip_chain, expand_rgb_to_rgba, PixelFormat, TextureBackend, TextureDescriptor,
    TextureId,
};

/// Storage format for every scene texture. Texels are sampled as stored,
/// with no sRGB decode. wgpu has no three-channel format, so opaque RGB
/// data is widened to RGBA on upload.
const SCENE_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

#[derive(Debug)]
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

pub struct WgpuTextureBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,
    textures: Vec<Option<GpuTexture>>,
    units: Vec<Option<TextureId>>,
    fallback: GpuTexture,
}

impl WgpuTextureBackend {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue, unit_count: usize) -> Self {
        let fallback = upload_rgba(
            &device,
            &queue,
            "Unbound Texture Unit",
            1,
            1,
            &[255, 255, 255, 255],
            1,
        );

        Self {
            device,
            queue,
            textures: Vec::new(),
            units: vec![None; unit_count],
            fallback,
        }
    }

    pub fn texture(&self, id: TextureId) -> Option<&GpuTexture> {
        self.textures.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn bound_texture(&self, unit: usize) -> Option<TextureId> {
        self.units.get(unit).copied().flatten()
    }

    /// Layout with one (texture, sampler) pair per unit: unit `i` uses
    /// bindings `2 * i` and `2 * i + 1`.
    pub fn bind_group_layout(&self) -> wgpu::BindGroupLayout {
        let entries: Vec<_> = (0..self.units.len() as u32)
            .flat_map(|unit| {
                [
                    wgpu::BindGroupLayoutEntry {
                        binding: unit * 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: unit * 2 + 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ]
            })
            .collect();

        self.device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Texture Units Layout"),
                entries: &entries,
            })
    }

    /// Bind group over all units; unbound units sample a 1x1 white texture.
    pub fn bind_group(&self, layout: &wgpu::BindGroupLayout) -> wgpu::BindGroup {
        let entries: Vec<_> = self
            .units
            .iter()
            .enumerate()
            .flat_map(|(unit, bound)| {
                let texture = bound
                    .and_then(|id| self.texture(id))
                    .unwrap_or(&self.fallback);
                let unit = unit as u32;
                [
                    wgpu::BindGroupEntry {
                        binding: unit * 2,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: unit * 2 + 1,
                        resource: wgpu::BindingResource::Sampler(&texture.sampler),
                    },
                ]
            })
            .collect();

        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Units"),
            layout,
            entries: &entries,
        })
    }
}

impl TextureBackend for WgpuTextureBackend {
    fn create_texture(
        &mut self,
        desc: &TextureDescriptor,
        pixels: &[u8],
    ) -> TextureResult<TextureId> {
        let expected = desc.width as usize
            * desc.height as usize
            * desc.format.bytes_per_pixel() as usize;
        if desc.width == 0 || desc.height == 0 || pixels.len() != expected {
            return Err(TextureError::Creation {
                tag: desc.label.clone(),
                reason: format!(
                    "{} bytes for a {}x{} {:?} image (expected {})",
                    pixels.len(),
                    desc.width,
                    desc.height,
                    desc.format,
                    expected
                ),
            });
        }

        let rgba = match desc.format {
            PixelFormat::Rgb8 => expand_rgb_to_rgba(pixels),
            PixelFormat::Rgba8 => pixels.to_vec(),
        };

        let texture = upload_rgba(
            &self.device,
            &self.queue,
            &desc.label,
            desc.width,
            desc.height,
            &rgba,
            desc.mip_level_count.max(1),
        );

        let id = TextureId(self.textures.len() as u32);
        self.textures.push(Some(texture));
        Ok(id)
    }

    fn bind_unit(&mut self, unit: usize, texture: TextureId) {
        match self.units.get_mut(unit) {
            Some(slot) => *slot = Some(texture),
            None => log::warn!(
                "Texture unit {} is out of range ({} units); {:?} not bound",
                unit,
                self.units.len(),
                texture
            ),
        }
    }

    fn release(&mut self, texture: TextureId) {
        if let Some(gpu) = self
            .textures
            .get_mut(texture.0 as usize)
            .and_then(Option::take)
        {
            gpu.texture.destroy();
        }

        for unit in self.units.iter_mut() {
            if *unit == Some(texture) {
                *unit = None;
            }
        }
    }
}

fn upload_rgba(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    width: u32,
    height: u32,
    rgba: &[u8],
    mip_level_count: u32,
) -> GpuTexture {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: SCENE_TEXTURE_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    write_level(queue, &texture, 0, width, height, rgba);
    for (level, mip) in build_mip_chain(width, height, PixelFormat::Rgba8, rgba, mip_level_count)
        .iter()
        .enumerate()
    {
        write_level(
            queue,
            &texture,
            level as u32 + 1,
            mip.width,
            mip.height,
            &mip.pixels,
        );
    }

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    });

    GpuTexture {
        texture,
        view,
        sampler,
    }
}

fn write_level(
    queue: &wgpu::Queue,
    texture: &wgpu::Texture,
    mip_level: u32,
    width: u32,
    height: u32,
    rgba: &[u8],
) {
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
}
