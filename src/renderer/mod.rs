pub mod gpu;
pub mod lights;
pub mod primitives;
pub mod shader;
pub mod texture;

pub use gpu::{GpuTexture, WgpuTextureBackend};
pub use lights::{push_light_sources, LightSource, MAX_LIGHT_SOURCES};
pub use primitives::{BoxSide, CylinderSurfaces, MeshKind, MeshLibrary, Primitive};
pub use shader::{ShaderUniforms, UniformTable, UniformValue};
pub use texture::{
    DecodedImage, ImageDecoder, ImageFileDecoder, PixelFormat, TextureBackend, TextureDescriptor,
    TextureId,
};
