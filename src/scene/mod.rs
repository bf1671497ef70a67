// scene/mod.rs

pub mod binder;
pub mod description;
pub mod draw;
pub mod material;
pub mod scene_manager;
pub mod texture_registry;
pub mod transform;

// Re-export commonly used types
pub use binder::ShaderStateBinder;
pub use description::{SceneDescription, TextureSource};
pub use draw::{DrawState, DrawStateBuilder, SceneObject, Surface};
pub use material::{Material, MaterialRegistry};
pub use scene_manager::{PrepareReport, SceneManager};
pub use texture_registry::{TextureEntry, TextureLoadOptions, TextureRegistry};
pub use transform::Transform;
