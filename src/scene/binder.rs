// scene/binder.rs
//
// Pushes per-draw uniform state ahead of a mesh draw. Every write persists
// in the shader until overwritten, so callers that use the individual
// setters must repeat each of them for every object, in the order
// transform, color or texture, UV scale, material. `apply` does all of it.

use glam::{Vec2, Vec3, Vec4};

use crate::renderer::shader::{
    ShaderUniforms, OBJECT_COLOR, OBJECT_TEXTURE, UNBOUND_SLOT, USE_TEXTURE, UV_SCALE,
};
use crate::scene::draw::{DrawState, Surface};
use crate::scene::material::{Material, MaterialRegistry};
use crate::scene::texture_registry::TextureRegistry;
use crate::scene::Transform;

/// Without a shader every operation is a no-op.
pub struct ShaderStateBinder<'a, S: ShaderUniforms + ?Sized> {
    shader: Option<&'a mut S>,
    textures: &'a TextureRegistry,
    materials: &'a MaterialRegistry,
}

impl<'a, S: ShaderUniforms + ?Sized> ShaderStateBinder<'a, S> {
    pub fn new(
        shader: Option<&'a mut S>,
        textures: &'a TextureRegistry,
        materials: &'a MaterialRegistry,
    ) -> Self {
        Self {
            shader,
            textures,
            materials,
        }
    }

    pub fn has_shader(&self) -> bool {
        self.shader.is_some()
    }

    /// Composes and pushes the model matrix. Angles are in degrees.
    pub fn set_transformations(
        &mut self,
        scale: Vec3,
        x_degrees: f32,
        y_degrees: f32,
        z_degrees: f32,
        position: Vec3,
    ) {
        self.set_transform(&Transform::new(
            scale,
            Vec3::new(x_degrees, y_degrees, z_degrees),
            position,
        ));
    }

    pub fn set_transform(&mut self, transform: &Transform) {
        if let Some(shader) = self.shader.as_deref_mut() {
            transform.push(shader);
        }
    }

    pub fn set_color(&mut self, rgba: Vec4) {
        if let Some(shader) = self.shader.as_deref_mut() {
            shader.set_int(USE_TEXTURE, 0);
            shader.set_vec4(OBJECT_COLOR, rgba);
        }
    }

    /// Selects the texture tagged `tag`. An unknown tag still switches to
    /// texture mode and pushes slot -1.
    pub fn set_texture(&mut self, tag: &str) {
        let Some(shader) = self.shader.as_deref_mut() else {
            return;
        };

        let slot = self
            .textures
            .find_slot(tag)
            .and_then(|slot| i32::try_from(slot).ok())
            .unwrap_or(UNBOUND_SLOT);
        if slot == UNBOUND_SLOT {
            log::warn!("Texture '{}' is not loaded; sampling slot {}", tag, slot);
        }

        shader.set_int(USE_TEXTURE, 1);
        shader.set_sampler2d(OBJECT_TEXTURE, slot);
    }

    pub fn set_uv_scale(&mut self, u: f32, v: f32) {
        if let Some(shader) = self.shader.as_deref_mut() {
            shader.set_vec2(UV_SCALE, Vec2::new(u, v));
        }
    }

    /// Pushes the material tagged `tag`. On a miss nothing is written and
    /// the previous material stays in effect. Returns whether it was pushed.
    pub fn set_material(&mut self, tag: &str) -> bool {
        let Some(shader) = self.shader.as_deref_mut() else {
            return false;
        };

        match self.materials.resolve(tag) {
            Some(material) => {
                material.push(shader);
                true
            }
            None => false,
        }
    }

    /// Pushes the whole state in draw order. A missing or unknown material
    /// falls back to [`Material::neutral`] so nothing carries over from the
    /// previous object.
    pub fn apply(&mut self, state: &DrawState) {
        if self.shader.is_none() {
            return;
        }

        self.set_transform(&state.transform);

        match &state.surface {
            Surface::Color(rgba) => {
                self.set_color(*rgba);
                self.set_uv_scale(1.0, 1.0);
            }
            Surface::Texture { tag, uv_scale } => {
                self.set_texture(tag);
                self.set_uv_scale(uv_scale.x, uv_scale.y);
            }
        }

        let pushed = match state.material.as_deref() {
            Some(tag) => self.set_material(tag),
            None => false,
        };
        if !pushed {
            if let Some(shader) = self.shader.as_deref_mut() {
                Material::neutral().push(shader);
            }
        }
    }
}
