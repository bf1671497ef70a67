// renderer/lights.rs
//
// Point lights consumed by the scene shader's `lightSources` array.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::renderer::shader::{light_uniform, LightField, ShaderUniforms, USE_LIGHTING};

/// Length of the `lightSources` array compiled into the scene shader.
pub const MAX_LIGHT_SOURCES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSource {
    pub position: Vec3,
    pub ambient_color: Vec3,
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    pub focal_strength: f32,
    pub specular_intensity: f32,
}

impl Default for LightSource {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            ambient_color: Vec3::ZERO,
            diffuse_color: Vec3::ONE,
            specular_color: Vec3::ZERO,
            focal_strength: 32.0,
            specular_intensity: 0.0,
        }
    }
}

impl LightSource {
    pub fn push(&self, shader: &mut (impl ShaderUniforms + ?Sized), index: usize) {
        shader.set_vec3(&light_uniform(index, LightField::Position), self.position);
        shader.set_vec3(
            &light_uniform(index, LightField::AmbientColor),
            self.ambient_color,
        );
        shader.set_vec3(
            &light_uniform(index, LightField::DiffuseColor),
            self.diffuse_color,
        );
        shader.set_vec3(
            &light_uniform(index, LightField::SpecularColor),
            self.specular_color,
        );
        shader.set_float(
            &light_uniform(index, LightField::FocalStrength),
            self.focal_strength,
        );
        shader.set_float(
            &light_uniform(index, LightField::SpecularIntensity),
            self.specular_intensity,
        );
    }
}

/// Pushes `bUseLighting` and then each light at its array index. Lights past
/// `max` have no slot in the shader and are dropped.
///
/// Returns how many lights were pushed.
pub fn push_light_sources(
    shader: &mut (impl ShaderUniforms + ?Sized),
    lights: &[LightSource],
    use_lighting: bool,
    max: usize,
) -> usize {
    shader.set_bool(USE_LIGHTING, use_lighting);

    if lights.len() > max {
        log::warn!(
            "Scene defines {} light sources but the shader holds {}; dropping the rest",
            lights.len(),
            max
        );
    }

    let pushed = lights.len().min(max);
    for (index, light) in lights.iter().take(pushed).enumerate() {
        light.push(shader, index);
    }
    pushed
}
