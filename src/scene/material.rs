// scene/material.rs (Phong presets)

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::renderer::shader::{
    ShaderUniforms, MATERIAL_AMBIENT_COLOR, MATERIAL_AMBIENT_STRENGTH, MATERIAL_DIFFUSE_COLOR,
    MATERIAL_SHININESS, MATERIAL_SPECULAR_COLOR,
};

/// Named surface response preset. Immutable once defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub tag: String,
    #[serde(default = "Material::default_color")]
    pub ambient_color: Vec3,
    /// 0.0-1.0
    #[serde(default = "Material::default_ambient_strength")]
    pub ambient_strength: f32,
    #[serde(default = "Material::default_color")]
    pub diffuse_color: Vec3,
    #[serde(default)]
    pub specular_color: Vec3,
    /// Non-negative.
    #[serde(default = "Material::default_shininess")]
    pub shininess: f32,
}

impl Material {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::neutral()
        }
    }

    /// Flat white diffuse, faint ambient, no highlight. Pushed in place of a
    /// material that could not be resolved.
    pub fn neutral() -> Self {
        Self {
            tag: String::new(),
            ambient_color: Vec3::ONE,
            ambient_strength: 0.2,
            diffuse_color: Vec3::ONE,
            specular_color: Vec3::ZERO,
            shininess: 1.0,
        }
    }

    pub fn with_ambient(mut self, color: Vec3, strength: f32) -> Self {
        self.ambient_color = color;
        self.ambient_strength = strength.clamp(0.0, 1.0);
        self
    }

    pub fn with_diffuse(mut self, color: Vec3) -> Self {
        self.diffuse_color = color;
        self
    }

    pub fn with_specular(mut self, color: Vec3) -> Self {
        self.specular_color = color;
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess.max(0.0);
        self
    }

    /// Writes all five `material.*` uniforms.
    pub fn push(&self, shader: &mut (impl ShaderUniforms + ?Sized)) {
        shader.set_vec3(MATERIAL_AMBIENT_COLOR, self.ambient_color);
        shader.set_float(MATERIAL_AMBIENT_STRENGTH, self.ambient_strength);
        shader.set_vec3(MATERIAL_DIFFUSE_COLOR, self.diffuse_color);
        shader.set_vec3(MATERIAL_SPECULAR_COLOR, self.specular_color);
        shader.set_float(MATERIAL_SHININESS, self.shininess);
    }

    /// Brings `ambient_strength` into 0.0-1.0 and `shininess` to at least
    /// zero, warning when a value had to change.
    fn clamped(mut self) -> Self {
        let strength = self.ambient_strength.clamp(0.0, 1.0);
        if strength != self.ambient_strength {
            log::warn!(
                "Material '{}' ambient strength {} is outside 0-1; using {}",
                self.tag,
                self.ambient_strength,
                strength
            );
            self.ambient_strength = strength;
        }

        let shininess = self.shininess.max(0.0);
        if shininess != self.shininess {
            log::warn!(
                "Material '{}' shininess {} is negative; using {}",
                self.tag,
                self.shininess,
                shininess
            );
            self.shininess = shininess;
        }

        self
    }

    fn default_color() -> Vec3 {
        Vec3::ONE
    }

    fn default_ambient_strength() -> f32 {
        Self::neutral().ambient_strength
    }

    fn default_shininess() -> f32 {
        Self::neutral().shininess
    }
}

/// Catalog of materials looked up by tag. When a tag is defined twice the
/// first definition wins and the later one is unreachable.
#[derive(Debug, Default, Clone)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
    by_tag: HashMap<String, usize>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `material`, clamping out-of-range values the same way the
    /// `with_*` builders do.
    pub fn define(&mut self, material: Material) {
        let material = material.clamped();
        let index = self.materials.len();
        let first = *self.by_tag.entry(material.tag.clone()).or_insert(index);
        if first != index {
            log::warn!(
                "Material '{}' is already defined; the new definition is shadowed",
                material.tag
            );
        }
        self.materials.push(material);
    }

    pub fn resolve(&self, tag: &str) -> Option<&Material> {
        let found = self.by_tag.get(tag).map(|&i| &self.materials[i]);
        if found.is_none() {
            log::debug!("No material tagged '{}'", tag);
        }
        found
    }

    /// Number of definitions, shadowed duplicates included.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.iter()
    }

    pub fn clear(&mut self) {
        self.materials.clear();
        self.by_tag.clear();
    }
}
