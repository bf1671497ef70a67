// renderer/shader.rs
//
// Named-uniform interface of the shader program the scene draws through.

use std::collections::HashMap;

use glam::{Mat4, Vec2, Vec3, Vec4};

pub const MODEL: &str = "model";
pub const OBJECT_COLOR: &str = "objectColor";
pub const OBJECT_TEXTURE: &str = "objectTexture";
pub const USE_TEXTURE: &str = "bUseTexture";
pub const USE_LIGHTING: &str = "bUseLighting";
pub const UV_SCALE: &str = "UVscale";

pub const MATERIAL_AMBIENT_COLOR: &str = "material.ambientColor";
pub const MATERIAL_AMBIENT_STRENGTH: &str = "material.ambientStrength";
pub const MATERIAL_DIFFUSE_COLOR: &str = "material.diffuseColor";
pub const MATERIAL_SPECULAR_COLOR: &str = "material.specularColor";
pub const MATERIAL_SHININESS: &str = "material.shininess";

/// Sampler value pushed when a texture tag has no slot.
pub const UNBOUND_SLOT: i32 = -1;

/// Fields of one entry of the `lightSources` uniform array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightField {
    Position,
    AmbientColor,
    DiffuseColor,
    SpecularColor,
    FocalStrength,
    SpecularIntensity,
}

impl LightField {
    fn as_str(self) -> &'static str {
        match self {
            LightField::Position => "position",
            LightField::AmbientColor => "ambientColor",
            LightField::DiffuseColor => "diffuseColor",
            LightField::SpecularColor => "specularColor",
            LightField::FocalStrength => "focalStrength",
            LightField::SpecularIntensity => "specularIntensity",
        }
    }
}

/// `lightSources[index].field`
pub fn light_uniform(index: usize, field: LightField) -> String {
    format!("lightSources[{}].{}", index, field.as_str())
}

/// Setter surface of a linked shader program.
///
/// Every write is persistent: a uniform keeps its value until the next
/// write to the same name, across any number of draw calls.
pub trait ShaderUniforms {
    fn set_mat4(&mut self, name: &str, value: Mat4);
    fn set_vec4(&mut self, name: &str, value: Vec4);
    fn set_vec3(&mut self, name: &str, value: Vec3);
    fn set_vec2(&mut self, name: &str, value: Vec2);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_int(&mut self, name: &str, value: i32);
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_sampler2d(&mut self, name: &str, unit: i32);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Mat4(Mat4),
    Vec4(Vec4),
    Vec3(Vec3),
    Vec2(Vec2),
    Float(f32),
    Int(i32),
    Bool(bool),
    Sampler2d(i32),
}

/// CPU-side mirror of a program's uniform state: the latest value per name.
#[derive(Debug, Default, Clone)]
pub struct UniformTable {
    values: HashMap<String, UniformValue>,
    writes: usize,
}

impl UniformTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.values.get(name).copied()
    }

    pub fn mat4(&self, name: &str) -> Option<Mat4> {
        match self.get(name)? {
            UniformValue::Mat4(m) => Some(m),
            _ => None,
        }
    }

    pub fn vec3(&self, name: &str) -> Option<Vec3> {
        match self.get(name)? {
            UniformValue::Vec3(v) => Some(v),
            _ => None,
        }
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            UniformValue::Float(f) => Some(f),
            _ => None,
        }
    }

    /// Distinct uniform names written so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total number of setter calls, including overwrites.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.writes = 0;
    }

    fn store(&mut self, name: &str, value: UniformValue) {
        self.writes += 1;
        self.values.insert(name.to_string(), value);
    }
}

impl ShaderUniforms for UniformTable {
    fn set_mat4(&mut self, name: &str, value: Mat4) {
        self.store(name, UniformValue::Mat4(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vec4) {
        self.store(name, UniformValue::Vec4(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.store(name, UniformValue::Vec3(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vec2) {
        self.store(name, UniformValue::Vec2(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.store(name, UniformValue::Float(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.store(name, UniformValue::Int(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.store(name, UniformValue::Bool(value));
    }

    fn set_sampler2d(&mut self, name: &str, unit: i32) {
        self.store(name, UniformValue::Sampler2d(unit));
    }
}
