// scene/draw.rs
//
// Complete per-draw state, built up front and pushed in one go.

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::renderer::primitives::Primitive;
use crate::scene::Transform;

/// How the fragment color is sourced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Flat RGBA color.
    Color(Vec4),
    /// Texture looked up by tag, coordinates multiplied by `uv_scale`.
    Texture {
        tag: String,
        #[serde(default = "default_uv_scale")]
        uv_scale: Vec2,
    },
}

impl Default for Surface {
    fn default() -> Self {
        Surface::Color(Vec4::ONE)
    }
}

fn default_uv_scale() -> Vec2 {
    Vec2::ONE
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawState {
    pub transform: Transform,
    pub surface: Surface,
    pub material: Option<String>,
}

impl DrawState {
    pub fn builder() -> DrawStateBuilder {
        DrawStateBuilder::default()
    }
}

/// Fluent construction of a [`DrawState`]. A texture, when given, takes
/// precedence over a color.
#[derive(Debug, Clone)]
pub struct DrawStateBuilder {
    transform: Transform,
    color: Vec4,
    texture: Option<String>,
    uv_scale: Vec2,
    material: Option<String>,
}

impl Default for DrawStateBuilder {
    fn default() -> Self {
        Self {
            transform: Transform::default(),
            color: Vec4::ONE,
            texture: None,
            uv_scale: Vec2::ONE,
            material: None,
        }
    }
}

impl DrawStateBuilder {
    pub fn scale(mut self, scale: Vec3) -> Self {
        self.transform.scale = scale;
        self
    }

    /// Degrees about X, Y and Z.
    pub fn rotation(mut self, degrees: Vec3) -> Self {
        self.transform.rotation_degrees = degrees;
        self
    }

    pub fn position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn color(mut self, rgba: Vec4) -> Self {
        self.color = rgba;
        self
    }

    pub fn texture(mut self, tag: impl Into<String>) -> Self {
        self.texture = Some(tag.into());
        self
    }

    pub fn uv_scale(mut self, u: f32, v: f32) -> Self {
        self.uv_scale = Vec2::new(u, v);
        self
    }

    pub fn material(mut self, tag: impl Into<String>) -> Self {
        self.material = Some(tag.into());
        self
    }

    pub fn build(self) -> DrawState {
        let surface = match self.texture {
            Some(tag) => Surface::Texture {
                tag,
                uv_scale: self.uv_scale,
            },
            None => Surface::Color(self.color),
        };

        DrawState {
            transform: self.transform,
            surface,
            material: self.material,
        }
    }
}

/// A named primitive drawn with a fixed state every frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub primitive: Primitive,
    #[serde(default)]
    pub state: DrawState,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, primitive: Primitive, state: DrawState) -> Self {
        Self {
            name: name.into(),
            primitive,
            state,
        }
    }
}
