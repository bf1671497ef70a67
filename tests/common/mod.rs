//! Recording doubles for the shader, mesh library, decoder and GPU backend.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use glam::{Mat4, Vec2, Vec3, Vec4};
use scene_composer::renderer::primitives::{BoxSide, CylinderSurfaces, MeshKind, MeshLibrary};
use scene_composer::renderer::shader::{ShaderUniforms, UniformTable, UniformValue};
use scene_composer::renderer::texture::{
    DecodedImage, ImageDecoder, TextureBackend, TextureDescriptor, TextureId,
};
use scene_composer::{TextureError, TextureResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Uniform(String),
    LoadMesh(MeshKind),
    Draw(String),
}

pub type EventLog = Rc<RefCell<Vec<Event>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Uniform names pushed since the last draw, in order.
pub fn uniforms_before_draw(log: &EventLog) -> Vec<String> {
    log.borrow()
        .iter()
        .take_while(|event| !matches!(event, Event::Draw(_)))
        .filter_map(|event| match event {
            Event::Uniform(name) => Some(name.clone()),
            _ => None,
        })
        .collect()
}

/// Shader that keeps the latest value per uniform and logs every write.
pub struct RecordingShader {
    pub log: EventLog,
    pub table: UniformTable,
}

impl RecordingShader {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            table: UniformTable::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.table.get(name)
    }

    fn record(&self, name: &str) {
        self.log.borrow_mut().push(Event::Uniform(name.to_string()));
    }
}

impl ShaderUniforms for RecordingShader {
    fn set_mat4(&mut self, name: &str, value: Mat4) {
        self.record(name);
        self.table.set_mat4(name, value);
    }

    fn set_vec4(&mut self, name: &str, value: Vec4) {
        self.record(name);
        self.table.set_vec4(name, value);
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.record(name);
        self.table.set_vec3(name, value);
    }

    fn set_vec2(&mut self, name: &str, value: Vec2) {
        self.record(name);
        self.table.set_vec2(name, value);
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.record(name);
        self.table.set_float(name, value);
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.record(name);
        self.table.set_int(name, value);
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.record(name);
        self.table.set_bool(name, value);
    }

    fn set_sampler2d(&mut self, name: &str, unit: i32) {
        self.record(name);
        self.table.set_sampler2d(name, unit);
    }
}

pub struct RecordingMeshes {
    pub log: EventLog,
}

impl RecordingMeshes {
    pub fn new(log: EventLog) -> Self {
        Self { log }
    }

    fn draw(&self, what: impl Into<String>) {
        self.log.borrow_mut().push(Event::Draw(what.into()));
    }
}

impl MeshLibrary for RecordingMeshes {
    fn load_mesh(&mut self, kind: MeshKind) {
        self.log.borrow_mut().push(Event::LoadMesh(kind));
    }
    fn draw_plane(&mut self) {
        self.draw("plane");
    }
    fn draw_box(&mut self) {
        self.draw("box");
    }
    fn draw_box_side(&mut self, side: BoxSide) {
        self.draw(format!("box {:?}", side));
    }
    fn draw_sphere(&mut self) {
        self.draw("sphere");
    }
    fn draw_pyramid3(&mut self) {
        self.draw("pyramid3");
    }
    fn draw_pyramid4(&mut self) {
        self.draw("pyramid4");
    }
    fn draw_cylinder(&mut self, surfaces: CylinderSurfaces) {
        self.draw(format!("cylinder {:?}", surfaces));
    }
    fn draw_tapered_cylinder(&mut self, surfaces: CylinderSurfaces) {
        self.draw(format!("tapered cylinder {:?}", surfaces));
    }
    fn draw_torus(&mut self) {
        self.draw("torus");
    }
    fn draw_half_torus(&mut self) {
        self.draw("half torus");
    }
}

/// Decoder keyed by file name. Unknown names decode as 2x2 RGB unless
/// listed in `missing`.
#[derive(Default)]
pub struct FakeDecoder {
    channels: HashMap<String, u8>,
    missing: Vec<String>,
}

impl FakeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channels(mut self, file_name: &str, channels: u8) -> Self {
        self.channels.insert(file_name.to_string(), channels);
        self
    }

    pub fn with_missing(mut self, file_name: &str) -> Self {
        self.missing.push(file_name.to_string());
        self
    }
}

impl ImageDecoder for FakeDecoder {
    fn decode(&self, path: &Path, _flip_vertically: bool) -> TextureResult<DecodedImage> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        if self.missing.contains(&name) {
            return Err(TextureError::Decode {
                path: path.to_path_buf(),
                reason: "No such file or directory".into(),
            });
        }

        let channels = self.channels.get(&name).copied().unwrap_or(3);
        Ok(DecodedImage {
            width: 2,
            height: 2,
            channels,
            pixels: vec![127; 2 * 2 * channels as usize],
        })
    }
}

#[derive(Default)]
pub struct FakeBackend {
    pub created: Vec<TextureDescriptor>,
    pub bound: Vec<(usize, TextureId)>,
    pub released: Vec<TextureId>,
    next_id: u32,
}

impl TextureBackend for FakeBackend {
    fn create_texture(
        &mut self,
        desc: &TextureDescriptor,
        _pixels: &[u8],
    ) -> TextureResult<TextureId> {
        self.created.push(desc.clone());
        self.next_id += 1;
        Ok(TextureId(self.next_id))
    }

    fn bind_unit(&mut self, unit: usize, texture: TextureId) {
        self.bound.push((unit, texture));
    }

    fn release(&mut self, texture: TextureId) {
        self.released.push(texture);
    }
}
