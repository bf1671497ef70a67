// scene/scene_manager.rs
//
// Owns the registries and the mesh library; prepares a scene once and then
// draws each object as "push state, then draw".

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{TextureError, TextureResult};
use crate::renderer::lights::{push_light_sources, LightSource};
use crate::renderer::primitives::{MeshKind, MeshLibrary, Primitive};
use crate::renderer::shader::ShaderUniforms;
use crate::renderer::texture::{ImageDecoder, TextureBackend};
use crate::scene::binder::ShaderStateBinder;
use crate::scene::description::SceneDescription;
use crate::scene::draw::{DrawState, SceneObject};
use crate::scene::material::{Material, MaterialRegistry};
use crate::scene::texture_registry::{TextureLoadOptions, TextureRegistry};
use crate::settings::SceneSettings;

/// Outcome of [`SceneManager::prepare_scene`]. Failed textures leave the
/// rest of the scene intact.
#[derive(Debug, Default)]
pub struct PrepareReport {
    pub loaded: Vec<String>,
    pub failed: Vec<(String, TextureError)>,
    pub meshes_loaded: Vec<MeshKind>,
    pub lights_pushed: usize,
}

impl PrepareReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct SceneManager<M: MeshLibrary> {
    meshes: M,
    textures: TextureRegistry,
    materials: MaterialRegistry,
    lights: Vec<LightSource>,
    objects: Vec<SceneObject>,
    loaded_meshes: BTreeSet<MeshKind>,
    settings: SceneSettings,
}

impl<M: MeshLibrary> SceneManager<M> {
    /// `settings` are validated first, so the texture unit and light limits
    /// never exceed what the hardware and shader provide.
    pub fn new(meshes: M, settings: SceneSettings) -> Self {
        let settings = settings.validate();
        Self {
            meshes,
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            lights: Vec::new(),
            objects: Vec::new(),
            loaded_meshes: BTreeSet::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn lights(&self) -> &[LightSource] {
        &self.lights
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn meshes(&self) -> &M {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut M {
        &mut self.meshes
    }

    /// Loads every texture, binds them, defines materials, pushes lights and
    /// loads the meshes the objects need. Texture failures are collected in
    /// the report rather than aborting.
    pub fn prepare_scene<D, B, S>(
        &mut self,
        description: SceneDescription,
        decoder: &D,
        backend: &mut B,
        shader: &mut S,
    ) -> PrepareReport
    where
        D: ImageDecoder + ?Sized,
        B: TextureBackend + ?Sized,
        S: ShaderUniforms + ?Sized,
    {
        let mut report = PrepareReport::default();

        for source in &description.textures {
            match self.load_texture(decoder, backend, &source.path, &source.tag) {
                Ok(_) => report.loaded.push(source.tag.clone()),
                Err(err) => {
                    log::debug!("Skipping texture '{}'", source.tag);
                    report.failed.push((source.tag.clone(), err));
                }
            }
        }
        self.bind_textures(backend);

        for material in description.materials {
            self.define_material(material);
        }

        report.lights_pushed =
            self.setup_scene_lights(shader, description.lights, description.use_lighting);

        for object in description.objects {
            self.add_object(object);
        }
        report.meshes_loaded = self.load_meshes();

        log::info!(
            "Prepared scene: {} textures ({} failed), {} materials, {} lights, {} objects",
            report.loaded.len(),
            report.failed.len(),
            self.materials.len(),
            report.lights_pushed,
            self.objects.len()
        );
        report
    }

    /// Loads one texture into the next free unit. `path` is resolved
    /// against the asset root.
    pub fn load_texture<D, B>(
        &mut self,
        decoder: &D,
        backend: &mut B,
        path: &Path,
        tag: &str,
    ) -> TextureResult<usize>
    where
        D: ImageDecoder + ?Sized,
        B: TextureBackend + ?Sized,
    {
        let limit = self.settings.max_texture_units;
        if self.textures.len() >= limit {
            let err = TextureError::NoFreeUnit {
                tag: tag.to_string(),
                limit,
            };
            log::warn!("{}", err);
            return Err(err);
        }

        let path = self.settings.resolve_asset(path);
        self.textures.load(
            decoder,
            backend,
            &path,
            tag,
            TextureLoadOptions::from(&self.settings),
        )
    }

    /// Binds every loaded texture to its unit. Call after the last load and
    /// before the first textured draw.
    pub fn bind_textures<B: TextureBackend + ?Sized>(&self, backend: &mut B) {
        self.textures.bind_all(backend);
    }

    pub fn define_material(&mut self, material: Material) {
        self.materials.define(material);
    }

    /// Pushes the lighting flag and lights to `shader` and keeps the lights.
    /// Returns how many lights the shader received.
    pub fn setup_scene_lights<S: ShaderUniforms + ?Sized>(
        &mut self,
        shader: &mut S,
        lights: Vec<LightSource>,
        use_lighting: bool,
    ) -> usize {
        self.lights = lights;
        push_light_sources(
            shader,
            &self.lights,
            use_lighting,
            self.settings.max_light_sources,
        )
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Loads the mesh of every stored object that is not loaded yet.
    /// Returns the newly loaded kinds.
    pub fn load_meshes(&mut self) -> Vec<MeshKind> {
        let needed: BTreeSet<MeshKind> = self
            .objects
            .iter()
            .map(|object| object.primitive.mesh_kind())
            .collect();

        let mut loaded = Vec::new();
        for kind in needed {
            if self.loaded_meshes.insert(kind) {
                self.meshes.load_mesh(kind);
                loaded.push(kind);
            }
        }
        loaded
    }

    /// Draws every stored object in insertion order.
    pub fn render_scene<S: ShaderUniforms + ?Sized>(&mut self, shader: &mut S) {
        let mut binder = ShaderStateBinder::new(Some(shader), &self.textures, &self.materials);
        for object in &self.objects {
            binder.apply(&object.state);
            object.primitive.draw(&mut self.meshes);
        }
    }

    /// Pushes `state` in full and then draws `primitive`.
    pub fn draw<S: ShaderUniforms + ?Sized>(
        &mut self,
        shader: &mut S,
        state: &DrawState,
        primitive: Primitive,
    ) {
        let kind = primitive.mesh_kind();
        if !self.loaded_meshes.contains(&kind) {
            log::debug!("Drawing {:?} before its mesh was loaded", kind);
        }

        ShaderStateBinder::new(Some(shader), &self.textures, &self.materials).apply(state);
        primitive.draw(&mut self.meshes);
    }

    /// Low-level state setters sharing this scene's registries.
    pub fn binder<'a, S: ShaderUniforms + ?Sized>(
        &'a self,
        shader: Option<&'a mut S>,
    ) -> ShaderStateBinder<'a, S> {
        ShaderStateBinder::new(shader, &self.textures, &self.materials)
    }

    /// Releases every texture object. The scene's textures can then be
    /// loaded again from scratch.
    pub fn destroy_textures<B: TextureBackend + ?Sized>(&mut self, backend: &mut B) {
        let count = self.textures.len();
        self.textures.release_all(backend);
        log::info!("Released {} textures", count);
    }
}
