// scene/description.rs
//
// JSON description of a whole scene: textures, materials, lights and the
// objects to draw.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SceneError;
use crate::renderer::lights::LightSource;
use crate::scene::draw::SceneObject;
use crate::scene::material::Material;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureSource {
    pub tag: String,
    /// Relative paths resolve against the configured asset root.
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub use_lighting: bool,
    pub textures: Vec<TextureSource>,
    pub materials: Vec<Material>,
    pub lights: Vec<LightSource>,
    pub objects: Vec<SceneObject>,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            use_lighting: true,
            textures: Vec::new(),
            materials: Vec::new(),
            lights: Vec::new(),
            objects: Vec::new(),
        }
    }
}

impl SceneDescription {
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let description = Self::from_json(&contents).map_err(|source| SceneError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!(
            "Loaded scene description {:?}: {} textures, {} materials, {} lights, {} objects",
            path,
            description.textures.len(),
            description.materials.len(),
            description.lights.len(),
            description.objects.len()
        );
        Ok(description)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::primitives::{CylinderSurfaces, Primitive};

    #[test]
    fn empty_object_gives_lit_empty_scene() {
        let description = SceneDescription::from_json("{}").unwrap();
        assert_eq!(description, SceneDescription::default());
        assert!(description.use_lighting);
    }

    #[test]
    fn parses_textures_and_objects() {
        let description = SceneDescription::from_json(
            r#"{
                "use_lighting": false,
                "textures": [{ "tag": "cantop", "path": "textures/cantop.jpg" }],
                "objects": [{
                    "name": "can lid",
                    "primitive": { "kind": "cylinder", "surfaces": "TOP" },
                    "state": { "surface": { "texture": { "tag": "cantop" } } }
                }]
            }"#,
        )
        .unwrap();

        assert!(!description.use_lighting);
        assert_eq!(description.textures[0].path, PathBuf::from("textures/cantop.jpg"));
        assert_eq!(
            description.objects[0].primitive,
            Primitive::Cylinder {
                surfaces: CylinderSurfaces::TOP
            }
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SceneDescription::load_from_path("no/such/scene.json").unwrap_err();
        assert!(matches!(err, SceneError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let path = std::env::temp_dir().join(format!(
            "scene_composer_bad_{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ \"objects\": 3 }").unwrap();

        let err = SceneDescription::load_from_path(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, SceneError::Parse { .. }));
    }
}
