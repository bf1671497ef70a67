use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::renderer::lights::MAX_LIGHT_SOURCES;

/// Active texture units guaranteed by the hardware the scene targets.
pub const HARDWARE_TEXTURE_UNITS: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSettings {
    #[serde(default = "SceneSettings::default_max_texture_units")]
    pub max_texture_units: usize,
    #[serde(default = "SceneSettings::default_true")]
    pub flip_vertically: bool,
    #[serde(default = "SceneSettings::default_true")]
    pub generate_mipmaps: bool,
    #[serde(default = "SceneSettings::default_asset_root")]
    pub asset_root: PathBuf,
    #[serde(default = "SceneSettings::default_max_light_sources")]
    pub max_light_sources: usize,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            max_texture_units: Self::default_max_texture_units(),
            flip_vertically: true,
            generate_mipmaps: true,
            asset_root: Self::default_asset_root(),
            max_light_sources: Self::default_max_light_sources(),
        }
    }
}

impl SceneSettings {
    pub fn load() -> Self {
        Self::load_from_path("scene_settings.json")
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        use std::fs;

        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<SceneSettings>(&contents) {
                Ok(settings) => {
                    info!("Loaded scene settings from {:?}", path);
                    settings.validate()
                }
                Err(err) => {
                    warn!(
                        "Failed to parse {:?} ({}). Falling back to default scene settings.",
                        path, err
                    );
                    SceneSettings::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!(
                    "Scene settings file {:?} not found. Using default settings.",
                    path
                );
                SceneSettings::default()
            }
            Err(err) => {
                warn!(
                    "Failed to read {:?} ({}). Falling back to default scene settings.",
                    path, err
                );
                SceneSettings::default()
            }
        }
    }

    /// Resolves a texture path from a scene description against `asset_root`.
    pub fn resolve_asset(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.asset_root.join(path)
        }
    }

    /// Replaces zero limits with defaults and caps both limits at what the
    /// hardware and the shader provide.
    pub(crate) fn validate(mut self) -> Self {
        if self.max_texture_units == 0 {
            warn!("Texture unit limit must be greater than zero. Using default value.");
            self.max_texture_units = Self::default_max_texture_units();
        }

        if self.max_texture_units > HARDWARE_TEXTURE_UNITS {
            warn!(
                "Texture unit limit {} exceeds the {} hardware units. Clamping.",
                self.max_texture_units, HARDWARE_TEXTURE_UNITS
            );
            self.max_texture_units = HARDWARE_TEXTURE_UNITS;
        }

        if self.max_light_sources == 0 {
            warn!("Light source limit must be greater than zero. Using default value.");
            self.max_light_sources = Self::default_max_light_sources();
        }

        if self.max_light_sources > MAX_LIGHT_SOURCES {
            warn!(
                "Light source limit {} exceeds the shader's {} light slots. Clamping.",
                self.max_light_sources, MAX_LIGHT_SOURCES
            );
            self.max_light_sources = MAX_LIGHT_SOURCES;
        }

        self
    }

    const fn default_max_texture_units() -> usize {
        HARDWARE_TEXTURE_UNITS
    }

    const fn default_max_light_sources() -> usize {
        MAX_LIGHT_SOURCES
    }

    const fn default_true() -> bool {
        true
    }

    fn default_asset_root() -> PathBuf {
        PathBuf::from(".")
    }
}
