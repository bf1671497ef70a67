pub mod error;
pub mod renderer;
pub mod scene;
pub mod settings;

pub use error::{SceneError, TextureError, TextureResult};
pub use settings::SceneSettings;

/// Installs `env_logger` with an `info` default. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}
