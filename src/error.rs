//! Error types for texture loading and scene descriptions.
//!
//! None of these abort a scene: callers log them and keep going with
//! whatever loaded successfully.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a texture did not make it into the registry.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Could not load image {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("Not implemented to handle image {path:?} with {channels} channels")]
    UnsupportedChannels { path: PathBuf, channels: u8 },
    #[error("Failed to create texture '{tag}': {reason}")]
    Creation { tag: String, reason: String },
    #[error("No free texture unit for '{tag}' (limit {limit})")]
    NoFreeUnit { tag: String, limit: usize },
}

/// Errors raised while reading a scene description file.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene description {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse scene description {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_channels_message_names_the_count() {
        let err = TextureError::UnsupportedChannels {
            path: PathBuf::from("gray.png"),
            channels: 1,
        };
        assert!(err.to_string().contains("1 channels"));
    }
}
