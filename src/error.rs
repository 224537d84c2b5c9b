//! Error types for the hub
//!
//! Gameplay never produces errors: collisions, wrong guesses and the quit
//! signal are all ordinary state transitions. What is left is the SDL
//! backend failing and a config file that cannot be read.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubError {
    /// SDL initialisation or window/canvas creation failed
    #[error("SDL error: {0}")]
    Sdl(String),

    /// A draw call was rejected by the renderer
    #[error("render error: {0}")]
    Render(String),

    #[error("failed to read config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type HubResult<T> = Result<T, HubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        let err = HubError::Render("Invalid renderer".to_string());
        assert_eq!(err.to_string(), "render error: Invalid renderer");
    }

    #[test]
    fn test_config_parse_error_mentions_path() {
        let source = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = HubError::ConfigParse {
            path: PathBuf::from("/tmp/hub.json"),
            source,
        };
        assert!(err.to_string().contains("/tmp/hub.json"));
    }
}
