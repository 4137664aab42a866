//! Centralized viewer options with TOML preset support.
//!
//! Camera limits and sensitivities, click/drag tuning, the shape layout and
//! keybindings are consolidated here. Options serialize to/from TOML; the
//! UI-exposed subset is described by a JSON schema for slider panels.

mod camera;
mod interaction;
mod keybindings;
mod scene;

use std::path::Path;

pub use camera::{CameraOptions, TiltModifier};
pub use interaction::InteractionOptions;
pub use keybindings::KeybindingOptions;
pub use scene::{SceneOptions, ShapeOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::OrbitError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection, orbit limits and drag sensitivities.
    pub camera: CameraOptions,
    /// Click/drag disambiguation and hover feedback.
    pub interaction: InteractionOptions,
    /// Shapes in the scene.
    #[schemars(skip)]
    pub scene: SceneOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// The UI schema as pretty-printed JSON, for slider panels.
    pub fn schema_json() -> Result<String, OrbitError> {
        serde_json::to_string_pretty(&Self::json_schema())
            .map_err(|e| OrbitError::OptionsParse(e.to_string()))
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, OrbitError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| OrbitError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        Ok(options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, OrbitError> {
        let content = std::fs::read_to_string(path).map_err(OrbitError::Io)?;
        let options = Self::from_toml_str(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), OrbitError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrbitError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrbitError::Io)?;
        }
        std::fs::write(path, content).map_err(OrbitError::Io)
    }
}
