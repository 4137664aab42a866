use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use web_time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Interaction", inline)]
#[serde(default)]
/// Click/drag disambiguation and hover feedback parameters.
pub struct InteractionOptions {
    /// Cumulative pointer travel (pixels) after which a press counts as a
    /// drag rather than a click.
    #[schemars(title = "Drag Threshold", range(min = 0.0, max = 20.0), extend("step" = 0.5))]
    pub drag_threshold_px: f32,
    /// A press released within this many milliseconds without dragging is
    /// a click on empty space.
    #[schemars(title = "Click Timeout", range(min = 50, max = 1000))]
    pub click_timeout_ms: u64,
    /// Uniform scale applied to the hovered shape.
    #[schemars(title = "Hover Scale", range(min = 1.0, max = 1.5), extend("step" = 0.01))]
    pub hover_scale: f32,
    /// Emissive intensity of the hovered shape.
    #[schemars(skip)]
    pub hover_emissive: f32,
    /// Emissive intensity of shapes that are not hovered.
    #[schemars(skip)]
    pub idle_emissive: f32,
}

impl InteractionOptions {
    /// Click timeout as a [`Duration`].
    #[must_use]
    pub fn click_timeout(&self) -> Duration {
        Duration::from_millis(self.click_timeout_ms)
    }
}

impl Default for InteractionOptions {
    fn default() -> Self {
        Self {
            drag_threshold_px: 3.0,
            click_timeout_ms: 200,
            hover_scale: 1.1,
            hover_emissive: 0.4,
            idle_emissive: 0.1,
        }
    }
}
