//! Input handling: event types, drag tracking, input sources, and the
//! processor that converts raw events into viewer commands.

/// Press/move/release tracking and click classification.
pub mod drag;
/// Platform-agnostic input events.
pub mod event;
/// Bindable keyboard actions.
pub mod keyboard;
/// Converts raw events into viewer commands.
pub mod processor;
/// Subscribable event sources.
pub mod source;

pub use drag::{DragOutcome, DragSession};
pub use event::{ClickEvent, InputEvent, Modifiers, MouseButton};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
pub use source::{InputSource, Listener, Subscription, SyntheticInput};
