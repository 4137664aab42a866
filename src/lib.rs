// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Orbit/tilt camera rig with screen-anchored selection popups.
//!
//! Orbitview drives a perspective camera around a target from pointer and
//! wheel input, and keeps an info popup pinned to the on-screen position of
//! the selected shape as the camera moves.
//!
//! # Key entry points
//!
//! - [`OrbitViewer`] - owns the rig, projector, scene and selection
//! - [`camera::CameraRig`] - pointer-driven orbit/tilt camera
//! - [`camera::ScreenProjector`] - world-to-screen anchor projection
//! - [`input::InputSource`] - injected event sources with scoped
//!   subscriptions
//! - [`Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Everything runs on one thread. Raw events become [`InputEvent`]s, the
//! [`input::InputProcessor`] turns them into [`ViewerCommand`]s, and the
//! viewer applies each command synchronously. A frame tick animates the
//! shapes, re-places the camera and re-projects the popup anchor.

pub mod camera;
pub mod engine;
mod error;
pub mod input;
pub mod options;
pub mod scene;
pub mod selection;
pub mod util;
#[cfg(feature = "viewer")]
mod viewer;
/// Browser canvas input source.
#[cfg(feature = "web")]
pub mod web;

pub use camera::Viewport;
pub use engine::{OrbitViewer, ViewerCommand};
pub use error::OrbitError;
pub use input::{InputEvent, Modifiers, MouseButton};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
