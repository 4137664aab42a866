//! The viewer orchestrator: camera rig, popup projector, scene and
//! selection wired to one input stream and one frame tick.

pub mod command;
mod input;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub use command::ViewerCommand;

use crate::camera::{Camera, CameraRig, ScreenPoint, ScreenProjector, Viewport};
use crate::input::{InputProcessor, InputSource, Subscription};
use crate::options::Options;
use crate::scene::Scene;
use crate::selection::{Selection, SelectionState};
use crate::util::frame_timing::FrameClock;

/// Orbit viewer state for one render surface.
///
/// Pure state machine: it never reads the clock itself. Input timestamps are
/// passed to [`handle_input`](Self::handle_input) and frame deltas to
/// [`frame`](Self::frame).
///
/// ```
/// # use orbitview::{OrbitViewer, Options, Viewport, InputEvent};
/// let viewport = Viewport::new(1280, 720);
/// let mut viewer = OrbitViewer::new(Options::default(), viewport);
/// let now = web_time::Instant::now();
/// let _ = viewer.handle_input(&InputEvent::Scroll { delta: 1.0 }, now);
/// let popup = viewer.frame(1.0 / 60.0);
/// assert!(popup.is_none());
/// ```
#[derive(Debug)]
pub struct OrbitViewer {
    options: Options,
    rig: CameraRig,
    projector: ScreenProjector,
    selection: SelectionState,
    scene: Scene,
    input: InputProcessor,
    viewport: Viewport,
    clock: FrameClock,
}

impl OrbitViewer {
    /// Build a viewer for a surface of `viewport` pixels.
    #[must_use]
    pub fn new(options: Options, viewport: Viewport) -> Self {
        let rig =
            CameraRig::new(&options.camera, &options.interaction, viewport);
        let scene = Scene::from_options(&options.scene);
        let input = InputProcessor::with_bindings(
            options.keybindings.clone(),
            options.camera.tilt_modifier,
        );
        log::info!(
            "viewer ready: {}x{}, {} shapes, distance {:.1}",
            viewport.width,
            viewport.height,
            scene.len(),
            rig.pose().distance(),
        );

        Self {
            options,
            rig,
            projector: ScreenProjector::new(),
            selection: SelectionState::new(),
            scene,
            input,
            viewport,
            clock: FrameClock::new(),
        }
    }

    /// Apply new options. A changed shape layout rebuilds the scene and
    /// closes the popup.
    pub fn set_options(&mut self, options: Options) {
        self.rig.apply_options(&options.camera, &options.interaction);
        self.input.reconfigure(
            options.keybindings.clone(),
            options.camera.tilt_modifier,
        );
        if options.scene != self.options.scene {
            self.scene = Scene::from_options(&options.scene);
            let _ = self.dismiss();
        }
        self.options = options;
    }

    /// Subscribe `viewer` to `source`. Dropping the returned subscription
    /// detaches it; the source only holds a weak handle.
    pub fn mount(
        viewer: &Rc<RefCell<Self>>,
        source: &impl InputSource,
    ) -> Subscription {
        let weak: Weak<RefCell<Self>> = Rc::downgrade(viewer);
        source.subscribe(Box::new(move |event, now| {
            let Some(viewer) = weak.upgrade() else {
                return;
            };
            let Ok(mut viewer) = viewer.try_borrow_mut() else {
                log::warn!("input event dropped: viewer busy");
                return;
            };
            let _ = viewer.handle_input(event, now);
        }))
    }

    /// Per-frame tick: animate shapes, re-place the camera and re-project
    /// the popup anchor. Returns the popup position, if one is open.
    pub fn frame(&mut self, dt: f32) -> Option<ScreenPoint> {
        let _ = self.clock.advance(dt);
        self.scene.animate(self.clock.elapsed());
        self.rig.update();

        let point = self.projector.project(&self.rig.camera, self.viewport)?;
        self.selection.update_screen(point);
        Some(point)
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The camera rig.
    #[must_use]
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// The placed camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        self.rig.camera()
    }

    /// The shapes.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The open popup, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.current()
    }

    /// Anchor projector.
    #[must_use]
    pub fn projector(&self) -> &ScreenProjector {
        &self.projector
    }

    /// Render surface size.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Frame timing.
    #[must_use]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }
}
