//! Standalone window backed by winit.
//!
//! Forwards window events to an [`OrbitViewer`] and reports the camera pose
//! and popup placement in the window title.
//!
//! ```no_run
//! # use orbitview::Viewer;
//! Viewer::builder()
//!     .with_title("orbitview")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    error::OrbitError, options::Options, InputEvent, Modifiers, MouseButton,
    OrbitViewer, Viewport,
};

/// How often the window title is refreshed.
const TITLE_INTERVAL: Duration = Duration::from_millis(250);

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: "orbitview".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title prefix.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window driving an [`OrbitViewer`].
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    pub fn run(self) -> Result<(), OrbitError> {
        let event_loop =
            EventLoop::new().map_err(|e| OrbitError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            viewer: None,
            last_frame_time: Instant::now(),
            last_title_update: Instant::now(),
            options: Some(self.options),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| OrbitError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    viewer: Option<OrbitViewer>,
    last_frame_time: Instant,
    last_title_update: Instant,
    options: Option<Options>,
    title: String,
}

impl ViewerApp {
    fn forward(&mut self, event: &InputEvent) {
        let Some(viewer) = &mut self.viewer else {
            return;
        };
        if viewer.handle_input(event, Instant::now()) {
            match viewer.selection() {
                Some(selection) => log::info!(
                    "popup '{}': {}",
                    selection.name,
                    selection.description
                ),
                None => log::info!("popup closed"),
            }
        }
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn status_line(&self, viewer: &OrbitViewer) -> String {
        let pose = viewer.rig().pose();
        let mut line = format!(
            "{} | {:?} orbit {:.2} dist {:.2} height {:.2} tilt {:.2} | {:.0} fps",
            self.title,
            viewer.rig().mode(),
            pose.orbit_angle,
            pose.distance(),
            pose.vertical_offset(),
            pose.tilt_angle(),
            viewer.clock().fps(),
        );
        if let Some(selection) = viewer.selection() {
            line.push_str(&format!(
                " | {} @ ({:.0}, {:.0})",
                selection.name, selection.screen.x, selection.screen.y
            ));
        }
        line
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        let Some(viewer) = &mut self.viewer else {
            return;
        };
        let _ = viewer.frame(dt);

        if now.duration_since(self.last_title_update) >= TITLE_INTERVAL {
            self.last_title_update = now;
            if let (Some(w), Some(viewer)) = (&self.window, &self.viewer) {
                w.set_title(&self.status_line(viewer));
            }
        }
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let options = self.options.take().unwrap_or_default();
        let viewer =
            OrbitViewer::new(options, Viewport::new(inner.width, inner.height));

        window.request_redraw();
        self.window = Some(window);
        self.viewer = Some(viewer);
        self.last_frame_time = Instant::now();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        if self.window.is_none() || self.viewer.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                self.forward(&InputEvent::Resized {
                    width: size.width,
                    height: size.height,
                });
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::MouseInput { button, state, .. } => {
                self.forward(&InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.forward(&InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                self.forward(&InputEvent::Scroll { delta });
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.forward(&InputEvent::ModifiersChanged {
                    modifiers: Modifiers::from(modifiers.state()),
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                self.forward(&InputEvent::KeyPressed {
                    code: format!("{code:?}"),
                });
            }

            _ => (),
        }
    }
}
