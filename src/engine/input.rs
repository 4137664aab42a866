//! Input and selection methods for `OrbitViewer`.

use glam::Vec2;
use web_time::Instant;

use super::{OrbitViewer, ViewerCommand};
use crate::camera::{project_to_screen, RigSignal, Viewport};
use crate::input::{ClickEvent, DragSession, InputEvent};
use crate::scene::{screen_to_ray, ShapeId};
use crate::selection::Selection;

impl OrbitViewer {
    /// Process a platform-agnostic input event stamped with `now`.
    ///
    /// Returns `true` if the selection changed.
    pub fn handle_input(&mut self, event: &InputEvent, now: Instant) -> bool {
        let Some(command) = self.input.handle_event(event) else {
            return false;
        };
        self.execute(command, now)
    }

    /// Execute a command. Returns `true` if the selection changed.
    pub fn execute(&mut self, command: ViewerCommand, now: Instant) -> bool {
        match command {
            ViewerCommand::Hover { at } => {
                self.update_hover(at);
                false
            }
            ViewerCommand::BeginDrag { at } => {
                self.rig.press(at, now);
                false
            }
            ViewerCommand::DragTo { at } => {
                let _ = self.rig.drag_to(at);
                false
            }
            ViewerCommand::EndDrag { at } => self.finish_press(at, now),
            ViewerCommand::Zoom { delta } => {
                self.rig.scroll(delta);
                false
            }
            ViewerCommand::SetTiltHeld { held } => {
                self.rig.set_tilt_held(held);
                false
            }
            ViewerCommand::ResetCamera => {
                self.rig.reset();
                false
            }
            ViewerCommand::ClearSelection => self.dismiss(),
            ViewerCommand::Resize { width, height } => {
                self.viewport = Viewport::new(width, height);
                self.rig.resize(self.viewport);
                false
            }
            ViewerCommand::SetOpacity { shape, opacity } => {
                let _ = self.scene.set_opacity(shape, opacity);
                false
            }
        }
    }

    /// Select `shape` as if it had been clicked.
    ///
    /// Captures the shape's live position as the anchor and projects it once
    /// so the popup can be placed before the next frame.
    pub fn select_shape(&mut self, shape: ShapeId) -> bool {
        let Some(picked) = self.scene.shape(shape) else {
            return false;
        };
        let anchor = picked.position();
        let screen = project_to_screen(&self.rig.camera, anchor, self.viewport);
        self.selection.select(Selection {
            shape,
            name: picked.name().to_owned(),
            description: picked.description().to_owned(),
            anchor,
            screen,
        });
        self.projector.track(anchor);
        true
    }

    /// Close the popup. Returns `true` if one was open.
    pub fn dismiss(&mut self) -> bool {
        self.projector.clear();
        self.selection.clear()
    }

    /// Shape under a surface pixel.
    #[must_use]
    pub fn pick_at(&self, at: Vec2) -> Option<ShapeId> {
        let ray = screen_to_ray(&self.rig.camera, at, self.viewport);
        self.scene.pick(&ray)
    }

    fn update_hover(&mut self, at: Vec2) {
        if self.rig.is_dragging() {
            return;
        }
        let target = self.pick_at(at);
        if self.scene.set_hovered(target) {
            log::trace!("hover -> {target:?}");
        }
    }

    /// Release of the primary button: shape handlers see the click first
    /// and may stop it before the rig's empty-space handler.
    fn finish_press(&mut self, at: Vec2, now: Instant) -> bool {
        let Some(moved) = self.rig.drag_session().map(DragSession::moved) else {
            return false;
        };

        let mut click = ClickEvent::new(at);
        let mut changed = false;
        if !moved {
            if let Some(shape) = self.pick_at(at) {
                click.stop_propagation();
                changed = self.select_shape(shape);
            }
        }

        if self.rig.release(now, &click) == Some(RigSignal::Deselect) {
            changed |= self.dismiss();
        }
        changed
    }
}
