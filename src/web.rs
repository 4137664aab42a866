//! Browser input source backed by DOM listeners on a canvas.
//!
//! Presses and wheel input are taken from the canvas; moves, releases and
//! keys from the window so a drag keeps tracking outside the canvas. All
//! listeners are removed when the subscription is dropped.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;
use web_time::Instant;

use crate::input::{
    InputEvent, InputSource, Listener, Modifiers, MouseButton, Subscription,
};

/// Wheel pixels per zoom step.
const WHEEL_SCALE: f32 = 0.01;

type Handler = Closure<dyn FnMut(web::Event)>;
type Emit = Rc<dyn Fn(InputEvent)>;

/// Route panics and `log` output to the browser console.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Input source reading pointer, wheel and keyboard events for `canvas`.
#[derive(Debug, Clone)]
pub struct CanvasInput {
    canvas: web::HtmlCanvasElement,
}

impl CanvasInput {
    /// Source for `canvas`.
    #[must_use]
    pub fn new(canvas: web::HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    /// The canvas events are read from.
    #[must_use]
    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }
}

/// Pointer position in canvas backing-store pixels.
fn canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = (rect.width() as f32).max(1.0);
    let h = (rect.height() as f32).max(1.0);
    Vec2::new(
        x_css / w * canvas.width() as f32,
        y_css / h * canvas.height() as f32,
    )
}

fn mouse_button(button: i16) -> MouseButton {
    match button {
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        _ => MouseButton::Left,
    }
}

fn mouse_modifiers(ev: &web::MouseEvent) -> Modifiers {
    Modifiers {
        shift: ev.shift_key(),
        control: ev.ctrl_key(),
        alt: ev.alt_key(),
    }
}

fn key_modifiers(ev: &web::KeyboardEvent) -> Modifiers {
    Modifiers {
        shift: ev.shift_key(),
        control: ev.ctrl_key(),
        alt: ev.alt_key(),
    }
}

fn is_modifier_key(code: &str) -> bool {
    matches!(
        code,
        "ShiftLeft"
            | "ShiftRight"
            | "ControlLeft"
            | "ControlRight"
            | "AltLeft"
            | "AltRight"
    )
}

fn pointer_handler(
    emit: &Emit,
    canvas: &web::HtmlCanvasElement,
    pressed: Option<bool>,
) -> Handler {
    let emit = Rc::clone(emit);
    let canvas = canvas.clone();
    Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let pos = canvas_px(ev, &canvas);
        emit(InputEvent::ModifiersChanged {
            modifiers: mouse_modifiers(ev),
        });
        emit(InputEvent::CursorMoved { x: pos.x, y: pos.y });
        if let Some(pressed) = pressed {
            if pressed {
                let _ = canvas.set_pointer_capture(ev.pointer_id());
                ev.prevent_default();
            }
            emit(InputEvent::MouseButton {
                button: mouse_button(ev.button()),
                pressed,
            });
        }
    }) as Box<dyn FnMut(_)>)
}

fn wheel_handler(emit: &Emit) -> Handler {
    let emit = Rc::clone(emit);
    Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::WheelEvent>() else {
            return;
        };
        ev.prevent_default();
        emit(InputEvent::Scroll {
            delta: -(ev.delta_y() as f32) * WHEEL_SCALE,
        });
    }) as Box<dyn FnMut(_)>)
}

fn key_handler(emit: &Emit, down: bool) -> Handler {
    let emit = Rc::clone(emit);
    Closure::wrap(Box::new(move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::KeyboardEvent>() else {
            return;
        };
        emit(InputEvent::ModifiersChanged {
            modifiers: key_modifiers(ev),
        });
        let code = ev.code();
        if down && !ev.repeat() && !is_modifier_key(&code) {
            emit(InputEvent::KeyPressed { code });
        }
    }) as Box<dyn FnMut(_)>)
}

fn resize_handler(emit: &Emit, canvas: &web::HtmlCanvasElement) -> Handler {
    let emit = Rc::clone(emit);
    let canvas = canvas.clone();
    Closure::wrap(Box::new(move |_: web::Event| {
        emit(InputEvent::Resized {
            width: canvas.width(),
            height: canvas.height(),
        });
    }) as Box<dyn FnMut(_)>)
}

impl InputSource for CanvasInput {
    fn subscribe(&self, listener: Listener) -> Subscription {
        let Some(window) = web::window() else {
            log::warn!("no window; canvas input disabled");
            return Subscription::empty();
        };

        let listener = RefCell::new(listener);
        let emit: Emit = Rc::new(move |event: InputEvent| {
            let Ok(mut listener) = listener.try_borrow_mut() else {
                log::warn!("re-entrant input event dropped: {event:?}");
                return;
            };
            (*listener)(&event, Instant::now());
        });

        let canvas_target: web::EventTarget = self.canvas.clone().into();
        let window_target: web::EventTarget = window.into();

        let registered: Vec<(web::EventTarget, &'static str, Handler)> = vec![
            (
                canvas_target.clone(),
                "pointerdown",
                pointer_handler(&emit, &self.canvas, Some(true)),
            ),
            (
                window_target.clone(),
                "pointermove",
                pointer_handler(&emit, &self.canvas, None),
            ),
            (
                window_target.clone(),
                "pointerup",
                pointer_handler(&emit, &self.canvas, Some(false)),
            ),
            (canvas_target, "wheel", wheel_handler(&emit)),
            (window_target.clone(), "keydown", key_handler(&emit, true)),
            (window_target.clone(), "keyup", key_handler(&emit, false)),
            (window_target, "resize", resize_handler(&emit, &self.canvas)),
        ];

        let options = web::AddEventListenerOptions::new();
        options.set_passive(false);
        for (target, name, handler) in &registered {
            let added = target
                .add_event_listener_with_callback_and_add_event_listener_options(
                    name,
                    handler.as_ref().unchecked_ref(),
                    &options,
                );
            if added.is_err() {
                log::warn!("failed to add '{name}' listener");
            }
        }
        log::debug!("canvas input: {} listeners attached", registered.len());

        Subscription::new(move || {
            for (target, name, handler) in &registered {
                let _ = target.remove_event_listener_with_callback(
                    name,
                    handler.as_ref().unchecked_ref(),
                );
            }
            log::debug!("canvas input: listeners removed");
        })
    }
}
