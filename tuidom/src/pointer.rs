//! Pointer routing: turns raw terminal mouse events into targeted DOM-style
//! pointer events.
//!
//! The router owns the per-pointer bookkeeping the DOM normally hides:
//!
//! - **Capture**: while an element holds capture for a pointer, moves and the
//!   final release are dispatched to it wherever the pointer is, and no
//!   `pointerout` is fired for it. Capture is released implicitly after
//!   `pointerup` and `pointercancel`.
//! - **Boundary events**: `pointerout` fires on the previously hovered
//!   element when an uncaptured pointer moves off it.
//! - **Double click**: two clicks (press and release on the same element,
//!   with no movement in between) within [`RouterConfig::double_click_interval`] produce `dblclick` after
//!   the second `pointerup`.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{MouseEvent, MouseEventKind};

use crate::element::Element;
use crate::event::{DomEvent, MouseButton, PointerEvent, PointerId, MOUSE_POINTER_ID};
use crate::hit::hit_test;
use crate::layout::LayoutResult;

#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Maximum time between two clicks for them to count as a double click.
    pub double_click_interval: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            double_click_interval: Duration::from_millis(500),
        }
    }
}

impl RouterConfig {
    pub fn double_click_interval(mut self, interval: Duration) -> Self {
        self.double_click_interval = interval;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Captured {
    target: String,
    pointer_id: PointerId,
}

/// Shared handle to the router's pointer-capture slot.
///
/// Only one element holds capture at a time. Handlers clone this handle and
/// call [`set`](Self::set) / [`release`](Self::release) the way DOM handlers
/// call `setPointerCapture` / `releasePointerCapture` on the event target.
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    slot: Rc<RefCell<Option<Captured>>>,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route all further events of `pointer_id` to `target`.
    pub fn set(&self, target: &str, pointer_id: PointerId) {
        log::debug!("[pointer] capture {pointer_id} -> {target}");
        *self.slot.borrow_mut() = Some(Captured {
            target: target.to_string(),
            pointer_id,
        });
    }

    /// Release capture held by `target`. Releasing a capture the element
    /// does not hold (already lost, or never taken) is a no-op.
    pub fn release(&self, target: &str, pointer_id: PointerId) -> bool {
        let mut slot = self.slot.borrow_mut();
        let held = slot
            .as_ref()
            .is_some_and(|c| c.target == target && c.pointer_id == pointer_id);
        if held {
            log::debug!("[pointer] release {pointer_id} from {target}");
            *slot = None;
        }
        held
    }

    pub fn has(&self, target: &str, pointer_id: PointerId) -> bool {
        self.slot
            .borrow()
            .as_ref()
            .is_some_and(|c| c.target == target && c.pointer_id == pointer_id)
    }

    /// Element currently holding capture, if any.
    pub fn target(&self) -> Option<String> {
        self.slot.borrow().as_ref().map(|c| c.target.clone())
    }

    fn clear(&self) {
        if let Some(captured) = self.slot.borrow_mut().take() {
            log::debug!(
                "[pointer] implicit release {} from {}",
                captured.pointer_id,
                captured.target
            );
        }
    }
}

pub struct PointerRouter {
    config: RouterConfig,
    capture: PointerCapture,
    /// Element the button went down on, while the button is held.
    pressed: Option<String>,
    /// The held pointer moved since it went down; its release is not a click.
    moved: bool,
    hovered: Option<String>,
    last_click: Option<(String, Instant)>,
    last_position: (i32, i32),
    button: MouseButton,
}

impl PointerRouter {
    pub fn new(config: RouterConfig) -> Self {
        Self {
            config,
            capture: PointerCapture::new(),
            pressed: None,
            moved: false,
            hovered: None,
            last_click: None,
            last_position: (0, 0),
            button: MouseButton::Left,
        }
    }

    /// Handle to this router's capture slot.
    pub fn capture(&self) -> PointerCapture {
        self.capture.clone()
    }

    pub fn route_mouse(
        &mut self,
        event: MouseEvent,
        root: &Element,
        layout: &LayoutResult,
    ) -> Vec<DomEvent> {
        self.route_mouse_at(event, root, layout, Instant::now())
    }

    /// Same as [`route_mouse`](Self::route_mouse) with an explicit clock,
    /// so double-click timing is deterministic.
    pub fn route_mouse_at(
        &mut self,
        event: MouseEvent,
        root: &Element,
        layout: &LayoutResult,
        now: Instant,
    ) -> Vec<DomEvent> {
        let (x, y) = (event.column, event.row);
        self.last_position = (i32::from(x), i32::from(y));
        let hit = hit_test(layout, root, x, y);
        let mut events = Vec::new();

        match event.kind {
            MouseEventKind::Down(button) => {
                self.button = button.into();
                let Some(target) = hit else {
                    log::trace!("[pointer] down at ({x}, {y}) hit nothing");
                    return events;
                };
                self.pressed = Some(target.clone());
                self.moved = false;
                self.hovered = Some(target.clone());
                events.push(DomEvent::PointerDown(self.pointer_event(target)));
            }
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                if self.pressed.is_some() && !self.moved {
                    self.moved = true;
                    self.last_click = None;
                }

                if let Some(target) = self.capture.target() {
                    events.push(DomEvent::PointerMove(self.pointer_event(target)));
                    return events;
                }

                if let Some(previous) = self.hovered.take() {
                    if hit.as_deref() != Some(previous.as_str()) {
                        events.push(DomEvent::PointerOut(self.pointer_event(previous)));
                    }
                }
                self.hovered = hit.clone();
                if let Some(target) = hit {
                    events.push(DomEvent::PointerMove(self.pointer_event(target)));
                }
            }
            MouseEventKind::Up(button) => {
                self.button = button.into();
                let pressed = self.pressed.take();
                let moved = std::mem::take(&mut self.moved);
                let target = self.capture.target().or_else(|| hit.clone());
                if let Some(target) = target {
                    events.push(DomEvent::PointerUp(self.pointer_event(target)));
                }
                self.capture.clear();
                self.hovered = hit.clone();

                if let (Some(pressed), Some(hit)) = (pressed, hit) {
                    if pressed == hit && !moved {
                        if let Some(dblclick) = self.register_click(hit, now) {
                            events.push(dblclick);
                        }
                    }
                }
            }
            _ => {}
        }

        events
    }

    /// Abort an in-progress press (terminal lost focus, viewport changed).
    /// Emits `pointercancel` to the capturing or pressed element.
    pub fn cancel(&mut self) -> Vec<DomEvent> {
        let Some(pressed) = self.pressed.take() else {
            return Vec::new();
        };
        let target = self.capture.target().unwrap_or(pressed);
        self.moved = false;
        self.capture.clear();
        self.last_click = None;
        vec![DomEvent::PointerCancel(self.pointer_event(target))]
    }

    fn register_click(&mut self, target: String, now: Instant) -> Option<DomEvent> {
        let is_double = self.last_click.as_ref().is_some_and(|(last, at)| {
            *last == target && now.saturating_duration_since(*at) <= self.config.double_click_interval
        });

        if is_double {
            self.last_click = None;
            Some(DomEvent::DoubleClick(self.pointer_event(target)))
        } else {
            self.last_click = Some((target, now));
            None
        }
    }

    fn pointer_event(&self, target: String) -> PointerEvent {
        PointerEvent {
            target,
            pointer_id: MOUSE_POINTER_ID,
            client_x: self.last_position.0,
            client_y: self.last_position.1,
            button: self.button,
        }
    }
}

impl Default for PointerRouter {
    fn default() -> Self {
        Self::new(RouterConfig::default())
    }
}
