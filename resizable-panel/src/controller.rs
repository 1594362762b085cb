use statechart::{Actor, MachineError, Snapshot, StateValue, Subscription};
use tuidom::{DomEvent, Element, LayoutResult, NodeRef, PointerCapture, Window};

use crate::config::PanelConfig;
use crate::context::PanelContext;
use crate::event::PanelEvent;
use crate::machine::{COLLAPSED, DRAGGING, panel_machine};
use crate::view::{self, HANDLE_X, HANDLE_Y, PANEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Drives the panel machine from DOM pointer events and renders it.
pub struct PanelController {
    actor: Actor<PanelContext, PanelEvent>,
    config: PanelConfig,
    anchor: NodeRef,
}

/// Inspection handle to a running panel: snapshots, subscriptions and
/// direct event sends, for tooling that lives outside the render loop.
#[derive(Clone)]
pub struct PanelHandle {
    actor: Actor<PanelContext, PanelEvent>,
}

impl PanelController {
    /// Start the panel machine. Escape listeners are registered on `window`
    /// and pointer capture goes through `capture`, normally the router's.
    pub fn new(
        config: PanelConfig,
        window: &Window,
        capture: PointerCapture,
    ) -> Result<(Self, PanelHandle), MachineError> {
        let anchor = NodeRef::new();
        let context = PanelContext::new(&config, anchor.clone(), capture);
        let actor = Actor::spawn(panel_machine(&config, window)?, context)?;
        log::info!("[panel] started in {}", actor.value());

        let handle = PanelHandle {
            actor: actor.clone(),
        };
        let controller = Self {
            actor,
            config,
            anchor,
        };
        Ok((controller, handle))
    }

    /// Forward a routed pointer event. Returns false if it was not aimed
    /// at a handle.
    pub fn dispatch(&self, event: &DomEvent) -> bool {
        let axis = match event.target() {
            HANDLE_X => Axis::X,
            HANDLE_Y => Axis::Y,
            _ => return false,
        };

        let pointer = event.pointer().clone();
        let panel_event = match event {
            DomEvent::PointerDown(_) => PanelEvent::PointerDown(pointer),
            DomEvent::PointerMove(_) => match axis {
                Axis::X => PanelEvent::PointerMoveX(pointer),
                Axis::Y => PanelEvent::PointerMoveY(pointer),
            },
            DomEvent::PointerUp(_) => PanelEvent::PointerUp(pointer),
            DomEvent::PointerCancel(_) => PanelEvent::PointerCancel(pointer),
            DomEvent::PointerOut(_) => PanelEvent::PointerOut(pointer),
            DomEvent::DoubleClick(_) => match axis {
                Axis::X => PanelEvent::ResetX,
                Axis::Y => PanelEvent::ResetY,
            },
        };

        self.actor.send(panel_event);
        true
    }

    pub fn send(&self, event: PanelEvent) {
        self.actor.send(event);
    }

    /// Element tree for the current state.
    pub fn view(&self, viewport: (u16, u16)) -> Element {
        view::render(&self.actor.snapshot(), viewport, &self.config)
    }

    /// Point the anchor at the panel as laid out in the latest frame.
    pub fn mount(&self, layout: &LayoutResult) {
        self.anchor.attach(PANEL, layout);
    }

    pub fn anchor(&self) -> &NodeRef {
        &self.anchor
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Snapshot<PanelContext> {
        self.actor.snapshot()
    }

    pub fn value(&self) -> StateValue {
        self.actor.value()
    }

    pub fn width(&self) -> i32 {
        self.actor.with_context(|ctx| ctx.width)
    }

    pub fn height(&self) -> i32 {
        self.actor.with_context(|ctx| ctx.height)
    }

    pub fn is_dragging(&self) -> bool {
        self.actor.has_tag(DRAGGING)
    }

    pub fn is_collapsed(&self) -> bool {
        self.actor.has_tag(COLLAPSED)
    }

    /// Stop the machine, removing any window listeners and pointer capture it holds.
    pub fn stop(&self) {
        self.actor.stop();
        self.actor.with_context(|ctx| {
            if let Some((target, pointer_id)) = &ctx.captured {
                ctx.capture.release(target, *pointer_id);
            }
        });
        log::info!("[panel] stopped");
    }
}

impl PanelHandle {
    pub fn snapshot(&self) -> Snapshot<PanelContext> {
        self.actor.snapshot()
    }

    pub fn send(&self, event: PanelEvent) {
        self.actor.send(event);
    }

    /// Observe every transition. Dropping the subscription detaches.
    pub fn subscribe(
        &self,
        observer: impl FnMut(&Snapshot<PanelContext>) + 'static,
    ) -> Subscription {
        self.actor.subscribe(observer)
    }

    pub fn is_running(&self) -> bool {
        self.actor.is_running()
    }
}
