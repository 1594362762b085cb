//! The panel's statechart.
//!
//! ```text
//! (parallel)
//! ├── drag
//! │   ├── idle      pointerdown -> dragging
//! │   └── dragging  [dragging] invokes the Escape watcher
//! │                 holds pointer capture from entry to exit
//! │                 pointermove.x / pointermove.y resize
//! │                 pointerup / pointercancel / pointerout -> idle
//! │                 cancel -> idle, restoring the size
//! └── collapse
//!     ├── normal
//!     └── collapsed [collapsed]
//! reset.x / reset.y restore the defaults in any state
//! ```

use statechart::{
    Action, Implementations, Machine, MachineError, StateConfig, Subscription, Transition,
};
use tuidom::{Key, Window};

use crate::config::PanelConfig;
use crate::context::PanelContext;
use crate::event::{
    CANCEL, POINTER_CANCEL, POINTER_DOWN, POINTER_MOVE_X, POINTER_MOVE_Y, POINTER_OUT, POINTER_UP,
    PanelEvent, RESET_X, RESET_Y,
};

pub const MACHINE_ID: &str = "Resizable panel";

pub const DRAGGING: &str = "dragging";
pub const COLLAPSED: &str = "collapsed";

const SET_POINTER_CAPTURE: &str = "set_pointer_capture";
const RELEASE_POINTER_CAPTURE: &str = "release_pointer_capture";
const UPDATE_WIDTH: &str = "update_width";
const UPDATE_HEIGHT: &str = "update_height";
const WATCH_ESCAPE: &str = "cancel";

type State = StateConfig<PanelContext, PanelEvent>;
type Edge = Transition<PanelContext, PanelEvent>;
type Step = Action<PanelContext, PanelEvent>;

/// Build the panel machine with its actions and the Escape watcher wired to
/// `window`.
pub fn panel_machine(
    config: &PanelConfig,
    window: &Window,
) -> Result<Machine<PanelContext, PanelEvent>, MachineError> {
    let root = State::parallel()
        .state("drag", drag_region())
        .state("collapse", collapse_region(config.collapse_threshold))
        .on(
            RESET_X,
            Edge::stay().action(Step::assign(|ctx, _| ctx.width = ctx.default_width)),
        )
        .on(
            RESET_Y,
            Edge::stay().action(Step::assign(|ctx, _| ctx.height = ctx.default_height)),
        );

    Ok(Machine::new(MACHINE_ID, root)?.provide(implementations(window)))
}

fn drag_region() -> State {
    State::compound("idle")
        .state("idle", State::atomic().on(POINTER_DOWN, Edge::to(DRAGGING)))
        .state(
            DRAGGING,
            State::atomic()
                .tag(DRAGGING)
                .invoke(WATCH_ESCAPE)
                .entry(Step::named(SET_POINTER_CAPTURE))
                .entry(Step::assign(|ctx, _| {
                    ctx.prev_width = ctx.width;
                    ctx.prev_height = ctx.height;
                }))
                // Every way out of dragging, `cancel` included, drops capture.
                .exit(Step::named(RELEASE_POINTER_CAPTURE))
                .on(POINTER_MOVE_X, Edge::stay().action(Step::named(UPDATE_WIDTH)))
                .on(POINTER_MOVE_Y, Edge::stay().action(Step::named(UPDATE_HEIGHT)))
                .on(POINTER_UP, Edge::to("idle"))
                .on(POINTER_CANCEL, Edge::to("idle"))
                .on(POINTER_OUT, Edge::to("idle"))
                .on(
                    CANCEL,
                    Edge::to("idle").action(Step::assign(|ctx, _| {
                        ctx.width = ctx.prev_width;
                        ctx.height = ctx.prev_height;
                    })),
                ),
        )
}

fn collapse_region(threshold: Option<i32>) -> State {
    let mut normal = State::atomic();
    let mut collapsed = State::atomic().tag(COLLAPSED);

    if let Some(threshold) = threshold {
        normal = normal.always(
            Edge::to(COLLAPSED)
                .when(move |ctx: &PanelContext, _| ctx.width < threshold || ctx.height < threshold),
        );
        collapsed = collapsed.always(
            Edge::to("normal")
                .when(move |ctx: &PanelContext, _| ctx.width >= threshold && ctx.height >= threshold),
        );
    }

    State::compound("normal")
        .state("normal", normal)
        .state(COLLAPSED, collapsed)
}

fn implementations(window: &Window) -> Implementations<PanelContext, PanelEvent> {
    let window = window.clone();

    Implementations::new()
        .action(SET_POINTER_CAPTURE, |ctx: &mut PanelContext, event| {
            if let Some(pointer) = event.and_then(PanelEvent::pointer) {
                ctx.capture.set(&pointer.target, pointer.pointer_id);
                ctx.captured = Some((pointer.target.clone(), pointer.pointer_id));
            }
        })
        .action(RELEASE_POINTER_CAPTURE, |ctx: &mut PanelContext, _| {
            if let Some((target, pointer_id)) = ctx.captured.take() {
                ctx.capture.release(&target, pointer_id);
            }
        })
        .action(UPDATE_WIDTH, |ctx: &mut PanelContext, event| {
            let (Some(pointer), Some(rect)) = (
                event.and_then(PanelEvent::pointer),
                ctx.anchor.bounding_client_rect(),
            ) else {
                log::trace!("[panel] no anchor, width unchanged");
                return;
            };
            ctx.width = pointer.client_x - i32::from(rect.left());
        })
        .action(UPDATE_HEIGHT, |ctx: &mut PanelContext, event| {
            let (Some(pointer), Some(rect)) = (
                event.and_then(PanelEvent::pointer),
                ctx.anchor.bounding_client_rect(),
            ) else {
                log::trace!("[panel] no anchor, height unchanged");
                return;
            };
            ctx.height = i32::from(rect.bottom()) - pointer.client_y;
        })
        .service(WATCH_ESCAPE, move |_, sender| {
            let id = window.add_key_listener(move |event| {
                if event.key == Key::Escape {
                    sender.send(PanelEvent::Cancel);
                }
            });
            let window = window.clone();
            Subscription::new(move || {
                window.remove_key_listener(id);
            })
        })
}
