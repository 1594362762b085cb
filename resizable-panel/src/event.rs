use statechart::MachineEvent;
use tuidom::PointerEvent;

pub const POINTER_DOWN: &str = "pointerdown";
pub const POINTER_MOVE_X: &str = "pointermove.x";
pub const POINTER_MOVE_Y: &str = "pointermove.y";
pub const POINTER_UP: &str = "pointerup";
pub const POINTER_CANCEL: &str = "pointercancel";
pub const POINTER_OUT: &str = "pointerout";
pub const CANCEL: &str = "cancel";
pub const RESET_X: &str = "reset.x";
pub const RESET_Y: &str = "reset.y";

/// Events understood by the panel machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    PointerDown(PointerEvent),
    /// Pointer moved over (or captured by) the horizontal-resize handle.
    PointerMoveX(PointerEvent),
    PointerMoveY(PointerEvent),
    PointerUp(PointerEvent),
    PointerCancel(PointerEvent),
    PointerOut(PointerEvent),
    /// Abort the drag and restore the size it started with.
    Cancel,
    ResetX,
    ResetY,
}

impl PanelEvent {
    pub fn pointer(&self) -> Option<&PointerEvent> {
        match self {
            Self::PointerDown(p)
            | Self::PointerMoveX(p)
            | Self::PointerMoveY(p)
            | Self::PointerUp(p)
            | Self::PointerCancel(p)
            | Self::PointerOut(p) => Some(p),
            Self::Cancel | Self::ResetX | Self::ResetY => None,
        }
    }
}

impl MachineEvent for PanelEvent {
    fn event_type(&self) -> &str {
        match self {
            Self::PointerDown(_) => POINTER_DOWN,
            Self::PointerMoveX(_) => POINTER_MOVE_X,
            Self::PointerMoveY(_) => POINTER_MOVE_Y,
            Self::PointerUp(_) => POINTER_UP,
            Self::PointerCancel(_) => POINTER_CANCEL,
            Self::PointerOut(_) => POINTER_OUT,
            Self::Cancel => CANCEL,
            Self::ResetX => RESET_X,
            Self::ResetY => RESET_Y,
        }
    }
}
