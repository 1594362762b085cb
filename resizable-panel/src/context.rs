use tuidom::{NodeRef, PointerCapture, PointerId};

use crate::config::PanelConfig;

/// Extended state of the panel machine.
#[derive(Debug, Clone)]
pub struct PanelContext {
    pub width: i32,
    pub height: i32,
    /// Size when the current drag started; restored by `cancel`.
    pub prev_width: i32,
    pub prev_height: i32,
    pub default_width: i32,
    pub default_height: i32,
    /// The rendered panel. Written by the render layer, read here to turn
    /// pointer positions into sizes.
    pub anchor: NodeRef,
    pub capture: PointerCapture,
    /// Element and pointer that took capture when the drag started.
    pub captured: Option<(String, PointerId)>,
}

impl PanelContext {
    pub fn new(config: &PanelConfig, anchor: NodeRef, capture: PointerCapture) -> Self {
        Self {
            width: config.default_width,
            height: config.default_height,
            prev_width: config.default_width,
            prev_height: config.default_height,
            default_width: config.default_width,
            default_height: config.default_height,
            anchor,
            capture,
            captured: None,
        }
    }
}
