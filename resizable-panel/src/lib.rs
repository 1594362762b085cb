//! A resizable, collapsible panel for the terminal.
//!
//! Two handles border the panel: dragging the one on its right edge sets the
//! width, the one on its top edge sets the height. Escape during a drag
//! restores the size the drag started with; double-clicking a handle resets
//! that axis. Gestures are interpreted by a parallel statechart (see
//! [`machine`]), rendered through `tuidom`.

pub mod config;
pub mod context;
pub mod controller;
pub mod event;
pub mod machine;
pub mod view;

pub use config::PanelConfig;
pub use context::PanelContext;
pub use controller::{PanelController, PanelHandle};
pub use event::PanelEvent;
