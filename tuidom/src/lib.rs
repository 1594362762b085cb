pub mod buffer;
pub mod element;
pub mod event;
pub mod hit;
pub mod layout;
pub mod node_ref;
pub mod pointer;
pub mod render;
pub mod terminal;
pub mod text;
pub mod types;
pub mod window;

pub use buffer::Buffer;
pub use element::Element;
pub use event::{DomEvent, Key, KeyboardEvent, Modifiers, MouseButton, PointerEvent, PointerId};
pub use hit::hit_test;
pub use layout::{LayoutResult, Rect};
pub use node_ref::NodeRef;
pub use pointer::{PointerCapture, PointerRouter, RouterConfig};
pub use terminal::Terminal;
pub use types::*;
pub use window::{ListenerId, Window};
