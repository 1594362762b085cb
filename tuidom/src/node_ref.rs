use std::cell::RefCell;
use std::rc::Rc;

use crate::layout::{LayoutResult, Rect};

/// A reference to a rendered element, refreshed after every layout.
///
/// The render layer owns the element; holders of a `NodeRef` only read its
/// last known bounding rect. A ref whose element was not laid out in the most
/// recent frame reads as `None`.
#[derive(Debug, Clone, Default)]
pub struct NodeRef {
    rect: Rc<RefCell<Option<Rect>>>,
}

impl NodeRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point this ref at element `id` using the rects from `layout`.
    pub fn attach(&self, id: &str, layout: &LayoutResult) {
        *self.rect.borrow_mut() = layout.get(id).copied();
    }

    /// Record a known rect for the referenced element.
    pub fn set(&self, rect: Rect) {
        *self.rect.borrow_mut() = Some(rect);
    }

    /// `getBoundingClientRect()` of the referenced element.
    pub fn bounding_client_rect(&self) -> Option<Rect> {
        *self.rect.borrow()
    }
}
