use crate::element::{Content, Element};
use crate::layout::LayoutResult;

/// Find the topmost element that accepts pointer events at the given
/// coordinates. Later siblings paint on top, so they are tested first.
pub fn hit_test(layout: &LayoutResult, root: &Element, x: u16, y: u16) -> Option<String> {
    // Absolute children may sit outside their parent's rect, so descend first.
    if let Content::Children(children) = &root.content {
        for child in children.iter().rev() {
            if let Some(id) = hit_test(layout, child, x, y) {
                return Some(id);
            }
        }
    }

    let rect = layout.get(&root.id)?;
    (root.pointer_events && rect.contains(x, y)).then(|| root.id.clone())
}
