use std::collections::HashMap;

use super::Rect;
use crate::element::{Content, Element};
use crate::text::display_width;
use crate::types::{Direction, Position, Size};

pub type LayoutResult = HashMap<String, Rect>;

/// Lay out `root` inside `viewport`.
///
/// Static children stack along their parent's direction. Absolute children
/// are placed at their `left`/`top` offsets relative to the viewport and
/// clipped to it.
pub fn layout(root: &Element, viewport: Rect) -> LayoutResult {
    let mut result = LayoutResult::new();
    let width = resolve_size(root.width, viewport.width, root, true);
    let height = resolve_size(root.height, viewport.height, root, false);
    let rect = Rect::new(viewport.x, viewport.y, width, height);
    result.insert(root.id.clone(), rect);
    layout_children(root, rect, viewport, &mut result);
    result
}

fn layout_absolute(element: &Element, viewport: Rect, result: &mut LayoutResult) {
    let x = clamp_offset(element.left.unwrap_or(0), viewport.x, viewport.right());
    let y = clamp_offset(element.top.unwrap_or(0), viewport.y, viewport.bottom());
    let width = resolve_size(element.width, viewport.right() - x, element, true);
    let height = resolve_size(element.height, viewport.bottom() - y, element, false);
    let rect = Rect::new(x, y, width, height);
    result.insert(element.id.clone(), rect);
    layout_children(element, rect, viewport, result);
}

fn clamp_offset(offset: i32, start: u16, end: u16) -> u16 {
    (i32::from(start) + offset).clamp(i32::from(start), i32::from(end)) as u16
}

fn layout_children(element: &Element, rect: Rect, viewport: Rect, result: &mut LayoutResult) {
    let Content::Children(children) = &element.content else {
        return;
    };

    let inner = rect.shrink(element.padding);
    let is_row = element.direction == Direction::Row;
    let main_total = if is_row { inner.width } else { inner.height };

    let mut offset = 0u16;
    for child in children {
        if child.position == Position::Absolute {
            layout_absolute(child, viewport, result);
            continue;
        }

        let remaining = main_total.saturating_sub(offset);
        let (width, height) = if is_row {
            (
                resolve_size(child.width, remaining, child, true),
                resolve_size(child.height, inner.height, child, false),
            )
        } else {
            (
                resolve_size(child.width, inner.width, child, true),
                resolve_size(child.height, remaining, child, false),
            )
        };

        let child_rect = if is_row {
            Rect::new(inner.x + offset, inner.y, width, height)
        } else {
            Rect::new(inner.x, inner.y + offset, width, height)
        };
        result.insert(child.id.clone(), child_rect);
        layout_children(child, child_rect, viewport, result);

        let main = if is_row { width } else { height };
        offset = offset.saturating_add(main).saturating_add(element.gap);
    }
}

fn resolve_size(size: Size, available: u16, element: &Element, is_width: bool) -> u16 {
    let base = match size {
        Size::Fixed(n) => n,
        Size::Fill => available,
        Size::Auto => estimate_size(element, is_width),
        Size::Percent(p) => (available as f32 * p) as u16,
    };

    let min = if is_width {
        element.min_width
    } else {
        element.min_height
    };

    min.map_or(base, |m| base.max(m)).min(available)
}

fn estimate_size(element: &Element, is_width: bool) -> u16 {
    let chrome = if is_width {
        element.padding.horizontal_total()
    } else {
        element.padding.vertical_total()
    };

    let content = match &element.content {
        Content::None => 0,
        Content::Text(text) => {
            if is_width {
                text.lines().map(display_width).max().unwrap_or(0) as u16
            } else {
                text.lines().count().max(1) as u16
            }
        }
        Content::Children(children) => {
            let flow = children.iter().filter(|c| c.position == Position::Static);
            let along_main = (element.direction == Direction::Row) == is_width;
            if along_main {
                let count = flow.clone().count();
                let gaps = element.gap * count.saturating_sub(1) as u16;
                flow.map(|c| preferred_size(c, is_width)).sum::<u16>() + gaps
            } else {
                flow.map(|c| preferred_size(c, is_width)).max().unwrap_or(0)
            }
        }
    };

    content + chrome
}

fn preferred_size(element: &Element, is_width: bool) -> u16 {
    match if is_width { element.width } else { element.height } {
        Size::Fixed(n) => n,
        _ => estimate_size(element, is_width),
    }
}
