use crate::buffer::Buffer;
use crate::element::{Content, Element};
use crate::layout::{LayoutResult, Rect};
use crate::text::char_width;
use crate::types::Rgb;

/// Paint `element` and its subtree into `buf` using precomputed rects.
/// Children paint after (on top of) their parent, in tree order.
pub fn render_to_buffer(element: &Element, layout: &LayoutResult, buf: &mut Buffer) {
    let Some(rect) = layout.get(&element.id).copied() else {
        log::trace!("[render] no layout for {}, skipping subtree", element.id);
        return;
    };

    if let Some(bg) = &element.style.background {
        fill_background(buf, rect, bg.to_rgb());
    }

    let fg = element
        .style
        .foreground
        .as_ref()
        .map(|c| c.to_rgb())
        .unwrap_or(Rgb::WHITE);

    if let Some(glyph) = element.fill {
        fill_glyph(buf, rect, glyph, fg);
    }

    match &element.content {
        Content::None => {}
        Content::Text(text) => render_text(text, element, rect, fg, buf),
        Content::Children(children) => {
            for child in children {
                render_to_buffer(child, layout, buf);
            }
        }
    }
}

fn fill_background(buf: &mut Buffer, rect: Rect, bg: Rgb) {
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.bg = bg;
            }
        }
    }
}

fn fill_glyph(buf: &mut Buffer, rect: Rect, glyph: char, fg: Rgb) {
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            if let Some(cell) = buf.get_mut(x, y) {
                cell.char = glyph;
                cell.fg = fg;
            }
        }
    }
}

fn render_text(text: &str, element: &Element, rect: Rect, fg: Rgb, buf: &mut Buffer) {
    let inner = rect.shrink(element.padding);

    for (row, line) in text.lines().enumerate() {
        let y = inner.y + row as u16;
        if y >= inner.bottom() {
            break;
        }

        let mut x = inner.x;
        for ch in line.chars() {
            let width = char_width(ch) as u16;
            if x + width > inner.right() {
                break;
            }
            // Text keeps whatever background is already painted underneath.
            if let Some(cell) = buf.get_mut(x, y) {
                cell.char = ch;
                cell.fg = fg;
                cell.style = element.style.text_style;
            }
            x += width.max(1);
        }
    }
}
