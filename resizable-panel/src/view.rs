//! Builds the element tree for one frame.

use statechart::Snapshot;
use tuidom::{Color, Edges, Element, Position, Rect, Size, Style};

use crate::config::PanelConfig;
use crate::context::PanelContext;
use crate::machine::{COLLAPSED, DRAGGING};

pub const APP: &str = "app";
pub const PANEL: &str = "panel";
pub const HANDLE_X: &str = "handle-x";
pub const HANDLE_Y: &str = "handle-y";

const TITLE: &str = "Resizable panel";
const PANEL_BACKGROUND: &str = "#111";
const HANDLE_COLOR: &str = "#555";

/// Handle glyphs: idle (`col-resize` / `row-resize`) and dragging
/// (`ew-resize` / `ns-resize`).
const HANDLE_X_IDLE: char = '│';
const HANDLE_X_DRAGGING: char = '↔';
const HANDLE_Y_IDLE: char = '─';
const HANDLE_Y_DRAGGING: char = '↕';

/// Where the panel lands in a `viewport_width` x `viewport_height` viewport.
///
/// Expanded panels are at least `min_viewport_fraction` of the viewport on
/// each axis and never larger than it. Collapsed panels have no size. The
/// panel is pinned to the bottom-left corner.
pub fn panel_rect(
    width: i32,
    height: i32,
    collapsed: bool,
    viewport: (u16, u16),
    config: &PanelConfig,
) -> Rect {
    let (viewport_width, viewport_height) = viewport;
    if collapsed {
        return Rect::new(0, viewport_height, 0, 0);
    }

    let fit = |size: i32, extent: u16| -> u16 {
        let min = min_extent(extent, config.min_viewport_fraction);
        let size = size.clamp(0, i32::from(extent)) as u16;
        size.max(min).min(extent)
    };
    let w = fit(width, viewport_width);
    let h = fit(height, viewport_height);

    Rect::new(0, viewport_height - h, w, h)
}

fn min_extent(extent: u16, fraction: f32) -> u16 {
    (f32::from(extent) * fraction).ceil() as u16
}

/// Render the whole screen for `snapshot`.
pub fn render(
    snapshot: &Snapshot<PanelContext>,
    viewport: (u16, u16),
    config: &PanelConfig,
) -> Element {
    let ctx = snapshot.context();
    let dragging = snapshot.has_tag(DRAGGING);
    let collapsed = snapshot.has_tag(COLLAPSED);

    let header = Element::col()
        .id("header")
        .width(Size::Fill)
        .padding(Edges::symmetric(0, 1))
        .gap(1)
        .child(Element::text(TITLE).style(Style::new().bold()))
        .child(Element::text(snapshot.value().to_json_pretty()))
        .child(Element::text(format!(
            "width: {}\nheight: {}",
            ctx.width, ctx.height
        )));

    Element::col()
        .id(APP)
        .width(Size::Fill)
        .height(Size::Fill)
        .child(header)
        .child(panel(ctx, dragging, collapsed, viewport, config))
}

fn panel(
    ctx: &PanelContext,
    dragging: bool,
    collapsed: bool,
    viewport: (u16, u16),
    config: &PanelConfig,
) -> Element {
    let rect = panel_rect(ctx.width, ctx.height, collapsed, viewport, config);
    let background = Color::hex(PANEL_BACKGROUND).unwrap_or(Color::rgb(17, 17, 17));

    let (padding, min_width, min_height) = if collapsed {
        (Edges::all(0), 0, 0)
    } else {
        let (viewport_width, viewport_height) = viewport;
        (
            Edges::all(1),
            min_extent(viewport_width, config.min_viewport_fraction),
            min_extent(viewport_height, config.min_viewport_fraction),
        )
    };

    Element::box_()
        .id(PANEL)
        .position(Position::Absolute)
        .left(i32::from(rect.x))
        .top(i32::from(rect.y))
        .width(Size::Fixed(rect.width))
        .height(Size::Fixed(rect.height))
        .min_width(min_width)
        .min_height(min_height)
        .padding(padding)
        .style(
            Style::new()
                .background(background)
                .foreground(Color::rgb(255, 255, 255))
                .bold(),
        )
        .child(handle_x(rect, dragging))
        .child(handle_y(rect, dragging))
}

fn handle_style(dragging: bool) -> Style {
    let base = Color::hex(HANDLE_COLOR).unwrap_or(Color::rgb(85, 85, 85));
    let color = if dragging { base.lighten(0.4) } else { base };
    Style::new().foreground(color)
}

/// One column right of the panel, full panel height.
///
/// A collapsed panel has no width, so "right of the panel" is the y-handle's
/// cell. Cells cannot overlap, so the x-handle moves one column over to stay
/// reachable.
fn handle_x(panel: Rect, dragging: bool) -> Element {
    let glyph = if dragging {
        HANDLE_X_DRAGGING
    } else {
        HANDLE_X_IDLE
    };

    Element::box_()
        .id(HANDLE_X)
        .position(Position::Absolute)
        .left(i32::from(panel.right().max(1)))
        .top(i32::from(panel.y.min(panel.bottom().saturating_sub(1))))
        .width(Size::Fixed(1))
        .height(Size::Fixed(panel.height.max(1)))
        .fill(glyph)
        .style(handle_style(dragging))
        .pointer_events(true)
}

/// One row above the panel, full panel width.
fn handle_y(panel: Rect, dragging: bool) -> Element {
    let glyph = if dragging {
        HANDLE_Y_DRAGGING
    } else {
        HANDLE_Y_IDLE
    };

    Element::box_()
        .id(HANDLE_Y)
        .position(Position::Absolute)
        .left(i32::from(panel.x))
        .top(i32::from(panel.y) - 1)
        .width(Size::Fixed(panel.width.max(1)))
        .height(Size::Fixed(1))
        .fill(glyph)
        .style(handle_style(dragging))
        .pointer_events(true)
}
