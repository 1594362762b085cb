use resizable_panel::view::{HANDLE_X, HANDLE_Y, PANEL, panel_rect, render};
use resizable_panel::{PanelConfig, PanelController, PanelEvent};
use tuidom::layout::layout;
use tuidom::render::render_to_buffer;
use tuidom::{Buffer, LayoutResult, PointerCapture, PointerEvent, Rect, Rgb, Window, hit_test};

const VIEWPORT: (u16, u16) = (80, 30);

fn controller(config: PanelConfig) -> PanelController {
    let (panel, _handle) = PanelController::new(config, &Window::new(), PointerCapture::new()).unwrap();
    panel
}

fn draw(panel: &PanelController) -> (LayoutResult, Buffer) {
    let root = panel.view(VIEWPORT);
    let layout = layout(&root, Rect::from_size(VIEWPORT.0, VIEWPORT.1));
    let mut buf = Buffer::new(VIEWPORT.0, VIEWPORT.1);
    render_to_buffer(&root, &layout, &mut buf);
    (layout, buf)
}

fn screen_text(buf: &Buffer) -> String {
    (0..buf.height())
        .map(|y| buf.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_panel_sits_bottom_left() {
    let config = PanelConfig::default();
    assert_eq!(
        panel_rect(40, 12, false, VIEWPORT, &config),
        Rect::new(0, 18, 40, 12)
    );
}

#[test]
fn test_panel_respects_viewport_minimum() {
    let config = PanelConfig::default();
    assert_eq!(
        panel_rect(3, 1, false, VIEWPORT, &config),
        Rect::new(0, 24, 16, 6)
    );
    assert_eq!(
        panel_rect(-20, -5, false, VIEWPORT, &config),
        Rect::new(0, 24, 16, 6)
    );
}

#[test]
fn test_panel_never_exceeds_viewport() {
    let config = PanelConfig::default();
    assert_eq!(
        panel_rect(500, 90, false, VIEWPORT, &config),
        Rect::new(0, 0, 80, 30)
    );
}

#[test]
fn test_collapsed_panel_has_no_size() {
    let config = PanelConfig::default();
    let rect = panel_rect(40, 12, true, VIEWPORT, &config);
    assert!(rect.is_empty());
    assert_eq!(rect.bottom(), 30);
}

// ============================================================================
// Layout of the rendered tree
// ============================================================================

#[test]
fn test_handles_border_the_panel() {
    let panel = controller(PanelConfig::default());

    let (layout, _) = draw(&panel);

    assert_eq!(layout[PANEL], Rect::new(0, 18, 40, 12));
    assert_eq!(layout[HANDLE_X], Rect::new(40, 18, 1, 12));
    assert_eq!(layout[HANDLE_Y], Rect::new(0, 17, 40, 1));
}

#[test]
fn test_collapsed_panel_keeps_reachable_handles() {
    let panel = controller(PanelConfig::new().default_size(2, 12).collapse_threshold(5));
    assert!(panel.is_collapsed());

    let (layout, _) = draw(&panel);

    assert!(layout[PANEL].is_empty());
    assert_eq!(layout[HANDLE_X], Rect::new(1, 29, 1, 1));
    assert_eq!(layout[HANDLE_Y], Rect::new(0, 29, 1, 1));

    let root = panel.view(VIEWPORT);
    assert_eq!(hit_test(&layout, &root, 0, 29).as_deref(), Some(HANDLE_Y));
    assert_eq!(hit_test(&layout, &root, 1, 29).as_deref(), Some(HANDLE_X));
}

#[test]
fn test_mount_attaches_anchor() {
    let panel = controller(PanelConfig::default());
    assert_eq!(panel.anchor().bounding_client_rect(), None);

    let (layout, _) = draw(&panel);
    panel.mount(&layout);

    assert_eq!(
        panel.anchor().bounding_client_rect(),
        Some(Rect::new(0, 18, 40, 12))
    );
}

// ============================================================================
// Painted output
// ============================================================================

#[test]
fn test_screen_shows_title_state_and_size() {
    let panel = controller(PanelConfig::default());

    let (_, buf) = draw(&panel);
    let text = screen_text(&buf);

    assert!(buf.row_text(0).starts_with(" Resizable panel"));
    assert!(text.contains(r#""drag": "idle","#));
    assert!(text.contains(r#""collapse": "normal""#));
    assert!(text.contains("width: 40"));
    assert!(text.contains("height: 12"));
}

#[test]
fn test_panel_is_dark_and_handles_are_drawn() {
    let panel = controller(PanelConfig::default());

    let (_, buf) = draw(&panel);

    assert_eq!(buf.get(0, 29).unwrap().bg, Rgb::new(17, 17, 17));
    assert_eq!(buf.get(39, 18).unwrap().bg, Rgb::new(17, 17, 17));
    assert_eq!(buf.get(40, 18).unwrap().bg, Rgb::BLACK);
    assert_eq!(buf.get(40, 25).unwrap().char, '│');
    assert_eq!(buf.get(10, 17).unwrap().char, '─');
}

#[test]
fn test_handle_glyphs_change_while_dragging() {
    let panel = controller(PanelConfig::default());
    let (_, idle) = draw(&panel);

    panel.send(PanelEvent::PointerDown(PointerEvent::new(HANDLE_X, 40, 20)));
    let (_, dragging) = draw(&panel);

    assert_eq!(dragging.get(40, 20).unwrap().char, '↔');
    assert_eq!(dragging.get(10, 17).unwrap().char, '↕');
    assert_ne!(dragging.get(40, 20).unwrap().fg, idle.get(40, 20).unwrap().fg);
    assert!(screen_text(&dragging).contains(r#""drag": "dragging","#));
}

#[test]
fn test_render_reads_snapshot_directly() {
    let panel = controller(PanelConfig::default());

    let root = render(&panel.snapshot(), VIEWPORT, panel.config());
    let layout = layout(&root, Rect::from_size(VIEWPORT.0, VIEWPORT.1));

    assert_eq!(layout[PANEL], Rect::new(0, 18, 40, 12));
}
