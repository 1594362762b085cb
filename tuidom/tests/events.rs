use std::time::{Duration, Instant};

use crossterm::event::{KeyModifiers, MouseButton as CtButton, MouseEvent, MouseEventKind};
use tuidom::event::MOUSE_POINTER_ID;
use tuidom::{
    hit_test, DomEvent, Element, LayoutResult, PointerEvent, PointerRouter, Rect,
    RouterConfig,
};

fn create_layout(elements: &[(&str, Rect)]) -> LayoutResult {
    let mut layout = LayoutResult::new();
    for (id, rect) in elements {
        layout.insert(id.to_string(), *rect);
    }
    layout
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn down(x: u16, y: u16) -> MouseEvent {
    mouse(MouseEventKind::Down(CtButton::Left), x, y)
}

fn drag(x: u16, y: u16) -> MouseEvent {
    mouse(MouseEventKind::Drag(CtButton::Left), x, y)
}

fn moved(x: u16, y: u16) -> MouseEvent {
    mouse(MouseEventKind::Moved, x, y)
}

fn up(x: u16, y: u16) -> MouseEvent {
    mouse(MouseEventKind::Up(CtButton::Left), x, y)
}

/// Root with two pointer-aware handles, `a` at x=10 and `b` at x=20.
fn handles() -> (Element, LayoutResult) {
    let root = Element::box_()
        .id("root")
        .child(Element::box_().id("a").pointer_events(true))
        .child(Element::box_().id("b").pointer_events(true));
    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 40, 20)),
        ("a", Rect::new(10, 0, 1, 20)),
        ("b", Rect::new(20, 0, 1, 20)),
    ]);
    (root, layout)
}

fn kinds(events: &[DomEvent]) -> Vec<(&'static str, &str)> {
    events.iter().map(|e| (e.kind(), e.target())).collect()
}

// ============================================================================
// Hit Testing
// ============================================================================

#[test]
fn test_hit_test_requires_pointer_events() {
    let root = Element::box_()
        .id("root")
        .child(Element::text("label").id("label"))
        .child(Element::box_().id("handle").pointer_events(true));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 50)),
        ("label", Rect::new(0, 0, 10, 1)),
        ("handle", Rect::new(10, 0, 1, 50)),
    ]);

    assert_eq!(hit_test(&layout, &root, 10, 5), Some("handle".to_string()));
    assert_eq!(hit_test(&layout, &root, 2, 0), None);
}

#[test]
fn test_hit_test_finds_child_outside_parent_rect() {
    // Handles hang off the panel's edge, outside the panel's own rect
    let root = Element::box_()
        .id("panel")
        .child(Element::box_().id("handle").pointer_events(true));

    let layout = create_layout(&[
        ("panel", Rect::new(0, 10, 20, 10)),
        ("handle", Rect::new(0, 9, 20, 1)),
    ]);

    assert_eq!(hit_test(&layout, &root, 5, 9), Some("handle".to_string()));
}

#[test]
fn test_hit_test_later_sibling_wins() {
    let root = Element::box_()
        .id("root")
        .child(Element::box_().id("bottom").pointer_events(true))
        .child(Element::box_().id("top").pointer_events(true));

    let layout = create_layout(&[
        ("root", Rect::new(0, 0, 100, 100)),
        ("bottom", Rect::new(10, 10, 50, 50)),
        ("top", Rect::new(30, 30, 50, 50)),
    ]);

    assert_eq!(hit_test(&layout, &root, 40, 40), Some("top".to_string()));
    assert_eq!(hit_test(&layout, &root, 15, 15), Some("bottom".to_string()));
}

// ============================================================================
// Pointer routing
// ============================================================================

#[test]
fn test_down_on_element_emits_pointerdown_with_coordinates() {
    let (root, layout) = handles();
    let mut router = PointerRouter::default();

    let events = router.route_mouse(down(10, 7), &root, &layout);

    assert_eq!(
        events,
        vec![DomEvent::PointerDown(PointerEvent {
            target: "a".to_string(),
            pointer_id: MOUSE_POINTER_ID,
            client_x: 10,
            client_y: 7,
            button: tuidom::MouseButton::Left,
        })]
    );
    assert_eq!(kinds(&router.cancel()), vec![("pointercancel", "a")]);
}

#[test]
fn test_down_on_nothing_emits_nothing() {
    let (root, layout) = handles();
    let mut router = PointerRouter::default();

    assert!(router.route_mouse(down(5, 5), &root, &layout).is_empty());
    assert!(router.cancel().is_empty());
}

#[test]
fn test_uncaptured_drag_off_element_emits_pointerout() {
    let (root, layout) = handles();
    let mut router = PointerRouter::default();

    router.route_mouse(down(10, 3), &root, &layout);
    let events = router.route_mouse(drag(12, 3), &root, &layout);

    assert_eq!(kinds(&events), vec![("pointerout", "a")]);
}

#[test]
fn test_captured_moves_route_to_capturing_element() {
    let (root, layout) = handles();
    let mut router = PointerRouter::default();
    let capture = router.capture();

    router.route_mouse(down(10, 3), &root, &layout);
    capture.set("a", MOUSE_POINTER_ID);

    // Off every element, then over the other handle
    let off = router.route_mouse(drag(30, 3), &root, &layout);
    let over_b = router.route_mouse(drag(20, 3), &root, &layout);

    assert_eq!(kinds(&off), vec![("pointermove", "a")]);
    assert_eq!(off[0].pointer().client_x, 30);
    assert_eq!(kinds(&over_b), vec![("pointermove", "a")]);
}

#[test]
fn test_pointerup_goes_to_capture_and_releases_it() {
    let (root, layout) = handles();
    let mut router = PointerRouter::default();
    let capture = router.capture();

    router.route_mouse(down(10, 3), &root, &layout);
    capture.set("a", MOUSE_POINTER_ID);
    let events = router.route_mouse(up(30, 3), &root, &layout);

    assert_eq!(kinds(&events), vec![("pointerup", "a")]);
    assert_eq!(capture.target(), None);
    assert!(router.cancel().is_empty());
}

#[test]
fn test_hover_moves_without_press() {
    let (root, layout) = handles();
    let mut router = PointerRouter::default();

    let enter = router.route_mouse(moved(10, 1), &root, &layout);
    let leave = router.route_mouse(moved(11, 1), &root, &layout);

    assert_eq!(kinds(&enter), vec![("pointermove", "a")]);
    assert_eq!(kinds(&leave), vec![("pointerout", "a")]);
}

#[test]
fn test_moving_between_elements_emits_out_then_move() {
    let (root, layout) = handles();
    let mut router = PointerRouter::default();

    router.route_mouse(moved(10, 1), &root, &layout);
    let events = router.route_mouse(moved(20, 1), &root, &layout);

    assert_eq!(kinds(&events), vec![("pointerout", "a"), ("pointermove", "b")]);
}

#[test]
fn test_cancel_targets_capture_and_clears_press() {
    let (root, layout) = handles();
    let mut router = PointerRouter::default();
    let capture = router.capture();

    router.route_mouse(down(20, 3), &root, &layout);
    capture.set("b", MOUSE_POINTER_ID);
    let events = router.cancel();

    assert_eq!(kinds(&events), vec![("pointercancel", "b")]);
    assert_eq!(capture.target(), None);
    assert!(router.cancel().is_empty());
}

// ============================================================================
// Double click
// ============================================================================

#[test]
fn test_two_quick_clicks_emit_dblclick() {
    let (root, layout) = handles();
    let mut router = PointerRouter::default();
    let t0 = Instant::now();

    router.route_mouse_at(down(10, 3), &root, &layout, t0);
    let first = router.route_mouse_at(up(10, 3), &root, &layout, t0);
    router.route_mouse_at(down(10, 3), &root, &layout, t0 + Duration::from_millis(100));
    let second = router.route_mouse_at(up(10, 3), &root, &layout, t0 + Duration::from_millis(150));

    assert_eq!(kinds(&first), vec![("pointerup", "a")]);
    assert_eq!(kinds(&second), vec![("pointerup", "a"), ("dblclick", "a")]);
}

#[test]
fn test_slow_clicks_do_not_emit_dblclick() {
    let (root, layout) = handles();
    let mut router = PointerRouter::new(
        RouterConfig::default().double_click_interval(Duration::from_millis(200)),
    );
    let t0 = Instant::now();

    router.route_mouse_at(down(10, 3), &root, &layout, t0);
    router.route_mouse_at(up(10, 3), &root, &layout, t0);
    router.route_mouse_at(down(10, 3), &root, &layout, t0 + Duration::from_millis(300));
    let second = router.route_mouse_at(up(10, 3), &root, &layout, t0 + Duration::from_millis(300));

    assert_eq!(kinds(&second), vec![("pointerup", "a")]);
}

#[test]
fn test_clicks_on_different_elements_do_not_emit_dblclick() {
    let (root, layout) = handles();
    let mut router = PointerRouter::default();
    let t0 = Instant::now();

    router.route_mouse_at(down(10, 3), &root, &layout, t0);
    router.route_mouse_at(up(10, 3), &root, &layout, t0);
    router.route_mouse_at(down(20, 3), &root, &layout, t0);
    let second = router.route_mouse_at(up(20, 3), &root, &layout, t0);

    assert_eq!(kinds(&second), vec![("pointerup", "b")]);
}

#[test]
fn test_third_click_starts_a_new_pair() {
    let (root, layout) = handles();
    let mut router = PointerRouter::default();
    let t0 = Instant::now();

    let mut dblclicks = 0;
    for _ in 0..3 {
        router.route_mouse_at(down(10, 3), &root, &layout, t0);
        let events = router.route_mouse_at(up(10, 3), &root, &layout, t0);
        dblclicks += events.iter().filter(|e| e.kind() == "dblclick").count();
    }

    assert_eq!(dblclicks, 1);
}

#[test]
fn test_drag_release_is_not_a_click() {
    let (root, layout) = handles();
    let mut router = PointerRouter::default();
    let t0 = Instant::now();

    // Press, move along the handle, release on it
    router.route_mouse_at(down(10, 3), &root, &layout, t0);
    router.route_mouse_at(drag(10, 6), &root, &layout, t0);
    let release = router.route_mouse_at(up(10, 6), &root, &layout, t0);

    router.route_mouse_at(down(10, 6), &root, &layout, t0 + Duration::from_millis(100));
    let click = router.route_mouse_at(up(10, 6), &root, &layout, t0 + Duration::from_millis(100));

    assert_eq!(kinds(&release), vec![("pointerup", "a")]);
    assert_eq!(kinds(&click), vec![("pointerup", "a")]);
}

#[test]
fn test_drag_between_clicks_breaks_the_pair() {
    let (root, layout) = handles();
    let mut router = PointerRouter::default();
    let t0 = Instant::now();

    router.route_mouse_at(down(10, 3), &root, &layout, t0);
    router.route_mouse_at(up(10, 3), &root, &layout, t0);
    router.route_mouse_at(down(10, 3), &root, &layout, t0);
    router.route_mouse_at(drag(10, 4), &root, &layout, t0);
    let dragged = router.route_mouse_at(up(10, 4), &root, &layout, t0);
    router.route_mouse_at(down(10, 4), &root, &layout, t0);
    let single = router.route_mouse_at(up(10, 4), &root, &layout, t0);
    router.route_mouse_at(down(10, 4), &root, &layout, t0);
    let double = router.route_mouse_at(up(10, 4), &root, &layout, t0);

    assert_eq!(kinds(&dragged), vec![("pointerup", "a")]);
    assert_eq!(kinds(&single), vec![("pointerup", "a")]);
    assert_eq!(kinds(&double), vec![("pointerup", "a"), ("dblclick", "a")]);
}
