//! Click, drag and double-click the boxes; routed pointer events are logged
//! to `pointer.log` and the last one is shown on screen. Press `q` to quit.

use std::fs::File;

use crossterm::event::Event;
use simplelog::{Config, LevelFilter, WriteLogger};
use tuidom::{
    Color, Edges, Element, Key, KeyboardEvent, PointerRouter, Size, Style, Terminal,
};

fn main() -> std::io::Result<()> {
    let log_file = File::create("pointer.log")?;
    if let Err(e) = WriteLogger::init(LevelFilter::Trace, Config::default(), log_file) {
        eprintln!("logger: {e}");
    }

    let mut term = Terminal::new()?;
    let mut router = PointerRouter::default();
    let mut last = String::from("no events yet");

    loop {
        let root = ui(&last, router.capture().target());
        term.render(&root)?;

        for event in term.poll(None)? {
            match event {
                Event::Key(key) => {
                    if KeyboardEvent::from(key).key == Key::Char('q') {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    for dom_event in router.route_mouse(mouse, &root, term.layout()) {
                        log::info!("{} -> {}", dom_event.kind(), dom_event.target());
                        if let tuidom::DomEvent::PointerDown(p) = &dom_event {
                            router.capture().set(&p.target, p.pointer_id);
                        }
                        last = format!(
                            "{} on {} at ({}, {})",
                            dom_event.kind(),
                            dom_event.target(),
                            dom_event.pointer().client_x,
                            dom_event.pointer().client_y
                        );
                    }
                }
                Event::FocusLost => {
                    for dom_event in router.cancel() {
                        log::info!("{} -> {}", dom_event.kind(), dom_event.target());
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(last: &str, captured: Option<String>) -> Element {
    Element::col()
        .width(Size::Fill)
        .height(Size::Fill)
        .padding(Edges::all(1))
        .gap(1)
        .child(Element::text(last.to_string()).style(Style::new().bold()))
        .child(Element::text(format!(
            "captured: {}",
            captured.as_deref().unwrap_or("-")
        )))
        .child(
            Element::row()
                .gap(2)
                .child(target("left", Color::rgb(40, 60, 120)))
                .child(target("right", Color::rgb(120, 40, 60))),
        )
}

fn target(id: &str, color: Color) -> Element {
    Element::box_()
        .id(id)
        .width(Size::Fixed(16))
        .height(Size::Fixed(6))
        .padding(Edges::all(1))
        .style(Style::new().background(color))
        .pointer_events(true)
        .child(Element::text(id.to_string()))
}
