use std::error::Error;
use std::fs::File;
use std::io;

use crossterm::event::{Event, KeyEventKind};
use resizable_panel::{PanelConfig, PanelController};
use simplelog::{Config, LevelFilter, WriteLogger};
use tuidom::{Key, KeyboardEvent, PointerRouter, RouterConfig, Terminal, Window};

fn main() -> Result<(), Box<dyn Error>> {
    let log_file = File::create("resizable-panel.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let window = Window::new();
    let mut router = PointerRouter::new(RouterConfig::default());
    let (panel, handle) = PanelController::new(PanelConfig::default(), &window, router.capture())?;

    // Inspector: every transition lands in the log.
    let _inspector = handle.subscribe(|snapshot| {
        let ctx = snapshot.context();
        log::debug!(
            "[inspect] {} width={} height={} tags={:?}",
            snapshot.value(),
            ctx.width,
            ctx.height,
            snapshot.tags()
        );
    });

    let mut terminal = Terminal::new()?;
    let result = run(&mut terminal, &mut router, &window, &panel);

    panel.stop();
    drop(terminal);
    if let Err(e) = &result {
        log::error!("[panel] exiting with error: {e}");
    }
    Ok(result?)
}

fn run(
    terminal: &mut Terminal,
    router: &mut PointerRouter,
    window: &Window,
    panel: &PanelController,
) -> io::Result<()> {
    loop {
        let viewport = crossterm::terminal::size()?;
        let root = panel.view(viewport);
        let layout = terminal.render(&root)?;
        panel.mount(layout);

        for event in terminal.poll(None)? {
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let key = KeyboardEvent::from(key);
                    if is_quit(&key) {
                        return Ok(());
                    }
                    window.dispatch_key(&key);
                }
                Event::Mouse(mouse) => {
                    for dom_event in router.route_mouse(mouse, &root, terminal.layout()) {
                        panel.dispatch(&dom_event);
                    }
                }
                Event::FocusLost | Event::Resize(..) => {
                    for dom_event in router.cancel() {
                        panel.dispatch(&dom_event);
                    }
                }
                _ => {}
            }
        }
    }
}

fn is_quit(key: &KeyboardEvent) -> bool {
    match key.key {
        Key::Char('q') => key.modifiers.none(),
        Key::Char('c') => key.modifiers.ctrl,
        _ => false,
    }
}
