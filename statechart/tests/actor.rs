mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use common::{Ev, ev};
use statechart::{Actor, Implementations, Machine, Sender, StateConfig, Subscription, Transition};

type Config = StateConfig<(), Ev>;

/// Counts live service instances and keeps the latest sender.
#[derive(Default)]
struct Tracker {
    live: Cell<i32>,
    started: Cell<i32>,
    sender: RefCell<Option<Sender<Ev>>>,
}

fn watched(tracker: &Rc<Tracker>) -> Implementations<(), Ev> {
    let tracker = Rc::clone(tracker);
    Implementations::new().service("watch", move |_, sender| {
        tracker.live.set(tracker.live.get() + 1);
        tracker.started.set(tracker.started.get() + 1);
        *tracker.sender.borrow_mut() = Some(sender);

        let tracker = Rc::clone(&tracker);
        Subscription::new(move || tracker.live.set(tracker.live.get() - 1))
    })
}

fn drag_machine(tracker: &Rc<Tracker>) -> Machine<(), Ev> {
    Machine::new(
        "drag",
        Config::compound("idle")
            .state("idle", Config::atomic().on("down", Transition::to("dragging")))
            .state(
                "dragging",
                Config::atomic()
                    .invoke("watch")
                    .on("up", Transition::to("idle"))
                    .on("cancel", Transition::to("idle"))
                    .on("again", Transition::to("dragging")),
            ),
    )
    .unwrap()
    .provide(watched(tracker))
}

// ============================================================================
// Services
// ============================================================================

#[test]
fn test_service_lives_exactly_while_state_is_active() {
    let tracker = Rc::new(Tracker::default());
    let actor = Actor::spawn(drag_machine(&tracker), ()).unwrap();
    assert_eq!(tracker.live.get(), 0);

    actor.send(ev("down"));
    assert_eq!(tracker.live.get(), 1);

    actor.send(ev("up"));
    assert_eq!(tracker.live.get(), 0);

    actor.send(ev("down"));
    actor.send(ev("cancel"));
    assert_eq!(tracker.live.get(), 0);
    assert_eq!(tracker.started.get(), 2);
}

#[test]
fn test_reentering_restarts_service() {
    let tracker = Rc::new(Tracker::default());
    let actor = Actor::spawn(drag_machine(&tracker), ()).unwrap();

    actor.send(ev("down"));
    actor.send(ev("again"));

    assert_eq!(tracker.live.get(), 1);
    assert_eq!(tracker.started.get(), 2);
}

#[test]
fn test_service_sends_events_back() {
    let tracker = Rc::new(Tracker::default());
    let actor = Actor::spawn(drag_machine(&tracker), ()).unwrap();
    actor.send(ev("down"));

    let sender = tracker.sender.borrow().clone().unwrap();
    assert!(sender.send(ev("cancel")));

    assert!(actor.matches("idle"));
    assert_eq!(tracker.live.get(), 0);
}

#[test]
fn test_stop_drops_services_and_ignores_events() {
    let tracker = Rc::new(Tracker::default());
    let actor = Actor::spawn(drag_machine(&tracker), ()).unwrap();
    actor.send(ev("down"));

    actor.stop();

    assert!(!actor.is_running());
    assert_eq!(tracker.live.get(), 0);
    actor.send(ev("up"));
    assert!(actor.matches("dragging"));
}

#[test]
fn test_dropping_actor_drops_services() {
    let tracker = Rc::new(Tracker::default());
    let actor = Actor::spawn(drag_machine(&tracker), ()).unwrap();
    actor.send(ev("down"));
    let sender = tracker.sender.borrow().clone().unwrap();

    drop(actor);

    assert_eq!(tracker.live.get(), 0);
    assert!(!sender.send(ev("up")));
}

#[test]
fn test_service_started_on_initial_entry() {
    let tracker = Rc::new(Tracker::default());
    let machine = Machine::new(
        "boot",
        Config::compound("watching").state("watching", Config::atomic().invoke("watch")),
    )
    .unwrap()
    .provide(watched(&tracker));

    let actor = Actor::spawn(machine, ()).unwrap();

    assert_eq!(tracker.live.get(), 1);
    actor.stop();
    assert_eq!(tracker.live.get(), 0);
}

#[test]
fn test_event_sent_during_start_runs_after_start() {
    let machine = Machine::new(
        "eager",
        Config::compound("a")
            .state("a", Config::atomic().invoke("kick").on("kicked", Transition::to("b")))
            .state("b", Config::atomic()),
    )
    .unwrap()
    .provide(Implementations::new().service("kick", |_, sender: Sender<Ev>| {
        sender.send(ev("kicked"));
        Subscription::new(|| {})
    }));

    let actor = Actor::spawn(machine, ()).unwrap();

    assert!(actor.matches("b"));
}

// ============================================================================
// Subscriptions
// ============================================================================

fn toggle() -> Machine<(), Ev> {
    Machine::new(
        "toggle",
        Config::compound("off")
            .state("off", Config::atomic().on("toggle", Transition::to("on")))
            .state("on", Config::atomic().tag("lit").on("toggle", Transition::to("off"))),
    )
    .unwrap()
}

#[test]
fn test_observer_sees_each_transition() {
    let actor = Actor::spawn(toggle(), ()).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _sub = actor.subscribe(move |snapshot| {
        sink.borrow_mut().push(snapshot.value().to_string());
    });

    actor.send(ev("toggle"));
    actor.send(ev("ignored"));
    actor.send(ev("toggle"));

    assert_eq!(*seen.borrow(), ["on", "off"]);
}

#[test]
fn test_dropping_subscription_unsubscribes() {
    let actor = Actor::spawn(toggle(), ()).unwrap();
    let count = Rc::new(Cell::new(0));
    let counter = Rc::clone(&count);
    let sub = actor.subscribe(move |_| counter.set(counter.get() + 1));

    actor.send(ev("toggle"));
    drop(sub);
    actor.send(ev("toggle"));

    assert_eq!(count.get(), 1);
}

#[test]
fn test_observer_can_send_events() {
    let actor = Actor::spawn(toggle(), ()).unwrap();
    let handle = actor.clone();
    let fired = Rc::new(Cell::new(false));
    let flag = Rc::clone(&fired);
    let _sub = actor.subscribe(move |snapshot| {
        if snapshot.has_tag("lit") && !flag.replace(true) {
            handle.send(ev("toggle"));
        }
    });

    actor.send(ev("toggle"));

    assert!(fired.get());
    assert!(actor.matches("off"));
}

#[test]
fn test_flush_reports_nothing_when_idle() {
    let actor = Actor::spawn(toggle(), ()).unwrap();
    assert_eq!(actor.flush(), 0);
}

#[test]
fn test_actor_sender_delivers_until_actor_is_gone() {
    let actor = Actor::spawn(toggle(), ()).unwrap();
    let sender = actor.sender();

    assert!(sender.send(ev("toggle")));
    assert!(actor.has_tag("lit"));

    drop(actor);
    assert!(!sender.send(ev("toggle")));
}
