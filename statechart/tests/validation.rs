mod common;

use common::Ev;
use statechart::{
    Action, Actor, Guard, Implementations, Machine, MachineError, StateConfig, Transition,
};

type Config = StateConfig<(), Ev>;

#[test]
fn test_unknown_target_is_rejected() {
    let result = Machine::new(
        "m",
        Config::compound("a").state("a", Config::atomic().on("go", Transition::to("nowhere"))),
    );

    assert_eq!(
        result.err(),
        Some(MachineError::UnknownTarget {
            state: "m.a".to_string(),
            event: "go".to_string(),
            target: "nowhere".to_string(),
        })
    );
}

#[test]
fn test_unknown_target_in_always_is_reported() {
    let result = Machine::new(
        "m",
        Config::compound("a").state("a", Config::atomic().always(Transition::to("b"))),
    );

    assert!(matches!(
        result.err(),
        Some(MachineError::UnknownTarget { event, .. }) if event == "(always)"
    ));
}

#[test]
fn test_unknown_initial_is_rejected() {
    let result = Machine::new("m", Config::compound("missing").state("a", Config::atomic()));

    assert_eq!(
        result.err(),
        Some(MachineError::UnknownInitial {
            state: "m".to_string(),
            initial: "missing".to_string(),
        })
    );
}

#[test]
fn test_compound_and_parallel_need_children() {
    assert_eq!(
        Machine::new("m", Config::compound("a")).err(),
        Some(MachineError::NoChildren {
            state: "m".to_string()
        })
    );
    assert_eq!(
        Machine::new("m", Config::parallel().state("r", Config::parallel())).err(),
        Some(MachineError::NoChildren {
            state: "m.r".to_string()
        })
    );
}

#[test]
fn test_atomic_with_children_is_rejected() {
    let result = Machine::new("m", Config::atomic().state("a", Config::atomic()));

    assert_eq!(
        result.err(),
        Some(MachineError::AtomicWithChildren {
            state: "m".to_string()
        })
    );
}

#[test]
fn test_duplicate_child_is_rejected() {
    let result = Machine::new(
        "m",
        Config::compound("a")
            .state("a", Config::atomic())
            .state("a", Config::atomic()),
    );

    assert_eq!(
        result.err(),
        Some(MachineError::DuplicateChild {
            state: "m".to_string(),
            child: "a".to_string(),
        })
    );
}

#[test]
fn test_dotted_and_absolute_targets_resolve() {
    let machine = Machine::new(
        "m",
        Config::parallel()
            .state(
                "left",
                Config::compound("a")
                    .state("a", Config::atomic().on("jump", Transition::to("#right.y")))
                    .state("b", Config::atomic()),
            )
            .state(
                "right",
                Config::compound("x")
                    .state("x", Config::atomic())
                    .state("y", Config::atomic()),
            )
            .on("reset", Transition::to("left.b")),
    );

    assert!(machine.is_ok());
}

// ============================================================================
// Implementations
// ============================================================================

#[test]
fn test_missing_named_action_fails_spawn() {
    let machine = Machine::new(
        "m",
        Config::compound("a").state("a", Config::atomic().entry(Action::named("hello"))),
    )
    .unwrap();

    assert_eq!(
        Actor::spawn(machine, ()).err(),
        Some(MachineError::MissingImplementation {
            kind: "action",
            name: "hello".to_string(),
        })
    );
}

#[test]
fn test_missing_guard_and_service_fail_spawn() {
    let guarded = Machine::new(
        "m",
        Config::compound("a").state(
            "a",
            Config::atomic().on("go", Transition::stay().guard(Guard::named("ok"))),
        ),
    )
    .unwrap();
    let invoking = Machine::new(
        "m",
        Config::compound("a").state("a", Config::atomic().invoke("ticker")),
    )
    .unwrap();

    assert!(matches!(
        Actor::spawn(guarded, ()).err(),
        Some(MachineError::MissingImplementation { kind: "guard", .. })
    ));
    assert!(matches!(
        Actor::spawn(invoking, ()).err(),
        Some(MachineError::MissingImplementation { kind: "service", .. })
    ));
}

#[test]
fn test_provided_implementations_satisfy_spawn() {
    let machine = Machine::new(
        "m",
        Config::compound("a").state("a", Config::atomic().entry(Action::named("hello"))),
    )
    .unwrap()
    .provide(Implementations::new().action("hello", |_, _| {}));

    assert!(Actor::spawn(machine, ()).is_ok());
}
