use std::rc::Rc;

use crate::implementations::{ActionFn, GuardFn};

/// An action run on entry, exit, or while taking a transition.
pub enum Action<C, E> {
    /// Resolved against [`Implementations`](crate::Implementations) when the
    /// actor is spawned.
    Named(String),
    Inline(ActionFn<C, E>),
}

impl<C, E> Action<C, E> {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Inline context update. The event is `None` for the initial entry.
    pub fn assign(update: impl Fn(&mut C, Option<&E>) + 'static) -> Self {
        Self::Inline(Rc::new(update))
    }
}

/// Condition a transition must satisfy to be taken.
pub enum Guard<C, E> {
    Named(String),
    Inline(GuardFn<C, E>),
}

impl<C, E> Guard<C, E> {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn when(condition: impl Fn(&C, Option<&E>) -> bool + 'static) -> Self {
        Self::Inline(Rc::new(condition))
    }
}

pub struct Transition<C, E> {
    pub(crate) target: Option<String>,
    pub(crate) actions: Vec<Action<C, E>>,
    pub(crate) guard: Option<Guard<C, E>>,
}

impl<C, E> Transition<C, E> {
    /// Transition to `target`.
    ///
    /// Targets resolve against the source state's siblings and may descend
    /// with dots (`"dragging"`, `"collapse.collapsed"`); a leading `#`
    /// resolves from the root instead (`"#drag.idle"`). A state targeting
    /// itself is exited and re-entered.
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            actions: Vec::new(),
            guard: None,
        }
    }

    /// Targetless transition: runs its actions without leaving any state.
    pub fn stay() -> Self {
        Self {
            target: None,
            actions: Vec::new(),
            guard: None,
        }
    }

    pub fn action(mut self, action: Action<C, E>) -> Self {
        self.actions.push(action);
        self
    }

    pub fn guard(mut self, guard: Guard<C, E>) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn when(self, condition: impl Fn(&C, Option<&E>) -> bool + 'static) -> Self {
        self.guard(Guard::when(condition))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateKind {
    Atomic,
    /// Exactly one child active at a time, starting with `initial`.
    Compound { initial: String },
    /// All children active at once.
    Parallel,
}

/// Declarative description of one state and its subtree.
pub struct StateConfig<C, E> {
    pub(crate) kind: StateKind,
    pub(crate) children: Vec<(String, StateConfig<C, E>)>,
    pub(crate) tags: Vec<String>,
    pub(crate) entry: Vec<Action<C, E>>,
    pub(crate) exit: Vec<Action<C, E>>,
    pub(crate) on: Vec<(String, Transition<C, E>)>,
    pub(crate) always: Vec<Transition<C, E>>,
    pub(crate) invoke: Vec<String>,
}

impl<C, E> StateConfig<C, E> {
    fn with_kind(kind: StateKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
            tags: Vec::new(),
            entry: Vec::new(),
            exit: Vec::new(),
            on: Vec::new(),
            always: Vec::new(),
            invoke: Vec::new(),
        }
    }

    pub fn atomic() -> Self {
        Self::with_kind(StateKind::Atomic)
    }

    pub fn compound(initial: impl Into<String>) -> Self {
        Self::with_kind(StateKind::Compound {
            initial: initial.into(),
        })
    }

    pub fn parallel() -> Self {
        Self::with_kind(StateKind::Parallel)
    }

    /// Add a child state. Children keep declaration order, which is also
    /// the order their actions run in.
    pub fn state(mut self, key: impl Into<String>, config: StateConfig<C, E>) -> Self {
        self.children.push((key.into(), config));
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn entry(mut self, action: Action<C, E>) -> Self {
        self.entry.push(action);
        self
    }

    pub fn exit(mut self, action: Action<C, E>) -> Self {
        self.exit.push(action);
        self
    }

    /// Handle `event`. Several transitions may be declared for one event;
    /// the first whose guard passes is taken.
    pub fn on(mut self, event: impl Into<String>, transition: Transition<C, E>) -> Self {
        self.on.push((event.into(), transition));
        self
    }

    /// Eventless transition, checked after every processed event until no
    /// more are enabled.
    pub fn always(mut self, transition: Transition<C, E>) -> Self {
        self.always.push(transition);
        self
    }

    /// Run the named service while this state is active.
    pub fn invoke(mut self, service: impl Into<String>) -> Self {
        self.invoke.push(service.into());
        self
    }
}
