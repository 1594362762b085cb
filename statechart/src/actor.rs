use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::MachineEvent;
use crate::error::MachineError;
use crate::interpreter::{Interpreter, Status};
use crate::machine::Machine;
use crate::service::Subscription;
use crate::snapshot::{Snapshot, StateValue};

type Observer<C> = Box<dyn FnMut(&Snapshot<C>)>;

/// Receives events on behalf of an actor without knowing its context type.
trait Mailbox<E> {
    fn deliver(&self, event: E);
}

/// Cloneable handle for sending events back into an actor, typically held by
/// a running service. Holds no strong reference: once the actor is dropped,
/// sends are ignored.
pub struct Sender<E> {
    mailbox: Weak<dyn Mailbox<E>>,
}

impl<E> Sender<E> {
    /// Queue `event` and process it unless the actor is already mid-event,
    /// in which case it runs right after the current one. Returns false if
    /// the actor no longer exists.
    pub fn send(&self, event: E) -> bool {
        match self.mailbox.upgrade() {
            Some(mailbox) => {
                mailbox.deliver(event);
                true
            }
            None => false,
        }
    }
}

impl<E> Clone for Sender<E> {
    fn clone(&self) -> Self {
        Self {
            mailbox: Weak::clone(&self.mailbox),
        }
    }
}

struct Inner<C, E> {
    interpreter: RefCell<Interpreter<C, E>>,
    queue: RefCell<VecDeque<E>>,
    observers: RefCell<Vec<(u64, Observer<C>)>>,
    next_observer: Cell<u64>,
    /// Observers unsubscribed while being notified.
    unsubscribed: RefCell<Vec<u64>>,
    processing: Cell<bool>,
}

impl<C: Clone + 'static, E: MachineEvent + 'static> Inner<C, E> {
    fn drain(&self) -> usize {
        if self.processing.replace(true) {
            return 0;
        }

        let mut processed = 0;
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            let changed = self.interpreter.borrow_mut().process(&event);
            processed += 1;
            if changed {
                self.notify();
            }
        }

        self.processing.set(false);
        processed
    }

    fn notify(&self) {
        let snapshot = self.interpreter.borrow().snapshot();

        let mut observers = std::mem::take(&mut *self.observers.borrow_mut());
        for (_, observer) in observers.iter_mut() {
            observer(&snapshot);
        }

        let mut current = self.observers.borrow_mut();
        let added = std::mem::take(&mut *current);
        *current = observers;
        current.extend(added);
        let unsubscribed = std::mem::take(&mut *self.unsubscribed.borrow_mut());
        current.retain(|(id, _)| !unsubscribed.contains(id));
    }

    fn unsubscribe(&self, id: u64) {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(observer, _)| *observer != id);
        if observers.len() == before {
            // Currently taken out for notification.
            self.unsubscribed.borrow_mut().push(id);
        }
    }
}

impl<C: Clone + 'static, E: MachineEvent + 'static> Mailbox<E> for Inner<C, E> {
    fn deliver(&self, event: E) {
        self.queue.borrow_mut().push_back(event);
        self.drain();
    }
}

/// A running machine.
///
/// Cloning yields another handle to the same actor. Events are processed one
/// at a time to completion; events sent while one is being processed (from
/// actions, services or observers) are queued and run right after it.
/// Dropping the last handle stops all services.
pub struct Actor<C: 'static, E: 'static> {
    inner: Rc<Inner<C, E>>,
}

impl<C: 'static, E: 'static> Clone for Actor<C, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C: Clone + 'static, E: MachineEvent + 'static> Actor<C, E> {
    /// Check implementations, then start `machine` with `context`.
    pub fn spawn(machine: Machine<C, E>, context: C) -> Result<Self, MachineError> {
        machine.validate_implementations()?;

        let inner = Rc::new_cyclic(|weak: &Weak<Inner<C, E>>| {
            let mailbox: Weak<dyn Mailbox<E>> = weak.clone();
            Inner {
                interpreter: RefCell::new(Interpreter::new(machine, context, Sender { mailbox })),
                queue: RefCell::new(VecDeque::new()),
                observers: RefCell::new(Vec::new()),
                next_observer: Cell::new(0),
                unsubscribed: RefCell::new(Vec::new()),
                processing: Cell::new(false),
            }
        });

        // Services started on initial entry may send immediately; hold those
        // events until the initial configuration is complete.
        inner.processing.set(true);
        inner.interpreter.borrow_mut().start();
        inner.processing.set(false);
        inner.drain();

        Ok(Self { inner })
    }

    pub fn send(&self, event: E) {
        self.inner.deliver(event);
    }

    pub fn sender(&self) -> Sender<E> {
        let weak = Rc::downgrade(&self.inner);
        let mailbox: Weak<dyn Mailbox<E>> = weak;
        Sender { mailbox }
    }

    /// Process any queued events. Returns how many were processed.
    pub fn flush(&self) -> usize {
        self.inner.drain()
    }

    pub fn snapshot(&self) -> Snapshot<C> {
        self.inner.interpreter.borrow().snapshot()
    }

    pub fn value(&self) -> StateValue {
        self.inner.interpreter.borrow().value()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.snapshot().has_tag(tag)
    }

    pub fn matches(&self, path: &str) -> bool {
        self.snapshot().matches(path)
    }

    /// Read the context without cloning it.
    pub fn with_context<R>(&self, read: impl FnOnce(&C) -> R) -> R {
        read(self.inner.interpreter.borrow().context())
    }

    /// Call `observer` with a fresh snapshot after every event that took a
    /// transition. Dropping the returned subscription unsubscribes.
    pub fn subscribe(&self, observer: impl FnMut(&Snapshot<C>) + 'static) -> Subscription {
        let id = self.inner.next_observer.get();
        self.inner.next_observer.set(id + 1);
        self.inner
            .observers
            .borrow_mut()
            .push((id, Box::new(observer)));

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.unsubscribe(id);
            }
        })
    }

    /// Stop services and ignore further events.
    pub fn stop(&self) {
        self.inner.queue.borrow_mut().clear();
        self.inner.interpreter.borrow_mut().stop();
    }

    pub fn is_running(&self) -> bool {
        self.inner.interpreter.borrow().status() == Status::Running
    }
}
