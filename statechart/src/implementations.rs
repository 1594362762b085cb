use std::collections::HashMap;
use std::rc::Rc;

use crate::actor::Sender;
use crate::service::Subscription;

pub type ActionFn<C, E> = Rc<dyn Fn(&mut C, Option<&E>)>;
pub type GuardFn<C, E> = Rc<dyn Fn(&C, Option<&E>) -> bool>;
/// Starts a service. The returned [`Subscription`] stops it when dropped.
pub type ServiceFn<C, E> = Rc<dyn Fn(&C, Sender<E>) -> Subscription>;

/// Named actions, guards and services referenced by a machine definition.
pub struct Implementations<C, E> {
    pub(crate) actions: HashMap<String, ActionFn<C, E>>,
    pub(crate) guards: HashMap<String, GuardFn<C, E>>,
    pub(crate) services: HashMap<String, ServiceFn<C, E>>,
}

impl<C, E> Implementations<C, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(
        mut self,
        name: impl Into<String>,
        action: impl Fn(&mut C, Option<&E>) + 'static,
    ) -> Self {
        self.actions.insert(name.into(), Rc::new(action));
        self
    }

    pub fn guard(
        mut self,
        name: impl Into<String>,
        guard: impl Fn(&C, Option<&E>) -> bool + 'static,
    ) -> Self {
        self.guards.insert(name.into(), Rc::new(guard));
        self
    }

    pub fn service(
        mut self,
        name: impl Into<String>,
        service: impl Fn(&C, Sender<E>) -> Subscription + 'static,
    ) -> Self {
        self.services.insert(name.into(), Rc::new(service));
        self
    }

    /// Entries in `other` replace same-named entries in `self`.
    pub fn merge(mut self, other: Implementations<C, E>) -> Self {
        self.actions.extend(other.actions);
        self.guards.extend(other.guards);
        self.services.extend(other.services);
        self
    }
}

impl<C, E> Default for Implementations<C, E> {
    fn default() -> Self {
        Self {
            actions: HashMap::new(),
            guards: HashMap::new(),
            services: HashMap::new(),
        }
    }
}

impl<C, E> Clone for Implementations<C, E> {
    fn clone(&self) -> Self {
        Self {
            actions: self.actions.clone(),
            guards: self.guards.clone(),
            services: self.services.clone(),
        }
    }
}
