//! Run-to-completion statechart semantics.
//!
//! Each external event is one macrostep: the enabled transitions are
//! selected (one per active leaf, searching from the leaf towards the root),
//! then exits run deepest-first, then transition actions, then entries in
//! document order. Afterwards eventless transitions are taken until none is
//! enabled.

use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::MachineEvent;
use crate::actor::Sender;
use crate::definition::{Action, Guard};
use crate::implementations::Implementations;
use crate::machine::{Definition, Machine, NodeId, NodeKind, ROOT, ResolvedTransition};
use crate::service::Subscription;
use crate::snapshot::{Snapshot, StateValue};

/// Upper bound on eventless microsteps per event.
const MAX_EVENTLESS_STEPS: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    NotStarted,
    Running,
    Stopped,
}

/// Location of a transition inside the definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selected {
    On(NodeId, usize),
    Always(NodeId, usize),
}

pub(crate) struct Interpreter<C, E> {
    definition: Rc<Definition<C, E>>,
    implementations: Rc<Implementations<C, E>>,
    context: C,
    active: BTreeSet<NodeId>,
    services: BTreeMap<NodeId, Vec<Subscription>>,
    sender: Sender<E>,
    status: Status,
}

impl<C, E: MachineEvent> Interpreter<C, E> {
    pub(crate) fn new(machine: Machine<C, E>, context: C, sender: Sender<E>) -> Self {
        Self {
            definition: machine.definition,
            implementations: machine.implementations,
            context,
            active: BTreeSet::new(),
            services: BTreeMap::new(),
            sender,
            status: Status::NotStarted,
        }
    }

    pub(crate) fn status(&self) -> Status {
        self.status
    }

    pub(crate) fn context(&self) -> &C {
        &self.context
    }

    /// Enter the initial configuration.
    pub(crate) fn start(&mut self) {
        if self.status != Status::NotStarted {
            return;
        }
        self.status = Status::Running;

        let mut to_enter = BTreeSet::new();
        self.add_with_defaults(ROOT, &mut to_enter);
        self.enter_states(&to_enter, None);
        log::debug!(
            "[statechart] {} started in {}",
            self.definition.id,
            self.value()
        );
        self.settle(None);
    }

    /// Process one event. Returns true if any transition was taken.
    pub(crate) fn process(&mut self, event: &E) -> bool {
        let event_type = event.event_type();
        if self.status != Status::Running {
            log::warn!(
                "[statechart] {} is not running, dropping `{event_type}`",
                self.definition.id
            );
            return false;
        }

        let selected = self.select(Some(event));
        if selected.is_empty() {
            log::trace!(
                "[statechart] {} ignored `{event_type}` in {}",
                self.definition.id,
                self.value()
            );
            return false;
        }

        let before = self.value();
        self.microstep(&selected, Some(event));
        self.settle(Some(event));
        log::debug!(
            "[statechart] {} `{event_type}`: {before} -> {}",
            self.definition.id,
            self.value()
        );
        true
    }

    /// Stop all services. No further events are processed. Exit actions do
    /// not run.
    pub(crate) fn stop(&mut self) {
        if self.status == Status::Stopped {
            return;
        }
        self.status = Status::Stopped;
        // Innermost first, matching exit order.
        while let Some((node, subscriptions)) = self.services.pop_last() {
            log::trace!("[statechart] stopping services of {}", self.label(node));
            drop(subscriptions);
        }
        log::debug!("[statechart] {} stopped", self.definition.id);
    }

    fn settle(&mut self, event: Option<&E>) {
        for _ in 0..MAX_EVENTLESS_STEPS {
            let selected = self.select(None);
            if selected.is_empty() {
                return;
            }
            self.microstep(&selected, event);
        }
        log::warn!(
            "[statechart] {} eventless transitions still enabled after {MAX_EVENTLESS_STEPS} steps",
            self.definition.id
        );
    }

    /// Pick the transitions to take: for every active leaf in document order,
    /// the first enabled transition found walking from the leaf to the root.
    /// `event == None` selects eventless transitions.
    fn select(&self, event: Option<&E>) -> Vec<Selected> {
        let definition = Rc::clone(&self.definition);
        let mut selected: Vec<Selected> = Vec::new();
        let mut exiting: BTreeSet<NodeId> = BTreeSet::new();

        let leaves = self
            .active
            .iter()
            .copied()
            .filter(|&node| matches!(definition.nodes[node].kind, NodeKind::Atomic));

        for leaf in leaves {
            let Some(choice) = self.first_enabled(leaf, event) else {
                continue;
            };
            if selected.contains(&choice) {
                continue;
            }

            // An earlier transition already exits part of what this one would.
            let exits = self.exit_set(self.transition(choice));
            if !exits.is_disjoint(&exiting) {
                continue;
            }
            exiting.extend(exits);
            selected.push(choice);
        }

        selected
    }

    fn first_enabled(&self, leaf: NodeId, event: Option<&E>) -> Option<Selected> {
        let nodes = &self.definition.nodes;
        let mut current = Some(leaf);

        while let Some(node) = current {
            let found = match event {
                Some(event) => nodes[node]
                    .on
                    .iter()
                    .enumerate()
                    .find(|(_, (name, t))| {
                        name == event.event_type() && self.guard_passes(&t.guard, Some(event))
                    })
                    .map(|(i, _)| Selected::On(node, i)),
                None => nodes[node]
                    .always
                    .iter()
                    .enumerate()
                    .find(|(_, t)| self.guard_passes(&t.guard, None))
                    .map(|(i, _)| Selected::Always(node, i)),
            };
            if found.is_some() {
                return found;
            }
            current = nodes[node].parent;
        }

        None
    }

    fn transition(&self, selected: Selected) -> &ResolvedTransition<C, E> {
        match selected {
            Selected::On(node, i) => &self.definition.nodes[node].on[i].1,
            Selected::Always(node, i) => &self.definition.nodes[node].always[i],
        }
    }

    fn microstep(&mut self, selected: &[Selected], event: Option<&E>) {
        let definition = Rc::clone(&self.definition);
        let transition = |s: &Selected| -> &ResolvedTransition<C, E> {
            match *s {
                Selected::On(node, i) => &definition.nodes[node].on[i].1,
                Selected::Always(node, i) => &definition.nodes[node].always[i],
            }
        };

        let mut to_exit = BTreeSet::new();
        let mut to_enter = BTreeSet::new();
        for s in selected {
            let t = transition(s);
            to_exit.extend(self.exit_set(t));
            if let Some(target) = t.target {
                self.add_entry_set(t.source, target, &mut to_enter);
            }
        }

        self.exit_states(&to_exit, event);

        for s in selected {
            for action in &transition(s).actions {
                self.execute(action, event);
            }
        }

        self.enter_states(&to_enter, event);
    }

    fn exit_states(&mut self, to_exit: &BTreeSet<NodeId>, event: Option<&E>) {
        let definition = Rc::clone(&self.definition);
        for &node in to_exit.iter().rev() {
            if let Some(subscriptions) = self.services.remove(&node) {
                log::trace!("[statechart] stopping services of {}", self.label(node));
                drop(subscriptions);
            }
            for action in &definition.nodes[node].exit {
                self.execute(action, event);
            }
            self.active.remove(&node);
        }
    }

    fn enter_states(&mut self, to_enter: &BTreeSet<NodeId>, event: Option<&E>) {
        let definition = Rc::clone(&self.definition);
        for &node in to_enter {
            self.active.insert(node);
            for action in &definition.nodes[node].entry {
                self.execute(action, event);
            }
        }

        // Services start once the whole configuration is entered.
        for &node in to_enter {
            for name in &definition.nodes[node].invoke {
                let Some(service) = self.implementations.services.get(name).cloned() else {
                    log::warn!("[statechart] no service `{name}` for {}", self.label(node));
                    continue;
                };
                log::trace!("[statechart] starting `{name}` for {}", self.label(node));
                let subscription = service(&self.context, self.sender.clone());
                self.services.entry(node).or_default().push(subscription);
            }
        }
    }

    /// Active states the transition leaves: everything active below its
    /// domain. Targetless transitions leave nothing.
    fn exit_set(&self, transition: &ResolvedTransition<C, E>) -> BTreeSet<NodeId> {
        let Some(target) = transition.target else {
            return BTreeSet::new();
        };
        let domain = self.domain(transition.source, target);
        self.active
            .iter()
            .copied()
            .filter(|&node| self.is_descendant(node, domain))
            .collect()
    }

    /// Target, its ancestors below the domain, and default descendants.
    fn add_entry_set(&self, source: NodeId, target: NodeId, to_enter: &mut BTreeSet<NodeId>) {
        let domain = self.domain(source, target);
        self.add_with_defaults(target, to_enter);

        let nodes = &self.definition.nodes;
        let mut current = nodes[target].parent;
        while let Some(ancestor) = current {
            if ancestor == domain {
                break;
            }
            to_enter.insert(ancestor);
            if matches!(nodes[ancestor].kind, NodeKind::Parallel) {
                self.add_missing_regions(ancestor, to_enter);
            }
            current = nodes[ancestor].parent;
        }

        // A parallel root as domain: every region is re-entered.
        if matches!(nodes[domain].kind, NodeKind::Parallel) {
            self.add_missing_regions(domain, to_enter);
        }
    }

    fn add_missing_regions(&self, parallel: NodeId, to_enter: &mut BTreeSet<NodeId>) {
        for &region in &self.definition.nodes[parallel].children {
            let covered = to_enter
                .iter()
                .any(|&n| n == region || self.is_descendant(n, region));
            if !covered {
                self.add_with_defaults(region, to_enter);
            }
        }
    }

    fn add_with_defaults(&self, node: NodeId, to_enter: &mut BTreeSet<NodeId>) {
        to_enter.insert(node);
        match self.definition.nodes[node].kind {
            NodeKind::Atomic => {}
            NodeKind::Compound { initial } => self.add_with_defaults(initial, to_enter),
            NodeKind::Parallel => {
                for &child in &self.definition.nodes[node].children {
                    self.add_with_defaults(child, to_enter);
                }
            }
        }
    }

    /// Least common compound ancestor of `source` and `target`, strictly
    /// above `source`. Parallel states are skipped; the root always
    /// qualifies.
    fn domain(&self, source: NodeId, target: NodeId) -> NodeId {
        let nodes = &self.definition.nodes;
        let mut current = nodes[source].parent;
        while let Some(ancestor) = current {
            let compound = matches!(nodes[ancestor].kind, NodeKind::Compound { .. });
            if (compound || ancestor == ROOT) && self.is_descendant(target, ancestor) {
                return ancestor;
            }
            current = nodes[ancestor].parent;
        }
        ROOT
    }

    /// Whether `node` is a proper descendant of `ancestor`.
    fn is_descendant(&self, node: NodeId, ancestor: NodeId) -> bool {
        let nodes = &self.definition.nodes;
        let mut current = nodes[node].parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = nodes[parent].parent;
        }
        false
    }

    fn guard_passes(&self, guard: &Option<Guard<C, E>>, event: Option<&E>) -> bool {
        match guard {
            None => true,
            Some(Guard::Inline(condition)) => condition(&self.context, event),
            Some(Guard::Named(name)) => match self.implementations.guards.get(name) {
                Some(condition) => condition(&self.context, event),
                None => {
                    log::warn!("[statechart] no guard `{name}`, treating as false");
                    false
                }
            },
        }
    }

    fn execute(&mut self, action: &Action<C, E>, event: Option<&E>) {
        let run = match action {
            Action::Inline(run) => Rc::clone(run),
            Action::Named(name) => match self.implementations.actions.get(name) {
                Some(run) => Rc::clone(run),
                None => {
                    log::warn!("[statechart] no action `{name}`, skipping");
                    return;
                }
            },
        };
        run(&mut self.context, event);
    }

    fn label(&self, node: NodeId) -> String {
        let node = &self.definition.nodes[node];
        if node.path.is_empty() {
            node.key.clone()
        } else {
            node.path.clone()
        }
    }

    pub(crate) fn value(&self) -> StateValue {
        self.value_of(ROOT)
    }

    fn value_of(&self, node: NodeId) -> StateValue {
        let nodes = &self.definition.nodes;
        let child_value = |child: NodeId| match nodes[child].kind {
            NodeKind::Atomic => StateValue::Leaf(nodes[child].key.clone()),
            _ => StateValue::Map(vec![(nodes[child].key.clone(), self.value_of(child))]),
        };

        match nodes[node].kind {
            NodeKind::Atomic => StateValue::Map(Vec::new()),
            NodeKind::Compound { .. } => nodes[node]
                .children
                .iter()
                .copied()
                .find(|child| self.active.contains(child))
                .map(child_value)
                .unwrap_or(StateValue::Map(Vec::new())),
            NodeKind::Parallel => StateValue::Map(
                nodes[node]
                    .children
                    .iter()
                    .map(|&region| {
                        let value = match nodes[region].kind {
                            NodeKind::Atomic => StateValue::Map(Vec::new()),
                            _ => self.value_of(region),
                        };
                        (nodes[region].key.clone(), value)
                    })
                    .collect(),
            ),
        }
    }

    pub(crate) fn snapshot(&self) -> Snapshot<C>
    where
        C: Clone,
    {
        let nodes = &self.definition.nodes;
        Snapshot {
            value: self.value(),
            active: self
                .active
                .iter()
                .filter(|&&node| node != ROOT)
                .map(|&node| nodes[node].path.clone())
                .collect(),
            tags: self
                .active
                .iter()
                .flat_map(|&node| nodes[node].tags.iter().cloned())
                .collect(),
            context: self.context.clone(),
        }
    }
}
