use std::collections::HashSet;
use std::rc::Rc;

use crate::definition::{Action, Guard, StateConfig, StateKind, Transition};
use crate::error::MachineError;
use crate::implementations::Implementations;

/// Index into [`Definition::nodes`]. Nodes are numbered in document order
/// (pre-order), so a parent always has a smaller id than its descendants.
pub(crate) type NodeId = usize;

pub(crate) const ROOT: NodeId = 0;

pub(crate) enum NodeKind {
    Atomic,
    Compound { initial: NodeId },
    Parallel,
}

pub(crate) struct ResolvedTransition<C, E> {
    pub(crate) source: NodeId,
    pub(crate) target: Option<NodeId>,
    pub(crate) actions: Vec<Action<C, E>>,
    pub(crate) guard: Option<Guard<C, E>>,
}

pub(crate) struct Node<C, E> {
    pub(crate) key: String,
    /// Dotted path from the root, empty for the root itself.
    pub(crate) path: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
    pub(crate) children: Vec<NodeId>,
    pub(crate) tags: Vec<String>,
    pub(crate) entry: Vec<Action<C, E>>,
    pub(crate) exit: Vec<Action<C, E>>,
    pub(crate) on: Vec<(String, ResolvedTransition<C, E>)>,
    pub(crate) always: Vec<ResolvedTransition<C, E>>,
    pub(crate) invoke: Vec<String>,
}

pub(crate) struct Definition<C, E> {
    pub(crate) id: String,
    pub(crate) nodes: Vec<Node<C, E>>,
}

/// A validated machine definition plus the implementations it runs with.
pub struct Machine<C, E> {
    pub(crate) definition: Rc<Definition<C, E>>,
    pub(crate) implementations: Rc<Implementations<C, E>>,
}

impl<C, E> Clone for Machine<C, E> {
    fn clone(&self) -> Self {
        Self {
            definition: Rc::clone(&self.definition),
            implementations: Rc::clone(&self.implementations),
        }
    }
}

/// Transition whose target string is not resolved yet.
struct Pending<C, E> {
    node: NodeId,
    event: Option<String>,
    transition: Transition<C, E>,
}

impl<C, E> Machine<C, E> {
    /// Validate and flatten `root` into a machine called `id`.
    pub fn new(id: impl Into<String>, root: StateConfig<C, E>) -> Result<Self, MachineError> {
        let id = id.into();
        let mut nodes = Vec::new();
        let mut pending = Vec::new();
        let mut initials = Vec::new();
        flatten(&id, String::new(), None, root, &mut nodes, &mut pending, &mut initials)?;

        for (node, initial) in initials {
            let resolved = nodes[node]
                .children
                .iter()
                .copied()
                .find(|&child| nodes[child].key == initial)
                .ok_or_else(|| MachineError::UnknownInitial {
                    state: display_path(&id, &nodes[node].path),
                    initial: initial.clone(),
                })?;
            nodes[node].kind = NodeKind::Compound { initial: resolved };
        }

        for Pending {
            node,
            event,
            transition,
        } in pending
        {
            let target = match &transition.target {
                None => None,
                Some(target) => Some(resolve_target(&nodes, node, target).ok_or_else(|| {
                    MachineError::UnknownTarget {
                        state: display_path(&id, &nodes[node].path),
                        event: event.clone().unwrap_or_else(|| "(always)".to_string()),
                        target: target.clone(),
                    }
                })?),
            };

            let resolved = ResolvedTransition {
                source: node,
                target,
                actions: transition.actions,
                guard: transition.guard,
            };
            match event {
                Some(event) => nodes[node].on.push((event, resolved)),
                None => nodes[node].always.push(resolved),
            }
        }

        log::debug!("[statechart] built machine `{id}` with {} states", nodes.len());

        Ok(Self {
            definition: Rc::new(Definition { id, nodes }),
            implementations: Rc::new(Implementations::default()),
        })
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    /// Return a machine that also uses `implementations`. Same-named entries
    /// replace earlier ones.
    pub fn provide(self, implementations: Implementations<C, E>) -> Self {
        let merged = (*self.implementations).clone().merge(implementations);
        Self {
            definition: self.definition,
            implementations: Rc::new(merged),
        }
    }

    /// Check that every named action, guard and service has an
    /// implementation.
    pub fn validate_implementations(&self) -> Result<(), MachineError> {
        let impls = &self.implementations;
        let missing_action = |action: &Action<C, E>| match action {
            Action::Named(name) if !impls.actions.contains_key(name) => {
                Some(MachineError::MissingImplementation {
                    kind: "action",
                    name: name.clone(),
                })
            }
            _ => None,
        };
        let missing_guard = |guard: &Option<Guard<C, E>>| match guard {
            Some(Guard::Named(name)) if !impls.guards.contains_key(name) => {
                Some(MachineError::MissingImplementation {
                    kind: "guard",
                    name: name.clone(),
                })
            }
            _ => None,
        };

        for node in &self.definition.nodes {
            let transitions = node.on.iter().map(|(_, t)| t).chain(node.always.iter());
            for transition in transitions {
                if let Some(err) = missing_guard(&transition.guard) {
                    return Err(err);
                }
                if let Some(err) = transition.actions.iter().find_map(missing_action) {
                    return Err(err);
                }
            }
            if let Some(err) = node.entry.iter().chain(&node.exit).find_map(missing_action) {
                return Err(err);
            }
            if let Some(name) = node.invoke.iter().find(|s| !impls.services.contains_key(*s)) {
                return Err(MachineError::MissingImplementation {
                    kind: "service",
                    name: name.clone(),
                });
            }
        }

        Ok(())
    }
}

fn display_path(id: &str, path: &str) -> String {
    if path.is_empty() {
        id.to_string()
    } else {
        format!("{id}.{path}")
    }
}

fn flatten<C, E>(
    key: &str,
    path: String,
    parent: Option<NodeId>,
    config: StateConfig<C, E>,
    nodes: &mut Vec<Node<C, E>>,
    pending: &mut Vec<Pending<C, E>>,
    initials: &mut Vec<(NodeId, String)>,
) -> Result<NodeId, MachineError> {
    let id = nodes.len();
    let label = || display_path(nodes.first().map_or(key, |root| root.key.as_str()), &path);

    let kind = match &config.kind {
        StateKind::Atomic if !config.children.is_empty() => {
            return Err(MachineError::AtomicWithChildren { state: label() });
        }
        StateKind::Atomic => NodeKind::Atomic,
        StateKind::Compound { .. } | StateKind::Parallel if config.children.is_empty() => {
            return Err(MachineError::NoChildren { state: label() });
        }
        StateKind::Compound { initial } => {
            initials.push((id, initial.clone()));
            // Placeholder until children exist; fixed up after flattening.
            NodeKind::Compound { initial: id }
        }
        StateKind::Parallel => NodeKind::Parallel,
    };

    let mut seen = HashSet::new();
    if let Some((child, _)) = config
        .children
        .iter()
        .find(|(child, _)| !seen.insert(child.as_str()))
    {
        return Err(MachineError::DuplicateChild {
            state: label(),
            child: child.clone(),
        });
    }

    nodes.push(Node {
        key: key.to_string(),
        path: path.clone(),
        parent,
        kind,
        children: Vec::new(),
        tags: config.tags,
        entry: config.entry,
        exit: config.exit,
        on: Vec::new(),
        always: Vec::new(),
        invoke: config.invoke,
    });

    for (event, transition) in config.on {
        pending.push(Pending {
            node: id,
            event: Some(event),
            transition,
        });
    }
    for transition in config.always {
        pending.push(Pending {
            node: id,
            event: None,
            transition,
        });
    }

    for (child_key, child_config) in config.children {
        let child_path = if path.is_empty() {
            child_key.clone()
        } else {
            format!("{path}.{child_key}")
        };
        let child = flatten(
            &child_key,
            child_path,
            Some(id),
            child_config,
            nodes,
            pending,
            initials,
        )?;
        nodes[id].children.push(child);
    }

    Ok(id)
}

fn resolve_target<C, E>(nodes: &[Node<C, E>], source: NodeId, target: &str) -> Option<NodeId> {
    let (base, relative) = match target.strip_prefix('#') {
        Some(absolute) => (ROOT, absolute),
        None => (nodes[source].parent.unwrap_or(ROOT), target),
    };

    relative.split('.').try_fold(base, |node, segment| {
        nodes[node]
            .children
            .iter()
            .copied()
            .find(|&child| nodes[child].key == segment)
    })
}
