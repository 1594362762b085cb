//! Declarative statecharts.
//!
//! A machine is described once as a tree of [`StateConfig`]s: compound
//! states with an initial child, parallel states whose children are all
//! active together, and atomic leaves. States carry tags, entry/exit
//! actions, event transitions, eventless (`always`) transitions, and invoked
//! services whose lifetime is bound to the state that invokes them.
//!
//! Behavior referenced by name (actions, guards, services) is supplied
//! separately through [`Implementations`], so the same definition can be
//! wired to different environments. An [`Actor`] interprets a machine with a
//! context value, processing one event to completion before the next.
//!
//! ```ignore
//! let machine = Machine::new(
//!     "toggle",
//!     StateConfig::compound("off")
//!         .state("off", StateConfig::atomic().on("toggle", Transition::to("on")))
//!         .state("on", StateConfig::atomic().tag("lit").on("toggle", Transition::to("off"))),
//! )?;
//! let actor = Actor::spawn(machine, ())?;
//! actor.send(Toggle);
//! assert!(actor.has_tag("lit"));
//! ```

mod actor;
mod definition;
mod error;
mod implementations;
mod interpreter;
mod machine;
mod service;
mod snapshot;

pub use actor::{Actor, Sender};
pub use definition::{Action, Guard, StateConfig, StateKind, Transition};
pub use error::MachineError;
pub use implementations::{ActionFn, GuardFn, Implementations, ServiceFn};
pub use machine::Machine;
pub use service::Subscription;
pub use snapshot::{Snapshot, StateValue};

/// Events understood by a machine. Transitions are keyed by
/// [`event_type`](MachineEvent::event_type).
pub trait MachineEvent {
    fn event_type(&self) -> &str;
}
