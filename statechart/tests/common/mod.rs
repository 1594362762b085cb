#![allow(dead_code)]

use statechart::MachineEvent;

/// Minimal event type: the event name plus an integer payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ev {
    pub name: &'static str,
    pub value: i32,
}

impl MachineEvent for Ev {
    fn event_type(&self) -> &str {
        self.name
    }
}

pub fn ev(name: &'static str) -> Ev {
    Ev { name, value: 0 }
}

pub fn ev_with(name: &'static str, value: i32) -> Ev {
    Ev { name, value }
}
