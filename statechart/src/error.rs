use thiserror::Error;

/// Problems found while validating a machine definition or its
/// implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError {
    #[error("state `{state}`: transition on `{event}` targets unknown state `{target}`")]
    UnknownTarget {
        state: String,
        event: String,
        target: String,
    },

    #[error("state `{state}`: initial state `{initial}` is not a child")]
    UnknownInitial { state: String, initial: String },

    #[error("state `{state}` needs at least one child")]
    NoChildren { state: String },

    #[error("state `{state}` is atomic but declares children")]
    AtomicWithChildren { state: String },

    #[error("state `{state}` declares child `{child}` more than once")]
    DuplicateChild { state: String, child: String },

    #[error("no implementation provided for {kind} `{name}`")]
    MissingImplementation { kind: &'static str, name: String },
}
