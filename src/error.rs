//! Error types for the tracking engine.

use thiserror::Error;

/// Registration and lookup failures.
///
/// Configuration errors indicate a mistake in the calling setup code —
/// a duplicate or unknown state, transition, or action name — and are
/// fatal to that setup code, never retried.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("state '{0}' is already registered")]
    DuplicateState(String),

    #[error("state '{0}' is not registered")]
    UnknownState(String),

    #[error("transition '{0}' is already registered")]
    DuplicateTransition(String),

    #[error("transition '{0}' is not registered")]
    UnknownTransition(String),

    #[error("state '{state}' does not define transition hook '{transition}'")]
    MissingTransitionHook { state: String, transition: String },

    #[error("action '{0}' is already registered")]
    DuplicateAction(String),

    #[error("action '{0}' is not registered")]
    UnknownAction(String),

    #[error("state '{state}' does not define action hook '{action}'")]
    MissingActionHook { state: String, action: String },
}

/// Failures surfaced by `track`, `transition`, `action`, and `get`.
///
/// Every variant is synchronous and local: no background retries, no
/// silent suppression. The engine never mutates state on a failure path;
/// each operation's mutation is gated behind its hook's terminal success
/// outcome. The one documented exception is a transition whose target
/// state rejects the item after the source state already committed its
/// removal — see `TrackingStateMachine::transition`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EngineError {
    /// A registration or lookup failure reached at dispatch time.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An item failed its own checks, or a hook yielded a failing outcome.
    /// Safe to retry after correcting the input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A parameter placeholder had no value from the source outcome and no
    /// default. Aborts the transition exactly like a validation failure.
    #[error("parameter '{0}' was not supplied by the source state and has no default")]
    UnresolvedParameter(String),

    /// An action hook rejected its arguments.
    #[error("action '{name}' rejected its arguments: {reason}")]
    Action { name: String, reason: String },

    /// A hook returned without producing any outcome. This is a bug in the
    /// hook, not in the input.
    #[error("hook '{0}' completed without producing a terminal outcome")]
    MissingOutcome(String),
}

impl EngineError {
    /// Shorthand for a validation failure with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for an action-argument failure.
    pub fn action(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Action {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
