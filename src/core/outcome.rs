//! Validation outcomes exchanged during track and transition protocols.
//!
//! Hooks report their progress as an ordered sequence of outcomes. Interim
//! outcomes express intermediate checks; the final outcome of a fully
//! successful sequence is the terminal one, and only it carries parameters
//! for the cooperating state.

use crate::core::item::Record;
use crate::error::EngineError;
use serde_json::Value;

/// The unit result of one step in an accept or transition protocol.
///
/// An outcome is either a success (optionally carrying named parameters
/// for the next cooperating party) or a failure carrying a human-readable
/// message.
///
/// # Example
///
/// ```rust
/// use trackstate::core::ValidationOutcome;
///
/// let found = ValidationOutcome::ok();
/// assert!(found.succeeded());
///
/// let released = ValidationOutcome::ok().with_param("name", "Jonathan");
/// assert_eq!(released.parameters()["name"], "Jonathan");
///
/// let missing = ValidationOutcome::fail("no such item");
/// assert!(!missing.succeeded());
/// assert_eq!(missing.message(), Some("no such item"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    success: bool,
    message: Option<String>,
    parameters: Record,
}

impl ValidationOutcome {
    /// A successful outcome with no message and no parameters.
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            parameters: Record::new(),
        }
    }

    /// A failed outcome carrying the reason for the failure.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            parameters: Record::new(),
        }
    }

    /// Attach a named parameter to this outcome.
    ///
    /// Parameters are only handed to the cooperating state when they sit on
    /// the terminal outcome of a fully successful sequence.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    /// Whether this outcome reports success.
    pub fn succeeded(&self) -> bool {
        self.success
    }

    /// The failure message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The named parameters attached to this outcome.
    pub fn parameters(&self) -> &Record {
        &self.parameters
    }
}

/// The ordered outcomes a hook produced, ending with its terminal outcome.
///
/// A hook stops emitting at its first failure, and commits its mutation
/// immediately before emitting the terminal success outcome, so a sequence
/// ending in a failure implies no mutation took place.
pub type OutcomeSeq = Vec<ValidationOutcome>;

/// Consume a hook's outcome sequence.
///
/// Outcomes are inspected in order; the first failing outcome aborts with
/// its message as a [`EngineError::Validation`]. If every outcome
/// succeeded, the terminal outcome's parameters are returned. An empty
/// sequence means the hook never produced a terminal outcome, which is a
/// bug in the hook itself and reported as [`EngineError::MissingOutcome`].
///
/// # Example
///
/// ```rust
/// use trackstate::core::{consume, ValidationOutcome};
///
/// let seq = vec![
///     ValidationOutcome::ok(),
///     ValidationOutcome::ok().with_param("name", "Jonathan"),
/// ];
/// let params = consume("release", seq).unwrap();
/// assert_eq!(params["name"], "Jonathan");
/// ```
pub fn consume(hook: &str, seq: OutcomeSeq) -> Result<Record, EngineError> {
    let mut terminal = None;
    for outcome in seq {
        if !outcome.succeeded() {
            let message = outcome
                .message()
                .unwrap_or("hook reported an unspecified failure")
                .to_string();
            return Err(EngineError::Validation(message));
        }
        terminal = Some(outcome);
    }

    match terminal {
        Some(outcome) => Ok(outcome.parameters),
        None => Err(EngineError::MissingOutcome(hook.to_string())),
    }
}
