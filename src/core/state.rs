//! The trait every tracking state implements.
//!
//! A state owns the subset of items currently "in" it. The engine never
//! touches that collection directly: all mutation flows through the
//! state's own hooks, and every hook reports its progress as an outcome
//! sequence the machine consumes.

use crate::core::item::Record;
use crate::core::outcome::OutcomeSeq;
use crate::error::{ConfigError, EngineError};

/// A named container holding the items currently considered "in" it.
///
/// Implementors define the accepted item kind, how items are compared
/// (the engine imposes no identity scheme), and the accept, transition,
/// and action hooks the machine dispatches to.
///
/// # Hook contract
///
/// Hooks produce an ordered [`OutcomeSeq`]. Emit one outcome per interim
/// check, stop at the first failure, and commit any mutation immediately
/// before emitting the terminal success outcome. A sequence that ends in a
/// failure therefore guarantees the state is unchanged.
///
/// # Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use trackstate::core::{
///     validated_item, OutcomeSeq, Record, TrackingItem, TrackingState, ValidationOutcome,
/// };
/// use trackstate::error::EngineError;
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct Member {
///     name: String,
/// }
///
/// impl TrackingItem for Member {}
///
/// struct Roster {
///     members: Vec<Member>,
/// }
///
/// impl TrackingState for Roster {
///     fn name(&self) -> &str {
///         "roster"
///     }
///
///     fn track(&mut self, record: Record) -> Result<OutcomeSeq, EngineError> {
///         let member: Member = validated_item(record)?;
///         let mut seq = Vec::new();
///         if self.members.iter().any(|m| m.name == member.name) {
///             seq.push(ValidationOutcome::fail(format!(
///                 "{} is already on the roster",
///                 member.name
///             )));
///             return Ok(seq);
///         }
///         seq.push(ValidationOutcome::ok());
///         self.members.push(member);
///         seq.push(ValidationOutcome::ok());
///         Ok(seq)
///     }
///
///     fn get(&self, filter: &Record) -> Vec<Record> {
///         self.members
///             .iter()
///             .filter(|m| match filter.get("name").and_then(|v| v.as_str()) {
///                 Some(name) => m.name == name,
///                 None => true,
///             })
///             .map(TrackingItem::export)
///             .collect()
///     }
/// }
/// ```
pub trait TrackingState: Send {
    /// The state's name, unique within a machine.
    fn name(&self) -> &str;

    /// Accept an item into this state.
    ///
    /// Implementations build their item kind from the record with
    /// [`validated_item`](crate::core::validated_item) — which aborts on a
    /// schema mismatch or a failing item check before any accept logic
    /// runs — and then run their accept protocol.
    fn track(&mut self, record: Record) -> Result<OutcomeSeq, EngineError>;

    /// Dispatch the named transition hook with the outgoing item's record.
    ///
    /// On success the hook removes the matching tracked item and may emit
    /// parameters on its terminal outcome for the target state.
    ///
    /// Default: this state defines no transition hooks.
    fn transition(&mut self, name: &str, _record: Record) -> Result<OutcomeSeq, EngineError> {
        Err(ConfigError::MissingTransitionHook {
            state: self.name().to_string(),
            transition: name.to_string(),
        }
        .into())
    }

    /// Whether this state defines a transition hook with the given name.
    ///
    /// Checked once, at transition registration time.
    fn provides_transition(&self, _name: &str) -> bool {
        false
    }

    /// Dispatch the named action hook with its argument record.
    ///
    /// Actions perform side effects over the tracked items outside the
    /// transition protocol. Hooks check their arguments before mutating
    /// and report bad ones as [`EngineError::Action`].
    ///
    /// Default: this state defines no action hooks.
    fn action(&mut self, name: &str, _args: &Record) -> Result<(), EngineError> {
        Err(ConfigError::MissingActionHook {
            state: self.name().to_string(),
            action: name.to_string(),
        }
        .into())
    }

    /// Whether this state defines an action hook with the given name.
    ///
    /// Checked once, at action registration time.
    fn provides_action(&self, _name: &str) -> bool {
        false
    }

    /// Return the tracked items matching the filter, exported as records.
    ///
    /// Filter semantics are state-defined; an empty filter returns every
    /// tracked item. The machine normalizes the result's cardinality.
    fn get(&self, filter: &Record) -> Vec<Record>;

    /// Number of tracked items matching the filter.
    fn quantity(&self, filter: &Record) -> usize {
        self.get(filter).len()
    }
}
