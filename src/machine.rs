//! The top-level registry that orchestrates tracking operations.

use crate::core::{consume, PropertySpec, Record, TrackingState};
use crate::error::{ConfigError, EngineError};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Result of a query against a state, normalized by cardinality.
///
/// # Example
///
/// ```rust
/// use trackstate::machine::QueryResult;
/// use trackstate::record;
///
/// assert_eq!(QueryResult::from(vec![]), QueryResult::None);
///
/// let one = QueryResult::from(vec![record! { "name": "Jonathan" }]);
/// assert!(matches!(one, QueryResult::One(_)));
/// assert_eq!(one.count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// No tracked item matched the filter.
    None,
    /// Exactly one item matched.
    One(Record),
    /// More than one item matched.
    Many(Vec<Record>),
}

impl QueryResult {
    /// Number of matched items.
    pub fn count(&self) -> usize {
        match self {
            Self::None => 0,
            Self::One(_) => 1,
            Self::Many(records) => records.len(),
        }
    }

    /// Whether nothing matched.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Flatten into a list of records, whatever the cardinality.
    pub fn into_records(self) -> Vec<Record> {
        match self {
            Self::None => Vec::new(),
            Self::One(record) => vec![record],
            Self::Many(records) => records,
        }
    }
}

impl From<Vec<Record>> for QueryResult {
    fn from(mut records: Vec<Record>) -> Self {
        match records.len() {
            0 => Self::None,
            1 => Self::One(records.remove(0)),
            _ => Self::Many(records),
        }
    }
}

/// A registered transition: the states it moves items between.
#[derive(Debug, Clone)]
struct Binding {
    from: String,
    to: String,
}

/// The registry of states, transitions, and actions, and the dispatcher
/// for every tracking operation.
///
/// A machine holds no item data itself; items live inside each registered
/// state. States, transitions, and actions are registered once at setup
/// time, and the machine is used purely for dispatch afterwards. See the
/// crate-level documentation for a complete example.
///
/// The machine provides no internal synchronization: it is designed for a
/// single logical owner. Callers sharing one across threads must add their
/// own mutual exclusion around each operation.
pub struct TrackingStateMachine {
    states: BTreeMap<String, Box<dyn TrackingState>>,
    transitions: BTreeMap<String, Binding>,
    actions: BTreeMap<String, String>,
}

impl TrackingStateMachine {
    /// Create an empty machine.
    pub fn new() -> Self {
        Self {
            states: BTreeMap::new(),
            transitions: BTreeMap::new(),
            actions: BTreeMap::new(),
        }
    }

    /// Register a state under its own name.
    pub fn add_state(&mut self, state: impl TrackingState + 'static) -> Result<(), ConfigError> {
        let name = state.name().to_string();
        if self.states.contains_key(&name) {
            return Err(ConfigError::DuplicateState(name));
        }
        debug!("registered state '{name}'");
        self.states.insert(name, Box::new(state));
        Ok(())
    }

    /// Register a transition moving items from one state to another.
    ///
    /// Both states must already be registered, the from-state must define
    /// a transition hook with this name, and the name must not already be
    /// bound.
    pub fn add_transition(&mut self, name: &str, from: &str, to: &str) -> Result<(), ConfigError> {
        if self.transitions.contains_key(name) {
            return Err(ConfigError::DuplicateTransition(name.to_string()));
        }
        for state in [from, to] {
            if !self.states.contains_key(state) {
                return Err(ConfigError::UnknownState(state.to_string()));
            }
        }
        if !self.states[from].provides_transition(name) {
            return Err(ConfigError::MissingTransitionHook {
                state: from.to_string(),
                transition: name.to_string(),
            });
        }

        debug!("registered transition '{name}': '{from}' -> '{to}'");
        self.transitions.insert(
            name.to_string(),
            Binding {
                from: from.to_string(),
                to: to.to_string(),
            },
        );
        Ok(())
    }

    /// Register an action owned by a state.
    ///
    /// The state must already be registered and define an action hook with
    /// this name, and the name must not already be bound.
    pub fn add_action(&mut self, name: &str, state: &str) -> Result<(), ConfigError> {
        if self.actions.contains_key(name) {
            return Err(ConfigError::DuplicateAction(name.to_string()));
        }
        if !self.states.contains_key(state) {
            return Err(ConfigError::UnknownState(state.to_string()));
        }
        if !self.states[state].provides_action(name) {
            return Err(ConfigError::MissingActionHook {
                state: state.to_string(),
                action: name.to_string(),
            });
        }

        debug!("registered action '{name}' on state '{state}'");
        self.actions.insert(name.to_string(), state.to_string());
        Ok(())
    }

    /// Look up a registered state.
    pub fn state(&self, name: &str) -> Result<&dyn TrackingState, ConfigError> {
        self.states
            .get(name)
            .map(|state| state.as_ref())
            .ok_or_else(|| ConfigError::UnknownState(name.to_string()))
    }

    /// Names of the registered states.
    pub fn state_names(&self) -> Vec<&str> {
        self.states.keys().map(String::as_str).collect()
    }

    /// Names of the registered transitions.
    pub fn transition_names(&self) -> Vec<&str> {
        self.transitions.keys().map(String::as_str).collect()
    }

    /// Names of the registered actions.
    pub fn action_names(&self) -> Vec<&str> {
        self.actions.keys().map(String::as_str).collect()
    }

    /// Track an item in the named state.
    ///
    /// The state builds and validates its item kind from the record, then
    /// runs its accept protocol. Any failure aborts with the state's
    /// collection unchanged.
    pub fn track(&mut self, state: &str, record: Record) -> Result<(), EngineError> {
        debug!("tracking item in state '{state}'");
        let hook = format!("{state}.track");
        let state = self.state_mut(state)?;
        let seq = state.track(record)?;
        consume(&hook, seq)?;
        Ok(())
    }

    /// Move an item between two states through a registered transition.
    ///
    /// The protocol runs in order: the from-state's hook validates and
    /// removes the outgoing item (first failing outcome aborts with
    /// nothing changed); placeholders in `to` are resolved from the hook's
    /// terminal parameters; the to-state then builds, validates, and
    /// tracks the incoming item.
    ///
    /// The from-state's removal is already committed by the time the
    /// to-state runs, and a to-side failure is *not* rolled back: the item
    /// is gone from the from-state and absent from the to-state. The
    /// engine logs a warning when that happens and surfaces the failure to
    /// the caller.
    pub fn transition(
        &mut self,
        name: &str,
        from: Record,
        to: PropertySpec,
    ) -> Result<(), EngineError> {
        let binding = self
            .transitions
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownTransition(name.to_string()))?;
        debug!("transition '{name}': '{}' -> '{}'", binding.from, binding.to);

        let hook = format!("{}.{name}", binding.from);
        let from_state = self.state_mut(&binding.from)?;
        let seq = from_state.transition(name, from)?;
        let params = consume(&hook, seq)?;
        debug!(
            "transition '{name}': source committed, {} parameter(s) captured",
            params.len()
        );

        let admitted = self.admit(&binding.to, to, &params);
        if let Err(err) = &admitted {
            warn!(
                "transition '{name}': state '{}' rejected the item after '{}' committed its removal: {err}",
                binding.to, binding.from
            );
        }
        admitted
    }

    /// Invoke a registered action with its argument record.
    pub fn action(&mut self, name: &str, args: &Record) -> Result<(), EngineError> {
        let state_name = self
            .actions
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownAction(name.to_string()))?;
        debug!("action '{name}' on state '{state_name}'");
        let state = self.state_mut(&state_name)?;
        state.action(name, args)
    }

    /// Query the named state, normalizing the result's cardinality.
    pub fn get(&self, state: &str, filter: &Record) -> Result<QueryResult, EngineError> {
        let state = self.state(state)?;
        Ok(QueryResult::from(state.get(filter)))
    }

    /// Number of items in the named state matching the filter.
    pub fn quantity(&self, state: &str, filter: &Record) -> Result<usize, EngineError> {
        let state = self.state(state)?;
        Ok(state.quantity(filter))
    }

    /// Resolve the to-item's placeholders and track it in the target state.
    fn admit(
        &mut self,
        state: &str,
        spec: PropertySpec,
        params: &Record,
    ) -> Result<(), EngineError> {
        let record = spec.resolve(params)?;
        let hook = format!("{state}.track");
        let state = self.state_mut(state)?;
        let seq = state.track(record)?;
        consume(&hook, seq)?;
        Ok(())
    }

    fn state_mut(&mut self, name: &str) -> Result<&mut (dyn TrackingState + 'static), ConfigError> {
        self.states
            .get_mut(name)
            .map(|state| state.as_mut())
            .ok_or_else(|| ConfigError::UnknownState(name.to_string()))
    }
}

impl Default for TrackingStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
