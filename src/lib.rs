//! Trackstate: an in-process engine for tracking items across named states.
//!
//! A [`TrackingStateMachine`] holds a registry of named states, each owning
//! the subset of items currently "in" it. Items move between states only
//! through explicitly registered, validated transitions, so membership
//! logic lives in one auditable place instead of conditionals scattered
//! across domain objects.
//!
//! # Core Concepts
//!
//! - **Item**: a serde struct implementing [`TrackingItem`], validated by
//!   its registered [`Check`]s before it can enter any state
//! - **State**: an implementation of [`TrackingState`] owning its tracked
//!   items and the hooks the machine dispatches to
//! - **Transition**: a named, directional move of an item between two
//!   states, gated by an ordered sequence of [`ValidationOutcome`]s
//! - **Parameter placeholder**: a [`ParamRef`] among the target item's
//!   properties, filled in from the source state's terminal outcome
//!
//! # Example
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use trackstate::core::{
//!     validated_item, OutcomeSeq, ParamRef, PropertySpec, Record, TrackingItem, TrackingState,
//!     ValidationOutcome,
//! };
//! use trackstate::error::{ConfigError, EngineError};
//! use trackstate::machine::TrackingStateMachine;
//! use trackstate::record;
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Person {
//!     name: String,
//! }
//!
//! impl TrackingItem for Person {}
//!
//! #[derive(Default)]
//! struct Friends {
//!     people: Vec<Person>,
//! }
//!
//! impl Friends {
//!     fn defect(&mut self, person: Person) -> OutcomeSeq {
//!         let mut seq = Vec::new();
//!         let Some(pos) = self.people.iter().position(|p| p.name == person.name) else {
//!             seq.push(ValidationOutcome::fail(format!("{} is not a friend", person.name)));
//!             return seq;
//!         };
//!         seq.push(ValidationOutcome::ok());
//!         let removed = self.people.remove(pos);
//!         seq.push(ValidationOutcome::ok().with_param("name", removed.name));
//!         seq
//!     }
//! }
//!
//! impl TrackingState for Friends {
//!     fn name(&self) -> &str {
//!         "friends"
//!     }
//!
//!     fn track(&mut self, record: Record) -> Result<OutcomeSeq, EngineError> {
//!         let person: Person = validated_item(record)?;
//!         self.people.push(person);
//!         Ok(vec![ValidationOutcome::ok()])
//!     }
//!
//!     fn transition(&mut self, name: &str, record: Record) -> Result<OutcomeSeq, EngineError> {
//!         match name {
//!             "defect" => Ok(self.defect(validated_item(record)?)),
//!             _ => Err(ConfigError::MissingTransitionHook {
//!                 state: self.name().to_string(),
//!                 transition: name.to_string(),
//!             }
//!             .into()),
//!         }
//!     }
//!
//!     fn provides_transition(&self, name: &str) -> bool {
//!         name == "defect"
//!     }
//!
//!     fn get(&self, _filter: &Record) -> Vec<Record> {
//!         self.people.iter().map(TrackingItem::export).collect()
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Enemies {
//!     people: Vec<Person>,
//! }
//!
//! impl TrackingState for Enemies {
//!     fn name(&self) -> &str {
//!         "enemies"
//!     }
//!
//!     fn track(&mut self, record: Record) -> Result<OutcomeSeq, EngineError> {
//!         let person: Person = validated_item(record)?;
//!         self.people.push(person);
//!         Ok(vec![ValidationOutcome::ok()])
//!     }
//!
//!     fn get(&self, _filter: &Record) -> Vec<Record> {
//!         self.people.iter().map(TrackingItem::export).collect()
//!     }
//! }
//!
//! let mut machine = TrackingStateMachine::new();
//! machine.add_state(Friends::default()).unwrap();
//! machine.add_state(Enemies::default()).unwrap();
//! machine.add_transition("defect", "friends", "enemies").unwrap();
//!
//! machine.track("friends", record! { "name": "Jonathan" }).unwrap();
//!
//! machine
//!     .transition(
//!         "defect",
//!         record! { "name": "Jonathan" },
//!         PropertySpec::new().set("name", ParamRef::new("name")),
//!     )
//!     .unwrap();
//!
//! assert_eq!(machine.quantity("friends", &Record::new()).unwrap(), 0);
//! assert_eq!(machine.quantity("enemies", &Record::new()).unwrap(), 1);
//! ```

pub mod core;
pub mod error;
pub mod machine;

// Re-export commonly used types
pub use self::core::{
    validated_item, Check, OutcomeSeq, ParamRef, Property, PropertySpec, Record, TrackingItem,
    TrackingState, ValidationOutcome,
};
pub use error::{ConfigError, EngineError};
pub use machine::{QueryResult, TrackingStateMachine};
