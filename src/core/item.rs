//! Items tracked by states, and their validation checks.
//!
//! An item is any serde-serializable struct with named fields. Construction
//! from a raw property record goes through serde, so field presence and
//! types are checked before the item's own predicates run.

use crate::error::EngineError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

/// A plain mapping from property name to value.
///
/// Records are the engine's only exchange format: raw item input, exported
/// query results, outcome parameters, and action arguments are all records.
pub type Record = serde_json::Map<String, Value>;

/// A registered validation predicate over an item.
///
/// Checks are pure functions evaluated in registration order; the first
/// failing check invalidates the item.
///
/// # Example
///
/// ```rust
/// use trackstate::core::Check;
///
/// let non_empty = Check::new(|name: &String| !name.is_empty());
///
/// assert!(non_empty.check(&"Jonathan".to_string()));
/// assert!(!non_empty.check(&String::new()));
/// ```
pub struct Check<T> {
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Check<T> {
    /// Create a check from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }

    /// Apply the predicate to an item.
    pub fn check(&self, item: &T) -> bool {
        (self.predicate)(item)
    }
}

/// A unit of domain data that can be tracked by one or more states.
///
/// Implementors declare their property schema through their serde shape and
/// their invariants through [`checks`](TrackingItem::checks). The engine
/// never mutates an item; only state hooks the caller authored do.
///
/// # Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use trackstate::core::{Check, TrackingItem};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Friend {
///     name: String,
///     reason: String,
/// }
///
/// impl TrackingItem for Friend {
///     fn checks(&self) -> Vec<Check<Self>> {
///         vec![Check::new(|f: &Friend| !f.name.is_empty())]
///     }
/// }
///
/// let friend = Friend {
///     name: "Jonathan".to_string(),
///     reason: "helped me move".to_string(),
/// };
/// assert!(friend.validate());
/// assert_eq!(friend.export()["name"], "Jonathan");
/// ```
pub trait TrackingItem: Debug + Serialize + DeserializeOwned + Sized {
    /// The item's validation checks, in evaluation order.
    ///
    /// Default: no checks, every item is valid.
    fn checks(&self) -> Vec<Check<Self>> {
        Vec::new()
    }

    /// Apply every check to the item, in registration order.
    ///
    /// Returns true only if all checks pass. Evaluation short-circuits at
    /// the first failure. Side-effect free.
    fn validate(&self) -> bool {
        self.checks().iter().all(|check| check.check(self))
    }

    /// Export the item as a plain property record.
    ///
    /// Items that do not serialize to a map (tuple structs, primitives)
    /// export as an empty record; tracked items are struct-like by
    /// convention.
    fn export(&self) -> Record {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Record::new(),
        }
    }
}

/// Construct an item from a resolved record and validate it.
///
/// Deserialization enforces the item kind's schema (missing or mistyped
/// properties fail here); the item's own checks run afterwards. Both
/// failure modes abort the surrounding operation before any state mutation.
///
/// # Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use trackstate::core::{validated_item, Check, TrackingItem};
/// use trackstate::record;
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct Friend {
///     name: String,
/// }
///
/// impl TrackingItem for Friend {
///     fn checks(&self) -> Vec<Check<Self>> {
///         vec![Check::new(|f: &Friend| !f.name.is_empty())]
///     }
/// }
///
/// let friend: Friend = validated_item(record! { "name": "Jonathan" }).unwrap();
/// assert_eq!(friend.name, "Jonathan");
///
/// assert!(validated_item::<Friend>(record! { "name": "" }).is_err());
/// assert!(validated_item::<Friend>(record! { "nickname": "J" }).is_err());
/// ```
pub fn validated_item<T: TrackingItem>(record: Record) -> Result<T, EngineError> {
    let item: T = serde_json::from_value(Value::Object(record))
        .map_err(|err| EngineError::validation(format!("malformed item record: {err}")))?;

    if item.validate() {
        Ok(item)
    } else {
        Err(EngineError::validation(format!(
            "item {item:?} failed its validation checks"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Friend {
        name: String,
        reason: String,
    }

    impl TrackingItem for Friend {
        fn checks(&self) -> Vec<Check<Self>> {
            vec![
                Check::new(|f: &Friend| !f.name.is_empty()),
                Check::new(|f: &Friend| !f.reason.is_empty()),
            ]
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Unchecked {
        value: i64,
    }

    impl TrackingItem for Unchecked {}

    #[test]
    fn validate_passes_when_all_checks_pass() {
        let friend = Friend {
            name: "Jonathan".to_string(),
            reason: "lent me a book".to_string(),
        };
        assert!(friend.validate());
    }

    #[test]
    fn validate_fails_on_any_failing_check() {
        let friend = Friend {
            name: "Jonathan".to_string(),
            reason: String::new(),
        };
        assert!(!friend.validate());
    }

    #[test]
    fn items_without_checks_are_always_valid() {
        assert!(Unchecked { value: -3 }.validate());
    }

    #[test]
    fn export_round_trips_properties() {
        let friend = Friend {
            name: "Chris".to_string(),
            reason: "next door".to_string(),
        };

        let record = friend.export();
        assert_eq!(record["name"], "Chris");
        assert_eq!(record["reason"], "next door");
    }

    #[test]
    fn validated_item_builds_from_record() {
        let friend: Friend = validated_item(record! {
            "name": "James",
            "reason": "old colleague",
        })
        .unwrap();

        assert_eq!(
            friend,
            Friend {
                name: "James".to_string(),
                reason: "old colleague".to_string(),
            }
        );
    }

    #[test]
    fn validated_item_rejects_schema_mismatch() {
        let err = validated_item::<Friend>(record! { "name": 42, "reason": "x" }).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        let err = validated_item::<Friend>(record! { "name": "James" }).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn validated_item_rejects_failing_checks() {
        let err = validated_item::<Friend>(record! { "name": "", "reason": "x" }).unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn checks_evaluate_in_registration_order() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let evaluated = Arc::new(AtomicUsize::new(0));
        let first = Arc::clone(&evaluated);
        let second = Arc::clone(&evaluated);

        let checks: Vec<Check<i64>> = vec![
            Check::new(move |_| {
                first.fetch_add(1, Ordering::SeqCst);
                false
            }),
            Check::new(move |_| {
                second.fetch_add(1, Ordering::SeqCst);
                true
            }),
        ];

        let valid = checks.iter().all(|check| check.check(&0));
        assert!(!valid);
        // Short-circuit: the second check never ran.
        assert_eq!(evaluated.load(Ordering::SeqCst), 1);
    }
}
