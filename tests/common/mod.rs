//! A small friends/enemies domain shared by the integration tests.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use serde_json::Value;
use trackstate::core::{
    validated_item, Check, OutcomeSeq, Record, TrackingItem, TrackingState, ValidationOutcome,
};
use trackstate::error::{ConfigError, EngineError};
use trackstate::machine::TrackingStateMachine;

// `reason` is defaultable so a transition's from-record can name just the
// outgoing item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Friend {
    pub name: String,
    #[serde(default)]
    pub reason: String,
}

impl TrackingItem for Friend {
    fn checks(&self) -> Vec<Check<Self>> {
        vec![Check::new(|f: &Friend| !f.name.is_empty())]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub name: String,
    #[serde(default)]
    pub reason: String,
}

impl TrackingItem for Enemy {
    fn checks(&self) -> Vec<Check<Self>> {
        vec![Check::new(|e: &Enemy| !e.name.is_empty())]
    }
}

fn name_matches(name: &str, filter: &Record) -> bool {
    if let Some(wanted) = filter.get("name").and_then(Value::as_str) {
        if name != wanted {
            return false;
        }
    }
    if let Some(prefix) = filter.get("initial").and_then(Value::as_str) {
        if !name.starts_with(prefix) {
            return false;
        }
    }
    true
}

/// Tracks friends by unique name.
#[derive(Default)]
pub struct FriendRegistry {
    friends: Vec<Friend>,
}

impl FriendRegistry {
    fn accept(&mut self, friend: Friend) -> OutcomeSeq {
        let mut seq = Vec::new();
        if self.friends.iter().any(|f| f.name == friend.name) {
            seq.push(ValidationOutcome::fail(format!(
                "{} is already a friend",
                friend.name
            )));
            return seq;
        }
        seq.push(ValidationOutcome::ok());
        self.friends.push(friend);
        seq.push(ValidationOutcome::ok());
        seq
    }

    fn defect(&mut self, friend: Friend) -> OutcomeSeq {
        let mut seq = Vec::new();
        let Some(pos) = self.friends.iter().position(|f| f.name == friend.name) else {
            seq.push(ValidationOutcome::fail(format!(
                "{} is not a friend",
                friend.name
            )));
            return seq;
        };
        seq.push(ValidationOutcome::ok());
        let removed = self.friends.remove(pos);
        seq.push(
            ValidationOutcome::ok()
                .with_param("name", removed.name)
                .with_param("reason", format!("was a friend: {}", removed.reason)),
        );
        seq
    }
}

impl TrackingState for FriendRegistry {
    fn name(&self) -> &str {
        "friends"
    }

    fn track(&mut self, record: Record) -> Result<OutcomeSeq, EngineError> {
        let friend: Friend = validated_item(record)?;
        Ok(self.accept(friend))
    }

    fn transition(&mut self, name: &str, record: Record) -> Result<OutcomeSeq, EngineError> {
        match name {
            "defect" => {
                let friend: Friend = validated_item(record)?;
                Ok(self.defect(friend))
            }
            _ => Err(ConfigError::MissingTransitionHook {
                state: self.name().to_string(),
                transition: name.to_string(),
            }
            .into()),
        }
    }

    fn provides_transition(&self, name: &str) -> bool {
        name == "defect"
    }

    fn action(&mut self, name: &str, args: &Record) -> Result<(), EngineError> {
        match name {
            "amend_reason" => {
                let target = args
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| EngineError::action("amend_reason", "missing 'name'"))?;
                let reason = args
                    .get("reason")
                    .and_then(Value::as_str)
                    .ok_or_else(|| EngineError::action("amend_reason", "missing 'reason'"))?;

                for friend in self.friends.iter_mut().filter(|f| f.name == target) {
                    friend.reason = reason.to_string();
                }
                Ok(())
            }
            _ => Err(ConfigError::MissingActionHook {
                state: self.name().to_string(),
                action: name.to_string(),
            }
            .into()),
        }
    }

    fn provides_action(&self, name: &str) -> bool {
        name == "amend_reason"
    }

    fn get(&self, filter: &Record) -> Vec<Record> {
        self.friends
            .iter()
            .filter(|f| name_matches(&f.name, filter))
            .map(TrackingItem::export)
            .collect()
    }
}

/// Tracks enemies by unique name.
#[derive(Default)]
pub struct EnemyRegistry {
    enemies: Vec<Enemy>,
}

impl EnemyRegistry {
    fn accept(&mut self, enemy: Enemy) -> OutcomeSeq {
        let mut seq = Vec::new();
        if self.enemies.iter().any(|e| e.name == enemy.name) {
            seq.push(ValidationOutcome::fail(format!(
                "{} is already an enemy",
                enemy.name
            )));
            return seq;
        }
        seq.push(ValidationOutcome::ok());
        self.enemies.push(enemy);
        seq.push(ValidationOutcome::ok());
        seq
    }

    fn forgive(&mut self, enemy: Enemy) -> OutcomeSeq {
        let mut seq = Vec::new();
        let Some(pos) = self.enemies.iter().position(|e| e.name == enemy.name) else {
            seq.push(ValidationOutcome::fail(format!(
                "{} is not an enemy",
                enemy.name
            )));
            return seq;
        };
        seq.push(ValidationOutcome::ok());
        let removed = self.enemies.remove(pos);
        seq.push(ValidationOutcome::ok().with_param("name", removed.name));
        seq
    }
}

impl TrackingState for EnemyRegistry {
    fn name(&self) -> &str {
        "enemies"
    }

    fn track(&mut self, record: Record) -> Result<OutcomeSeq, EngineError> {
        let enemy: Enemy = validated_item(record)?;
        Ok(self.accept(enemy))
    }

    fn transition(&mut self, name: &str, record: Record) -> Result<OutcomeSeq, EngineError> {
        match name {
            "forgive" => {
                let enemy: Enemy = validated_item(record)?;
                Ok(self.forgive(enemy))
            }
            _ => Err(ConfigError::MissingTransitionHook {
                state: self.name().to_string(),
                transition: name.to_string(),
            }
            .into()),
        }
    }

    fn provides_transition(&self, name: &str) -> bool {
        name == "forgive"
    }

    fn get(&self, filter: &Record) -> Vec<Record> {
        self.enemies
            .iter()
            .filter(|e| name_matches(&e.name, filter))
            .map(TrackingItem::export)
            .collect()
    }
}

/// A machine with both registries and their transitions wired up.
pub fn relationship_machine() -> TrackingStateMachine {
    let mut machine = TrackingStateMachine::new();
    machine.add_state(FriendRegistry::default()).unwrap();
    machine.add_state(EnemyRegistry::default()).unwrap();
    machine.add_transition("defect", "friends", "enemies").unwrap();
    machine.add_transition("forgive", "enemies", "friends").unwrap();
    machine.add_action("amend_reason", "friends").unwrap();
    machine
}
