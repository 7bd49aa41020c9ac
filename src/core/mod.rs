//! Core tracking types and protocols.
//!
//! This module contains the building blocks of the engine:
//! - Items and their validation checks via the [`TrackingItem`] trait
//! - Validation outcomes and the sequence contract hooks follow
//! - Parameter placeholders resolved across transitions
//! - The [`TrackingState`] trait states implement

mod item;
mod macros;
mod outcome;
mod params;
mod state;

pub use item::{validated_item, Check, Record, TrackingItem};
pub use outcome::{consume, OutcomeSeq, ValidationOutcome};
pub use params::{ParamRef, Property, PropertySpec};
pub use state::TrackingState;
