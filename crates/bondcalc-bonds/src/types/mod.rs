//! Bond description types.
//!
//! - [`BondTerms`]: the immutable input to every analytics computation
//! - [`BondVariant`]: closed union of the supported bond structures
//! - [`Validate`]: invariant checks reported as [`ValidationError`]s

mod terms;
mod validation;

pub use terms::{
    BondKind, BondTerms, BondVariant, ExerciseEntry, RateReset, SinkingEntry,
    DEFAULT_SETTLEMENT_DAYS,
};
pub use validation::{Validate, ValidationError};
