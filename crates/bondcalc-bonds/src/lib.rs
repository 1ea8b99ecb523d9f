//! # bondcalc Bonds
//!
//! Bond terms, cash-flow scheduling and yield solving for the bondcalc
//! analytics engine.
//!
//! This crate provides:
//!
//! - **Terms**: [`BondTerms`] with a closed [`BondVariant`] union covering
//!   zero-coupon, fixed-coupon, callable, putable, floating-rate and
//!   sinking-fund bonds, plus validation
//! - **Cash Flows**: calendar-adjusted coupon schedules with front stubs,
//!   settlement resolution and accrued interest
//! - **Pricing**: discounting under any [`Compounding`] convention,
//!   yield-from-price inversion and yield-to-worst
//!
//! ## Example
//!
//! ```rust
//! use bondcalc_bonds::prelude::*;
//! use bondcalc_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let issue = Date::from_ymd(2025, 1, 15).unwrap();
//! let terms = BondTerms::new(
//!     "DEMO-5Y",
//!     BondVariant::fixed(dec!(0.05), Frequency::SemiAnnual),
//!     dec!(1000),
//!     issue,
//!     Date::from_ymd(2030, 1, 15).unwrap(),
//! )
//! .with_settlement_date(issue)
//! .with_calendar(CalendarId::NullCalendar);
//!
//! let flows = CashFlowGenerator::generate(&terms, issue).unwrap();
//! assert_eq!(flows.len(), 10);
//! assert_eq!(flows.total_principal(), dec!(1000));
//! ```
//!
//! [`Compounding`]: bondcalc_core::types::Compounding

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::float_cmp)]

pub mod cashflows;
pub mod error;
pub mod pricing;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::{
        accrued_interest, resolve_settlement, truncate_at_exercise, CashFlowGenerator,
        CouponPeriod, Schedule, ScheduleConfig,
    };
    pub use crate::error::{BondError, BondResult};
    pub use crate::pricing::{
        price_from_yield, yield_to_worst, DerivativeMethod, DiscountedFlows, ExerciseYield,
        PricingContext, WorkoutResult, YieldResult, YieldSolver,
    };
    pub use crate::types::{
        BondKind, BondTerms, BondVariant, ExerciseEntry, RateReset, SinkingEntry, Validate,
        ValidationError,
    };
}

pub use error::{BondError, BondResult};
pub use types::{BondKind, BondTerms, BondVariant};
