//! # bondcalc Analytics
//!
//! Turns a bond description into valuation and risk figures.
//!
//! - **Dispatch**: [`compute_analytics`] selects cash-flow generation and
//!   yield-to-worst behavior by bond variant and assembles one
//!   [`AnalyticsResult`]
//! - **Risk**: Macaulay, modified and simple duration, convexity, DV01
//! - **Curve**: the flat discount curve implied by the solved yield
//! - **Configuration**: [`EngineConfig`] for solver and bump settings
//! - **Batch**: [`compute_analytics_batch`], parallel with the `parallel` feature
//!
//! ## Architecture
//!
//! `bondcalc-analytics` depends on `bondcalc-bonds` for terms, schedules and
//! the yield solver; `bondcalc-bonds` does not depend on this crate. Every
//! computation is a pure function of its inputs.
//!
//! ## Usage
//!
//! ```rust
//! use bondcalc_analytics::prelude::*;
//! use bondcalc_bonds::prelude::*;
//! use bondcalc_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let issue = Date::from_ymd(2025, 1, 15).unwrap();
//! let terms = BondTerms::new(
//!     "ZERO-2030",
//!     BondVariant::zero_coupon(),
//!     dec!(1000),
//!     issue,
//!     Date::from_ymd(2030, 1, 15).unwrap(),
//! )
//! .with_settlement_date(issue)
//! .with_market_price(dec!(780));
//!
//! let result = compute_analytics(&terms, issue).unwrap();
//! let years = 1826.0 / 365.0;
//! assert!((result.macaulay_duration - years).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::float_cmp)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]

pub mod batch;
pub mod config;
pub mod curve;
pub mod dispatcher;
pub mod error;
pub mod result;
pub mod risk;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::batch::compute_analytics_batch;
    pub use crate::config::EngineConfig;
    pub use crate::curve::{flat_discount_curve, CurvePoint};
    pub use crate::dispatcher::{compute_analytics, AnalyticsEngine};
    pub use crate::error::{EngineError, EngineResult, ErrorKind};
    pub use crate::result::AnalyticsResult;
    pub use crate::risk::RiskMetrics;
}

pub use batch::compute_analytics_batch;
pub use config::EngineConfig;
pub use curve::{flat_discount_curve, CurvePoint};
pub use dispatcher::{compute_analytics, AnalyticsEngine};
pub use error::{EngineError, EngineResult, ErrorKind};
pub use result::AnalyticsResult;
