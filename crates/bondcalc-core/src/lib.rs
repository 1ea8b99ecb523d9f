//! # bondcalc Core
//!
//! Reference data and value types shared by every crate of the bondcalc
//! analytics engine.
//!
//! - **Types**: [`Date`], [`Frequency`], [`Compounding`], [`CashFlow`]
//! - **Day Count Conventions**: year fractions for accrual and discounting
//! - **Business Day Calendars**: holiday tables and date rolling rules
//!
//! Everything in this crate is pure. Holiday tables are built lazily once per
//! process and are read-only afterwards, so calendars can be shared freely
//! between threads.
//!
//! ## Example
//!
//! ```rust
//! use bondcalc_core::prelude::*;
//!
//! let calendar = CalendarId::Target.calendar();
//! let saturday = Date::from_ymd(2025, 1, 4).unwrap();
//! let monday = calendar
//!     .adjust(saturday, BusinessDayConvention::Following)
//!     .unwrap();
//! assert_eq!(monday, Date::from_ymd(2025, 1, 6).unwrap());
//!
//! let dc = DayCountConvention::Act365Fixed.to_day_count();
//! let yf = dc.year_fraction(monday, monday.add_days(365));
//! assert_eq!(yf, rust_decimal::Decimal::ONE);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::cast_possible_truncation)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, CalendarId};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        CashFlow, CashFlowSchedule, CashFlowType, Compounding, CompoundingRule, Date, Frequency,
    };
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::Date;
