//! # bondcalc Math
//!
//! Numerical kernels for the bondcalc analytics engine.
//!
//! - **Solvers**: Newton-Raphson root finding with analytic or numerical
//!   derivatives, and a domain-guarded variant that damps steps leaving the
//!   region where the function is defined.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::solvers::{
        newton_raphson, newton_raphson_guarded, newton_raphson_numerical, SolverConfig,
        SolverResult,
    };
}

pub use error::{MathError, MathResult};
