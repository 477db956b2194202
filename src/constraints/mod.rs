//! # Parameter Constraints
//!
//! The registry attaching probability distributions to groups of parameters,
//! the textual error-spec parser used to build univariate constraints, the
//! persisted document format, and reproducible batch sampling.

pub mod document;
pub mod error_spec;
pub mod parameter_constraints;
mod sampling;

pub use document::{ConstraintDocument, ConstraintRecord};
pub use error_spec::ErrorSpec;
pub use parameter_constraints::{Constraint, ParameterConstraints};
