//! # Parameter System
//!
//! Named physical parameters and the registry that owns them.
//!
//! ## Core Components
//!
//! - [`Parameter`]: a named quantity with a description and a display label
//! - [`ParameterRegistry`]: the explicit name → [`Parameter`] registry
//!
//! Parameters have no value of their own. Central values, uncertainties and
//! correlations are attached through
//! [`ParameterConstraints`](crate::constraints::ParameterConstraints).
//!
//! ## Example Usage
//!
//! ```rust
//! use flavor_constraints::parameters::ParameterRegistry;
//!
//! let mut registry = ParameterRegistry::new();
//! registry
//!     .declare("tau_B0")
//!     .set_description("B0 lifetime")
//!     .set_tex(r"$\tau_{B^0}$");
//!
//! assert!(registry.lookup("tau_B0").is_ok());
//! assert!(registry.lookup("tau_Bs").is_err());
//! ```

pub mod parameter;
pub mod registry;


// Re-export key types
pub use parameter::Parameter;
pub use registry::ParameterRegistry;
