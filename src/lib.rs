//! # flavor-constraints
//!
//! `flavor-constraints` manages the physical parameters of flavour-physics
//! predictions (masses, lifetimes, decay constants, form factor
//! coefficients) together with the probability distributions that encode
//! their measured or assumed uncertainties.
//!
//! The library provides:
//! - An explicit [`ParameterRegistry`] of parameter metadata
//! - Univariate and multivariate distributions that can be sampled and
//!   evaluated
//! - A [`ParameterConstraints`] registry attaching distributions to single
//!   parameters or correlated groups
//! - Loaders for metadata, value and correlated-value documents and for the
//!   PDG mass/width table, plus a lossless YAML/JSON document format
//!
//! ## Basic Usage
//!
//! ```
//! use flavor_constraints::{LoaderConfig, ParameterConstraints};
//! use flavor_constraints::loaders::{read_metadata_str, read_values_correlated_str};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut constraints = ParameterConstraints::new();
//! read_metadata_str("{a0: {description: first}, a1: {description: second}}", &mut constraints)
//!     .unwrap();
//! read_values_correlated_str(
//!     "- values: [{a0: 1.0 ± 0.1}, {a1: 2.0 ± 0.2}]\n  correlation: 0.9",
//!     &mut constraints,
//!     &LoaderConfig::default(),
//! )
//! .unwrap();
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let sample = constraints.get_random(&mut rng);
//! assert_eq!(sample.len(), 2);
//! ```
//!
//! ## Lifecycle
//!
//! Registries are plain values. Populate one through `&mut` access during
//! initialization, then share it read-only (e.g. behind an `Arc`) for
//! sampling and density evaluation. Sampling always takes an explicit random
//! number generator.

// Public modules
pub mod config;
pub mod constraints;
pub mod distributions;
pub mod error;
pub mod loaders;
pub mod parameters;

mod utils;

// Re-exports for convenience
pub use config::{LoaderConfig, PdgConfig};
pub use constraints::{ErrorSpec, ParameterConstraints};
pub use distributions::{OneSigmaError, ProbabilityDistribution};
pub use error::{FlavorError, Result};
pub use parameters::{Parameter, ParameterRegistry};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
