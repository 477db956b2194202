//! Correlated parameter values
//!
//! A list of parameter groups, each with the values of its members and the
//! correlation matrix between them:
//!
//! ```yaml
//! - values:
//!     - a0: 1.0 ± 0.1
//!     - a1: 2.0 ± 0.2
//!   correlation: 0.9
//! - values:
//!     - b0: 0.5 ± 0.01
//!     - b1: 0.1 ± 0.02 ± 0.01
//!     - b2: -1.2 +0.2 -0.1
//!   correlation:
//!     - [1.0, 0.1, 0.3]
//!     - [1.0, -0.2]
//!     - [1.0]
//! ```
//!
//! Each value is reduced to its central value and combined symmetric error
//! ([`ErrorSpec::combined_error`]). The covariance matrix is built and, if
//! needed, repaired as described in [`crate::distributions::covariance`], and
//! the group is installed as one multivariate normal constraint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, instrument};

use crate::config::LoaderConfig;
use crate::constraints::ParameterConstraints;
use crate::distributions::covariance::repaired_covariance;
use crate::distributions::{CorrelationSpec, MultivariateNormalDistribution, ProbabilityDistribution};
use crate::error::{FlavorError, Result};
use crate::loaders::values::ValueSpec;

/// One correlated group as written in a data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelatedGroup {
    /// Single-entry maps `name: value`, in matrix order
    pub values: Vec<BTreeMap<String, ValueSpec>>,
    pub correlation: CorrelationSpec,
}

impl CorrelatedGroup {
    /// Build the joint distribution of the group
    ///
    /// # Returns
    ///
    /// The ordered parameter names and their multivariate normal distribution.
    pub fn to_distribution(
        &self,
        damping: f64,
    ) -> Result<(Vec<String>, MultivariateNormalDistribution)> {
        let n = self.values.len();
        let mut names = Vec::with_capacity(n);
        let mut central_values = Vec::with_capacity(n);
        let mut errors = Vec::with_capacity(n);

        for entry in &self.values {
            let (name, value) = match entry.iter().next() {
                Some(pair) if entry.len() == 1 => pair,
                _ => {
                    return Err(FlavorError::DataIntegrity(format!(
                        "each correlated value must be a single 'name: value' entry, got {} entries",
                        entry.len()
                    )))
                }
            };
            let spec = value.to_error_spec()?;
            names.push(name.clone());
            central_values.push(spec.central_value);
            errors.push(spec.combined_error());
        }

        let correl = self.correlation.to_matrix(n)?;
        let covar = repaired_covariance(&errors, &correl, damping)?;
        let distribution = MultivariateNormalDistribution::new(central_values, covar)?;
        Ok((names, distribution))
    }
}

pub type CorrelatedDocument = Vec<CorrelatedGroup>;

/// Install one joint constraint per group of `document`
///
/// Every distribution is built and every name checked before anything is
/// installed. Existing constraints touching a group's names are replaced.
pub fn load_values_correlated(
    document: &CorrelatedDocument,
    constraints: &mut ParameterConstraints,
    config: &LoaderConfig,
) -> Result<()> {
    let mut groups = Vec::with_capacity(document.len());
    for group in document {
        let (names, distribution) = group.to_distribution(config.correlation_damping)?;
        let distribution = ProbabilityDistribution::from(distribution);
        let names = constraints.validate_group(&names, &distribution)?;
        groups.push((names, distribution));
    }
    for (names, distribution) in groups {
        constraints.upsert_constraint(&names, distribution)?;
    }
    Ok(())
}

/// Read a correlated values document from a YAML (or JSON) string
#[instrument(skip_all)]
pub fn read_values_correlated_str(
    yaml: &str,
    constraints: &mut ParameterConstraints,
    config: &LoaderConfig,
) -> Result<()> {
    let document: CorrelatedDocument = serde_yaml::from_str(yaml)?;
    load_values_correlated(&document, constraints, config)?;
    info!(groups = document.len(), "correlated parameter values loaded");
    Ok(())
}

/// Read a correlated values document from a file
pub fn read_file_values_correlated<P: AsRef<Path>>(
    path: P,
    constraints: &mut ParameterConstraints,
    config: &LoaderConfig,
) -> Result<()> {
    let contents = std::fs::read_to_string(path)?;
    read_values_correlated_str(&contents, constraints, config)
}
