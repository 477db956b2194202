//! Uncorrelated parameter values
//!
//! A mapping from parameter name to its value. A value is either a bare
//! number (exact, no uncertainty), a value string understood by
//! [`ErrorSpec`], or a full tagged distribution record:
//!
//! ```yaml
//! alpha_e: 0.00729735
//! m_x: 5.0 ± 0.1
//! f_B: (190.0 +1.3 -1.1) e-3
//! mu_b:
//!   distribution: uniform
//!   central_value: 4.8
//!   half_range: 0.5
//! ```
//!
//! Every parameter must already be declared, typically by a metadata
//! document. Existing constraints on the listed names are replaced.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, instrument};

use crate::constraints::{ErrorSpec, ParameterConstraints};
use crate::distributions::{DistributionRecord, ProbabilityDistribution};
use crate::error::{FlavorError, Result};

/// A parameter value as written in a data file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueSpec {
    Number(f64),
    Text(String),
    Record(DistributionRecord),
}

impl ValueSpec {
    /// Value and error components, for the number and string forms
    ///
    /// # Errors
    ///
    /// `FlavorError::Validation` for a distribution record, which carries
    /// no error components.
    pub fn to_error_spec(&self) -> Result<ErrorSpec> {
        match self {
            Self::Number(x) => Ok(ErrorSpec {
                central_value: *x,
                symmetric_errors: Vec::new(),
                asymmetric_errors: Vec::new(),
            }),
            Self::Text(text) => ErrorSpec::parse(text),
            Self::Record(record) => Err(FlavorError::Validation(format!(
                "expected a value with errors, got a distribution record {:?}",
                record
            ))),
        }
    }

    pub fn to_distribution(&self) -> Result<ProbabilityDistribution> {
        match self {
            Self::Record(record) => ProbabilityDistribution::try_from(record.clone()),
            _ => self.to_error_spec()?.to_distribution(),
        }
    }
}

pub type ValuesDocument = BTreeMap<String, ValueSpec>;

/// Install one univariate constraint per entry of `document`
///
/// All values are parsed and all names checked before anything is
/// installed.
pub fn load_values(document: &ValuesDocument, constraints: &mut ParameterConstraints) -> Result<()> {
    let mut parsed = Vec::with_capacity(document.len());
    for (name, value) in document {
        constraints.parameters().lookup(name)?;
        parsed.push((name, value.to_distribution()?));
    }
    for (name, distribution) in parsed {
        constraints.upsert_constraint(&[name], distribution)?;
    }
    Ok(())
}

/// Read a values document from a YAML (or JSON) string
#[instrument(skip_all)]
pub fn read_values_str(yaml: &str, constraints: &mut ParameterConstraints) -> Result<()> {
    let document: ValuesDocument = serde_yaml::from_str(yaml)?;
    load_values(&document, constraints)?;
    info!(constraints = document.len(), "uncorrelated parameter values loaded");
    Ok(())
}

/// Read a values document from a file
pub fn read_file_values<P: AsRef<Path>>(
    path: P,
    constraints: &mut ParameterConstraints,
) -> Result<()> {
    let contents = std::fs::read_to_string(path)?;
    read_values_str(&contents, constraints)
}
