//! Persisted form of a [`ParameterConstraints`] registry
//!
//! The document is a list of constraint records in insertion order. Each
//! record holds the ordered parameter names of one group and the tagged
//! distribution record constraining them:
//!
//! ```yaml
//! - parameters: [m_B0]
//!   values:
//!     distribution: normal
//!     central_value: 5.27963
//!     standard_deviation: 0.00015
//! - parameters: [a0, a1]
//!   values:
//!     distribution: multivariate_normal
//!     central_value: [1.0, 2.0]
//!     covariance: [[0.01, 0.018], [0.018, 0.04]]
//! ```
//!
//! A list is used instead of a map keyed by the name group so that the same
//! document is valid JSON, where keys must be strings.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constraints::ParameterConstraints;
use crate::distributions::{DistributionRecord, ProbabilityDistribution};
use crate::error::Result;

/// One constraint group as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintRecord {
    pub parameters: Vec<String>,
    pub values: DistributionRecord,
}

/// A whole registry as written to disk
pub type ConstraintDocument = Vec<ConstraintRecord>;

impl ParameterConstraints {
    /// Export every constraint group as a serializable document
    pub fn get_yaml_dict(&self) -> ConstraintDocument {
        self.iter()
            .map(|constraint| ConstraintRecord {
                parameters: constraint.parameters().to_vec(),
                values: DistributionRecord::from(constraint.distribution()),
            })
            .collect()
    }

    /// Rebuild a registry from a document produced by
    /// [`get_yaml_dict`](Self::get_yaml_dict)
    ///
    /// Every parameter named in the document is declared. Records are
    /// installed with [`add_constraint`](Self::add_constraint), so a document
    /// naming a parameter in two groups is rejected.
    pub fn from_yaml_dict(document: ConstraintDocument) -> Result<Self> {
        let mut constraints = Self::new();
        for record in document {
            for name in &record.parameters {
                constraints.parameters_mut().declare(name);
            }
            let distribution = ProbabilityDistribution::try_from(record.values)?;
            constraints.add_constraint(&record.parameters, distribution)?;
        }
        debug!(groups = constraints.len(), "constraints rebuilt from document");
        Ok(constraints)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.get_yaml_dict())?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: ConstraintDocument = serde_yaml::from_str(yaml)?;
        Self::from_yaml_dict(document)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.get_yaml_dict())?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let document: ConstraintDocument = serde_json::from_str(json)?;
        Self::from_yaml_dict(document)
    }
}
