//! # Data Loaders
//!
//! Functions populating a [`ParameterConstraints`] instance from data files.
//! They are meant to run once, in order, at start-up:
//!
//! 1. [`metadata`] declares parameters and sets their descriptions
//! 2. [`values`] installs univariate constraints
//! 3. [`correlated`] installs joint constraints on correlated groups
//! 4. [`pdg`] installs particle masses and lifetimes from the PDG table
//!
//! Later loaders overwrite constraints installed by earlier ones. Any error
//! aborts the sequence.
//!
//! [`read_file`] and [`write_file`] handle whole constraint documents as
//! produced by [`ParameterConstraints::get_yaml_dict`].
//!
//! ## Example
//!
//! ```
//! use flavor_constraints::constraints::ParameterConstraints;
//! use flavor_constraints::loaders::{read_metadata_str, read_values_str};
//!
//! let mut constraints = ParameterConstraints::new();
//! read_metadata_str(r#"{"m_x": {"description": "test mass"}}"#, &mut constraints).unwrap();
//! read_values_str(r#"{"m_x": "5.0 ± 0.1"}"#, &mut constraints).unwrap();
//!
//! assert_eq!(constraints.get_central_value("m_x").unwrap(), 5.0);
//! ```

pub mod correlated;
pub mod metadata;
pub mod pdg;
pub mod values;

use std::fs::File;
use std::path::Path;
use tracing::info;

use crate::constraints::{ConstraintDocument, ParameterConstraints};
use crate::error::Result;

pub use correlated::{read_file_values_correlated, read_values_correlated_str, CorrelatedGroup};
pub use metadata::{read_file_metadata, read_metadata_str, ParameterMetadata};
pub use pdg::{load_pdg, pdg_particle_tex, read_file_pdg};
pub use values::{read_file_values, read_values_str, ValueSpec};

fn is_json(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

/// Read a constraint document written by [`write_file`]
///
/// YAML is a superset of JSON, so either format is accepted.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<ParameterConstraints> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let constraints = ParameterConstraints::from_yaml(&contents)?;
    info!(
        path = %path.as_ref().display(),
        groups = constraints.len(),
        "constraint document read"
    );
    Ok(constraints)
}

/// Write all constraints as a document
///
/// The format is JSON for a `.json` extension and YAML otherwise.
pub fn write_file<P: AsRef<Path>>(path: P, constraints: &ParameterConstraints) -> Result<()> {
    let path = path.as_ref();
    let document: ConstraintDocument = constraints.get_yaml_dict();
    let file = File::create(path)?;
    if is_json(path) {
        serde_json::to_writer_pretty(file, &document)?;
    } else {
        serde_yaml::to_writer(file, &document)?;
    }
    info!(path = %path.display(), groups = document.len(), "constraint document written");
    Ok(())
}
