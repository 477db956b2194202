//! Parameter metadata documents
//!
//! ```yaml
//! m_B0:
//!   description: $B^0$ mass
//!   tex: $m_{B^0}$
//! alpha_s:
//! ```
//!
//! Every listed name is declared; a missing or null entry leaves the
//! metadata untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, instrument};

use crate::constraints::ParameterConstraints;
use crate::error::Result;

/// Metadata of a single parameter as written in a data file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tex: Option<String>,
}

pub type MetadataDocument = BTreeMap<String, Option<ParameterMetadata>>;

/// Declare every parameter of `document` and update its metadata
pub fn load_metadata(document: &MetadataDocument, constraints: &mut ParameterConstraints) {
    for (name, metadata) in document {
        let parameter = constraints.parameters_mut().declare(name);
        if let Some(metadata) = metadata {
            if let Some(description) = &metadata.description {
                parameter.set_description(description);
            }
            if let Some(tex) = &metadata.tex {
                parameter.set_tex(tex);
            }
        }
    }
}

/// Read a metadata document from a YAML (or JSON) string
#[instrument(skip_all)]
pub fn read_metadata_str(yaml: &str, constraints: &mut ParameterConstraints) -> Result<()> {
    let document: MetadataDocument = serde_yaml::from_str(yaml)?;
    load_metadata(&document, constraints);
    info!(parameters = document.len(), "parameter metadata loaded");
    Ok(())
}

/// Read a metadata document from a file
pub fn read_file_metadata<P: AsRef<Path>>(
    path: P,
    constraints: &mut ParameterConstraints,
) -> Result<()> {
    let contents = std::fs::read_to_string(path)?;
    read_metadata_str(&contents, constraints)
}
