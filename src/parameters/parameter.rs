//! Parameter definition
//!
//! A [`Parameter`] is a named physical quantity (a mass, a lifetime, a form
//! factor coefficient, ...). It carries only metadata. Values live in the
//! probability distributions attached to it through
//! [`ParameterConstraints`](crate::constraints::ParameterConstraints).

use serde::{Deserialize, Serialize};

/// A named physical quantity with descriptive metadata but no value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Name of the parameter, its sole identity key
    name: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Display label for typeset rendering, e.g. `$m_{B^0}$`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tex: Option<String>,
}

impl Parameter {
    /// Create a new parameter with the given name and empty metadata
    ///
    /// # Examples
    ///
    /// ```
    /// use flavor_constraints::parameters::Parameter;
    ///
    /// let param = Parameter::new("m_B0");
    /// assert_eq!(param.name(), "m_B0");
    /// assert!(param.description.is_none());
    /// ```
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            tex: None,
        }
    }

    /// Get the name of the parameter
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the description of the parameter (if any)
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the display label of the parameter (if any)
    pub fn tex(&self) -> Option<&str> {
        self.tex.as_deref()
    }

    /// Set the description, returning `self` for chaining
    pub fn set_description(&mut self, description: &str) -> &mut Self {
        self.description = Some(description.to_string());
        self
    }

    /// Set the display label, returning `self` for chaining
    pub fn set_tex(&mut self, tex: &str) -> &mut Self {
        self.tex = Some(tex.to_string());
        self
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{} ({})", self.name, description),
            None => write!(f, "{}", self.name),
        }
    }
}
