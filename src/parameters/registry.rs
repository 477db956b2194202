//! Parameter registry
//!
//! The registry maps parameter names to [`Parameter`] instances. It is an
//! ordinary value, constructed at startup and passed to whoever needs it.
//! Mutation goes through `&mut self`, so once initialization is done the
//! registry can be shared read-only (e.g. behind an `Arc`) across threads;
//! callers that need to keep mutating it concurrently wrap it in a `RwLock`.

use crate::error::{FlavorError, Result};
use crate::parameters::parameter::Parameter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name-keyed collection of [`Parameter`] metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterRegistry {
    params: BTreeMap<String, Parameter>,
}

impl ParameterRegistry {
    /// Create a new empty registry
    ///
    /// # Examples
    ///
    /// ```
    /// use flavor_constraints::parameters::ParameterRegistry;
    ///
    /// let registry = ParameterRegistry::new();
    /// assert!(registry.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            params: BTreeMap::new(),
        }
    }

    /// Return the parameter with the given name, registering it first if needed
    ///
    /// This never fails. Declaring an already registered name returns the
    /// existing instance, so metadata set through the returned reference
    /// updates it in place rather than creating a duplicate.
    ///
    /// # Examples
    ///
    /// ```
    /// use flavor_constraints::parameters::ParameterRegistry;
    ///
    /// let mut registry = ParameterRegistry::new();
    /// registry.declare("m_Bs").set_description("Bs mass");
    /// registry.declare("m_Bs").set_tex("$m_{B_s}$");
    ///
    /// let param = registry.lookup("m_Bs").unwrap();
    /// assert_eq!(param.description(), Some("Bs mass"));
    /// assert_eq!(param.tex(), Some("$m_{B_s}$"));
    /// assert_eq!(registry.len(), 1);
    /// ```
    pub fn declare(&mut self, name: &str) -> &mut Parameter {
        self.params
            .entry(name.to_string())
            .or_insert_with(|| Parameter::new(name))
    }

    /// Look up a registered parameter
    ///
    /// # Errors
    ///
    /// [`FlavorError::NotFound`] if `name` was never declared.
    pub fn lookup(&self, name: &str) -> Result<&Parameter> {
        self.params
            .get(name)
            .ok_or_else(|| FlavorError::not_found(name))
    }

    /// Look up a registered parameter for modification
    pub fn lookup_mut(&mut self, name: &str) -> Result<&mut Parameter> {
        self.params
            .get_mut(name)
            .ok_or_else(|| FlavorError::not_found(name))
    }

    /// Check if the registry contains a parameter with the given name
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Remove a parameter from the registry, returning it if it existed
    pub fn remove(&mut self, name: &str) -> Option<Parameter> {
        self.params.remove(name)
    }

    /// Number of registered parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Names of all registered parameters, sorted
    pub fn names(&self) -> Vec<String> {
        self.params.keys().cloned().collect()
    }

    /// Iterate over all registered parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.values()
    }
}
