//! The constraint registry
//!
//! [`ParameterConstraints`] owns the [`ParameterRegistry`] and maps ordered
//! groups of parameter names to a single [`ProbabilityDistribution`]. A group
//! of one name is a univariate constraint, a larger group a joint
//! (correlated) constraint. Every name belongs to at most one group.
//!
//! Two insertion policies are offered:
//!
//! - [`add_constraint`](ParameterConstraints::add_constraint) rejects names
//!   that are already constrained.
//! - [`upsert_constraint`](ParameterConstraints::upsert_constraint) (and
//!   [`set_constraint`](ParameterConstraints::set_constraint), which uses it)
//!   first removes every group containing one of the names, then installs the
//!   new group.
//!
//! Both validate everything before touching the registry, so a failed call
//! leaves it unchanged.

use rand::Rng;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use crate::constraints::error_spec::ErrorSpec;
use crate::distributions::{OneSigmaError, ProbabilityDistribution};
use crate::error::{FlavorError, Result};
use crate::parameters::ParameterRegistry;

/// A distribution together with the ordered names it constrains
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    parameters: Vec<String>,
    distribution: ProbabilityDistribution,
}

impl Constraint {
    /// Names of the constrained parameters, in distribution component order
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn distribution(&self) -> &ProbabilityDistribution {
        &self.distribution
    }

    /// Component index of `name` within this constraint
    pub fn position(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p == name)
    }

    /// Check if this is a joint constraint on more than one parameter
    pub fn is_joint(&self) -> bool {
        self.parameters.len() > 1
    }
}

/// Registry of parameters and the distributions constraining them
#[derive(Debug, Clone, Default)]
pub struct ParameterConstraints {
    /// Parameter metadata
    parameters: ParameterRegistry,

    /// Constraint groups keyed by insertion id (iteration is insertion order)
    constraints: BTreeMap<u64, Constraint>,

    /// Reverse index: parameter name -> id of the group containing it
    index: HashMap<String, u64>,

    next_id: u64,
}

impl ParameterConstraints {
    /// Create an empty registry
    ///
    /// # Examples
    ///
    /// ```
    /// use flavor_constraints::constraints::ParameterConstraints;
    ///
    /// let mut constraints = ParameterConstraints::new();
    /// constraints.parameters_mut().declare("m_x");
    /// constraints.set_constraint("m_x", "5.0 ± 0.1").unwrap();
    ///
    /// assert_eq!(constraints.get_central_value("m_x").unwrap(), 5.0);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry over existing parameter metadata
    pub fn with_parameters(parameters: ParameterRegistry) -> Self {
        Self {
            parameters,
            ..Self::default()
        }
    }

    pub fn parameters(&self) -> &ParameterRegistry {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut ParameterRegistry {
        &mut self.parameters
    }

    /// Number of constraint groups
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Iterate over the constraint groups in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints.values()
    }

    /// Names of all constrained parameters, in insertion order
    pub fn constrained_parameters(&self) -> Vec<String> {
        self.iter()
            .flat_map(|c| c.parameters.iter().cloned())
            .collect()
    }

    /// Check if `name` currently has a constraint
    pub fn is_constrained(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// The constraint group containing `name`
    pub fn constraint_for(&self, name: &str) -> Option<&Constraint> {
        self.index
            .get(name)
            .and_then(|id| self.constraints.get(id))
    }

    fn require_constraint(&self, name: &str) -> Result<(&Constraint, usize)> {
        let constraint = self.constraint_for(name).ok_or_else(|| {
            FlavorError::NotFound(format!("no constraint on parameter '{}'", name))
        })?;
        let position = constraint.position(name).ok_or_else(|| {
            FlavorError::NotFound(format!("no constraint on parameter '{}'", name))
        })?;
        Ok((constraint, position))
    }

    /// Validate a prospective group without modifying anything
    pub(crate) fn validate_group<S: AsRef<str>>(
        &self,
        names: &[S],
        distribution: &ProbabilityDistribution,
    ) -> Result<Vec<String>> {
        if names.is_empty() {
            return Err(FlavorError::Validation(
                "a constraint needs at least one parameter".to_string(),
            ));
        }
        if names.len() != distribution.dim() {
            return Err(FlavorError::Validation(format!(
                "{} parameters given for a {}-dimensional {} distribution",
                names.len(),
                distribution.dim(),
                distribution.kind()
            )));
        }

        let mut seen = HashSet::new();
        let mut owned = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            if !seen.insert(name) {
                return Err(FlavorError::Validation(format!(
                    "parameter '{}' appears twice in one constraint",
                    name
                )));
            }
            self.parameters.lookup(name)?;
            owned.push(name.to_string());
        }
        Ok(owned)
    }

    fn insert_group(&mut self, names: Vec<String>, distribution: ProbabilityDistribution) {
        let id = self.next_id;
        self.next_id += 1;
        for name in &names {
            self.index.insert(name.clone(), id);
        }
        debug!(parameters = ?names, distribution = distribution.kind(), "adding constraint");
        self.constraints.insert(
            id,
            Constraint {
                parameters: names,
                distribution,
            },
        );
    }

    fn remove_group(&mut self, id: u64) -> Option<Constraint> {
        let constraint = self.constraints.remove(&id)?;
        for name in &constraint.parameters {
            self.index.remove(name);
        }
        debug!(parameters = ?constraint.parameters, "removing constraint");
        Some(constraint)
    }

    /// Register a joint constraint over `names`
    ///
    /// # Errors
    ///
    /// * `FlavorError::Validation` if `names` is empty, contains duplicates,
    ///   or its length differs from the distribution's dimension
    /// * `FlavorError::NotFound` if a name is not a registered parameter
    /// * `FlavorError::AlreadyConstrained` if a name already has a constraint
    pub fn add_constraint<S: AsRef<str>>(
        &mut self,
        names: &[S],
        distribution: impl Into<ProbabilityDistribution>,
    ) -> Result<()> {
        let distribution = distribution.into();
        let names = self.validate_group(names, &distribution)?;
        if let Some(taken) = names.iter().find(|n| self.is_constrained(n)) {
            return Err(FlavorError::AlreadyConstrained(taken.clone()));
        }
        self.insert_group(names, distribution);
        Ok(())
    }

    /// Register a joint constraint over `names`, replacing existing ones
    ///
    /// Every existing group that contains any of `names` is removed in full,
    /// so co-constrained parameters outside `names` lose their constraint.
    /// Returns the removed groups.
    pub fn upsert_constraint<S: AsRef<str>>(
        &mut self,
        names: &[S],
        distribution: impl Into<ProbabilityDistribution>,
    ) -> Result<Vec<Constraint>> {
        let distribution = distribution.into();
        let names = self.validate_group(names, &distribution)?;

        let mut stale: Vec<u64> = names
            .iter()
            .filter_map(|n| self.index.get(n).copied())
            .collect();
        stale.sort_unstable();
        stale.dedup();

        let removed = stale
            .into_iter()
            .filter_map(|id| self.remove_group(id))
            .collect();
        self.insert_group(names, distribution);
        Ok(removed)
    }

    /// Set a univariate constraint from a value string such as `"5.0 ± 0.1"`
    ///
    /// Any existing constraint on `name` is replaced.
    pub fn set_constraint(&mut self, name: &str, value: &str) -> Result<()> {
        let spec = ErrorSpec::parse(value)?;
        self.set_constraint_spec(name, &spec)
    }

    /// Set a univariate constraint from an already parsed [`ErrorSpec`]
    pub fn set_constraint_spec(&mut self, name: &str, spec: &ErrorSpec) -> Result<()> {
        let distribution = spec.to_distribution()?;
        self.upsert_constraint(&[name], distribution)?;
        Ok(())
    }

    /// Remove the constraint group containing `name`
    ///
    /// The whole group is removed: every co-constrained parameter loses the
    /// shared constraint as well.
    ///
    /// # Errors
    ///
    /// `FlavorError::NotFound` if `name` has no constraint.
    pub fn remove_constraint(&mut self, name: &str) -> Result<Constraint> {
        let id = *self.index.get(name).ok_or_else(|| {
            FlavorError::NotFound(format!("no constraint on parameter '{}'", name))
        })?;
        self.remove_group(id).ok_or_else(|| {
            FlavorError::NotFound(format!("no constraint on parameter '{}'", name))
        })
    }

    /// Central value of a single parameter
    pub fn get_central_value(&self, name: &str) -> Result<f64> {
        let (constraint, position) = self.require_constraint(name)?;
        constraint
            .distribution
            .central_value()
            .to_vec()
            .get(position)
            .copied()
            .ok_or_else(|| FlavorError::NotFound(format!("no central value for '{}'", name)))
    }

    /// Central values of all constrained parameters
    pub fn get_central_all(&self) -> HashMap<String, f64> {
        let mut values = HashMap::new();
        for constraint in self.iter() {
            let central = constraint.distribution.central_value().to_vec();
            for (name, value) in constraint.parameters.iter().zip(central) {
                values.insert(name.clone(), value);
            }
        }
        values
    }

    /// One-sigma error of a single parameter
    ///
    /// For joint constraints this is the marginal standard deviation.
    pub fn get_1d_error(&self, name: &str) -> Result<OneSigmaError> {
        let (constraint, position) = self.require_constraint(name)?;
        constraint
            .distribution
            .errors_1d()
            .get(position)
            .copied()
            .ok_or_else(|| FlavorError::NotFound(format!("no error for '{}'", name)))
    }

    /// One-sigma errors of all constrained parameters
    pub fn get_1d_errors(&self) -> HashMap<String, OneSigmaError> {
        let mut errors = HashMap::new();
        for constraint in self.iter() {
            for (name, error) in constraint
                .parameters
                .iter()
                .zip(constraint.distribution.errors_1d())
            {
                errors.insert(name.clone(), error);
            }
        }
        errors
    }

    /// Draw one sample per constraint group and flatten into name -> value
    pub fn get_random<R: Rng + ?Sized>(&self, rng: &mut R) -> HashMap<String, f64> {
        let mut values = HashMap::new();
        for constraint in self.iter() {
            let sample = constraint.distribution.sample(rng);
            for (name, value) in constraint.parameters.iter().zip(sample) {
                values.insert(name.clone(), value);
            }
        }
        values
    }

    /// Sum of the log-densities of all constraint groups at `values`
    ///
    /// # Errors
    ///
    /// `FlavorError::NotFound` if `values` lacks a constrained parameter.
    pub fn log_probability(&self, values: &HashMap<String, f64>) -> Result<f64> {
        let mut total = 0.0;
        for constraint in self.iter() {
            let x = constraint
                .parameters
                .iter()
                .map(|name| {
                    values.get(name).copied().ok_or_else(|| {
                        FlavorError::NotFound(format!("no value given for parameter '{}'", name))
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            total += constraint.distribution.log_density(&x)?;
        }
        Ok(total)
    }
}
