//! Configuration options for the data loaders.
//!
//! This module defines which particles are read from the PDG mass/width table,
//! how their names are translated into parameter names, and the damping factor
//! of the covariance repair applied to correlated parameter groups.

use std::collections::HashMap;

/// Particles read from the PDG table by default (PDG naming).
const PDG_INCLUDE: &[&str] = &[
    "B(s)", "B(c)", "B(s)*", "B*+", "B*0", "B+", "B0", "D(s)", "D(s)*", "D+", "D0", "H",
    "J/psi(1S)", "K(L)", "K(S)", "K*(892)+", "K*(892)0", "K+", "K0", "Lambda", "Lambda(b)",
    "Lambda(c)", "omega(782)", "D*(2007)", "D*(2010)", "W", "Z", "b", "c", "d", "e", "eta",
    "f(0)(980)", "mu", "phi(1020)", "pi+", "pi0", "psi(2S)", "rho(770)+", "rho(770)0", "s", "t",
    "tau", "u",
];

/// PDG particle names that differ from the names used in parameter names.
const PDG_TRANSLATE: &[(&str, &str)] = &[
    ("B(s)", "Bs"),
    ("B(c)", "Bc"),
    ("D(s)", "Ds"),
    ("B(s)*", "Bs*"),
    ("D(s)*", "Ds*"),
    ("D*(2007)", "D*0"),
    ("D*(2010)", "D*+"),
    ("J/psi(1S)", "J/psi"),
    ("K(L)", "KL"),
    ("K(S)", "KS"),
    ("K*(892)+", "K*+"),
    ("K*(892)0", "K*0"),
    ("phi(1020)", "phi"),
    ("rho(770)0", "rho0"),
    ("rho(770)+", "rho+"),
    ("f(0)(980)", "f0"),
    ("eta'(958)", "eta'"),
    ("omega(782)", "omega"),
    ("Lambda(b)", "Lambdab"),
    ("Lambda(c)", "Lambdac"),
    ("Higgs", "h"),
    ("H", "h"),
];

/// Options for reading the PDG mass and width table.
#[derive(Debug, Clone, PartialEq)]
pub struct PdgConfig {
    /// PDG names of the particles to install constraints for
    pub include: Vec<String>,

    /// PDG name -> name used in parameter names
    pub translate: HashMap<String, String>,

    /// Prefix of mass parameters. Default: "m_"
    pub mass_prefix: String,

    /// Prefix of lifetime parameters. Default: "tau_"
    pub lifetime_prefix: String,
}

impl Default for PdgConfig {
    fn default() -> Self {
        Self {
            include: PDG_INCLUDE.iter().map(|s| s.to_string()).collect(),
            translate: PDG_TRANSLATE
                .iter()
                .map(|(pdg, code)| (pdg.to_string(), code.to_string()))
                .collect(),
            mass_prefix: "m_".to_string(),
            lifetime_prefix: "tau_".to_string(),
        }
    }
}

impl PdgConfig {
    /// Only read the given particles, keeping the default translation table.
    pub fn with_include<S: AsRef<str>>(mut self, include: &[S]) -> Self {
        self.include = include.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Name used in parameter names for a PDG particle name
    pub fn code_name<'a>(&'a self, pdg_name: &'a str) -> &'a str {
        self.translate
            .get(pdg_name)
            .map(String::as_str)
            .unwrap_or(pdg_name)
    }

    pub fn mass_parameter(&self, pdg_name: &str) -> String {
        format!("{}{}", self.mass_prefix, self.code_name(pdg_name))
    }

    pub fn lifetime_parameter(&self, pdg_name: &str) -> String {
        format!("{}{}", self.lifetime_prefix, self.code_name(pdg_name))
    }
}

/// Configuration options for the data loaders.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    /// PDG table options
    pub pdg: PdgConfig,

    /// Factor applied once to the off-diagonal correlations when a covariance
    /// matrix is not positive definite. Default: 0.99
    pub correlation_damping: f64,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            pdg: PdgConfig::default(),
            correlation_damping: 0.99,
        }
    }
}
