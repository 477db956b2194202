//! PDG particle mass and width tables
//!
//! The PDG publishes masses and widths as a fixed-width text table. Lines
//! starting with `*` are comments; every other line has the columns
//!
//! | Bytes | Content |
//! |---|---|
//! | 0..32 | PDG Monte Carlo IDs, whitespace separated |
//! | 33..51, 52..60, 61..69 | mass, positive error, negative error (GeV) |
//! | 70..88, 89..97, 98..106 | width, positive error, negative error (GeV), blank if unknown |
//! | 107..128 | particle name, then a comma separated charge list |
//!
//! A line lists one ID per charge state. Particles whose charge states
//! appear on several lines (with different masses) are keyed by name plus
//! charge, e.g. `K+` and `K0`, all others by name alone.
//!
//! For every particle of [`PdgConfig::include`] a mass constraint is
//! installed and, when the width is known, a lifetime constraint derived
//! from it with `tau = 1 / Gamma`.

use nom::{
    bytes::complete::take_while,
    character::complete::{alpha1, char, digit0, digit1},
    combinator::{all_consuming, recognize},
    multi::many0,
    sequence::{delimited, pair},
    IResult, Parser,
};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::config::PdgConfig;
use crate::constraints::ParameterConstraints;
use crate::distributions::{
    AsymmetricNormalDistribution, DeltaDistribution, NormalDistribution, ProbabilityDistribution,
};
use crate::error::{FlavorError, Result};

/// A measured quantity with asymmetric errors, both stored as positive numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub central: f64,
    pub right: f64,
    pub left: f64,
}

impl Measurement {
    /// Normal distribution for equal errors, two-piece normal otherwise
    pub fn to_distribution(&self) -> Result<ProbabilityDistribution> {
        if self.right == 0.0 && self.left == 0.0 {
            Ok(DeltaDistribution::new(self.central)?.into())
        } else if self.right == self.left {
            Ok(NormalDistribution::new(self.central, self.right)?.into())
        } else {
            Ok(AsymmetricNormalDistribution::new(self.central, self.right, self.left)?.into())
        }
    }

    /// Lifetime `1 / width` with first-order propagated errors
    ///
    /// Inversion is decreasing, so the upper error of the width becomes the
    /// lower error of the lifetime and vice versa.
    pub fn inverse(&self) -> Self {
        let squared = self.central * self.central;
        Self {
            central: 1.0 / self.central,
            right: self.left / squared,
            left: self.right / squared,
        }
    }
}

/// One charge state of a particle in the PDG table
#[derive(Debug, Clone, PartialEq)]
pub struct PdgParticle {
    pub id: String,
    pub name: String,
    pub charge: String,
    pub mass: Measurement,
    /// `None` if the table gives no width
    pub width: Option<Measurement>,
}

/// Byte columns `start..end` of a line, clipped to its length
fn column(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("")
}

fn parse_number(field: &str, what: &str, line_number: usize) -> Result<f64> {
    field.trim().parse::<f64>().map_err(|_| {
        FlavorError::DataIntegrity(format!(
            "line {}: cannot read {} from '{}'",
            line_number,
            what,
            field.trim()
        ))
    })
}

fn parse_measurement(
    line: &str,
    columns: [(usize, usize); 3],
    what: &str,
    line_number: usize,
) -> Result<Measurement> {
    let [central, right, left] = columns;
    Ok(Measurement {
        central: parse_number(column(line, central.0, central.1), what, line_number)?,
        right: parse_number(column(line, right.0, right.1), what, line_number)?.abs(),
        left: parse_number(column(line, left.0, left.1), what, line_number)?.abs(),
    })
}

/// Parse a PDG mass and width table
///
/// # Returns
///
/// All charge states keyed by particle name, with the charge appended for
/// multiplets.
///
/// # Errors
///
/// `FlavorError::DataIntegrity` for unreadable numbers, a missing name or
/// charge column, or an ID list whose length differs from the charge list.
pub fn parse_pdg_table(text: &str) -> Result<BTreeMap<String, PdgParticle>> {
    let mut by_name: BTreeMap<String, BTreeMap<String, PdgParticle>> = BTreeMap::new();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('*') {
            continue;
        }

        let mass = parse_measurement(line, [(33, 51), (52, 60), (61, 69)], "mass", line_number)?;
        let width = if column(line, 70, 88).trim().is_empty() {
            None
        } else {
            Some(parse_measurement(
                line,
                [(70, 88), (89, 97), (98, 106)],
                "width",
                line_number,
            )?)
        };

        let ids: Vec<&str> = column(line, 0, 32).split_whitespace().collect();
        let mut name_column = column(line, 107, 128).split_whitespace();
        let (name, charges) = match (name_column.next(), name_column.next()) {
            (Some(name), Some(charges)) => (name, charges),
            _ => {
                return Err(FlavorError::DataIntegrity(format!(
                    "line {}: missing particle name or charge list",
                    line_number
                )))
            }
        };
        let charges: Vec<&str> = charges.split(',').map(str::trim).collect();
        if ids.len() != charges.len() {
            return Err(FlavorError::DataIntegrity(format!(
                "line {}: {} IDs for {} charges of '{}'",
                line_number,
                ids.len(),
                charges.len(),
                name
            )));
        }

        let states = by_name.entry(name.to_string()).or_default();
        for (id, charge) in ids.into_iter().zip(charges) {
            states.insert(
                charge.to_string(),
                PdgParticle {
                    id: id.to_string(),
                    name: name.to_string(),
                    charge: charge.to_string(),
                    mass,
                    width,
                },
            );
        }
    }

    let mut particles = BTreeMap::new();
    for (name, states) in by_name {
        if states.len() > 1 {
            for (charge, particle) in states {
                particles.insert(format!("{}{}", name, charge), particle);
            }
        } else {
            particles.extend(states.into_values().map(|particle| (name.clone(), particle)));
        }
    }
    Ok(particles)
}

// TeX rendering of PDG particle names using nom:
//   letters, superscript chars, (sub)..., (digits)..., superscript chars

/// `*` and the ASCII run `+ , - . / 0`
fn is_superscript(c: char) -> bool {
    matches!(c, '*' | '+'..='0')
}

fn superscript(input: &str) -> IResult<&str, &str> {
    take_while(is_superscript).parse(input)
}

fn subscript(input: &str) -> IResult<&str, &str> {
    delimited(char('('), recognize(pair(digit0, alpha1)), char(')')).parse(input)
}

fn mass_label(input: &str) -> IResult<&str, &str> {
    delimited(char('('), digit1, char(')')).parse(input)
}

fn particle_name(input: &str) -> IResult<&str, (&str, &str, Vec<&str>, &str)> {
    let (input, (symbol, sup, subs, _, sup_after)) = (
        alpha1,
        superscript,
        many0(subscript),
        many0(mass_label),
        superscript,
    )
        .parse(input)?;
    Ok((input, (symbol, sup, subs, sup_after)))
}

/// TeX label of a PDG particle name, e.g. `K*(892)+` -> `K^{*+}`
pub fn pdg_particle_tex(name: &str) -> String {
    let Ok((_, (symbol, sup, subs, sup_after))) = all_consuming(particle_name).parse(name) else {
        return match name {
            "J/psi(1S)" => r"J/\psi".to_string(),
            _ => name.to_string(),
        };
    };

    let mut tex = if symbol.len() > 1 {
        format!("\\{}", symbol)
    } else {
        symbol.to_string()
    };
    let sup = format!("{}{}", sup, sup_after);
    if !sup.is_empty() {
        tex.push_str(&format!("^{{{}}}", sup));
    }
    if let Some(sub) = subs.last() {
        tex.push_str(&format!("_{{{}}}", sub));
    }
    tex
}

/// `(tex, description)` of the mass parameter of a particle
fn mass_labels(tex: &str) -> (String, String) {
    match tex {
        "b" | "c" => (
            format!("$m_{{{0}}}(m_{{{0}}})$", tex),
            format!(
                r"${0}$ quark mass in the $\overline{{\text{{MS}}}}$ scheme at the scale $m_{0}$",
                tex
            ),
        ),
        "s" | "u" | "d" => (
            format!(r"$m_{{{}}}(2\,\text{{GeV}})$", tex),
            format!(
                r"${}$ quark mass in the $\overline{{\text{{MS}}}}$ scheme at 2 GeV",
                tex
            ),
        ),
        "t" => (format!("$m_{{{}}}$", tex), format!("${}$ quark pole mass", tex)),
        _ => (format!("$m_{{{}}}$", tex), format!("${}$ mass", tex)),
    }
}

/// Install mass and lifetime constraints from a PDG table
///
/// Parameters are declared if needed and their metadata overwritten;
/// existing constraints on them are replaced. Particles of the include list
/// missing from the table are skipped with a warning.
#[instrument(skip_all, fields(particles = config.include.len()))]
pub fn load_pdg(
    text: &str,
    constraints: &mut ParameterConstraints,
    config: &PdgConfig,
) -> Result<()> {
    let table = parse_pdg_table(text)?;
    let mut masses = 0;
    let mut lifetimes = 0;

    for particle in &config.include {
        let Some(data) = table.get(particle) else {
            warn!(particle = %particle, "particle not found in PDG table");
            continue;
        };
        let tex = pdg_particle_tex(particle);

        let mass_name = config.mass_parameter(particle);
        let (mass_tex, mass_description) = mass_labels(&tex);
        constraints
            .parameters_mut()
            .declare(&mass_name)
            .set_tex(&mass_tex)
            .set_description(&mass_description);
        constraints.upsert_constraint(&[mass_name.as_str()], data.mass.to_distribution()?)?;
        masses += 1;

        // Unknown width, e.g. for B*
        let Some(width) = data.width.filter(|w| w.central != 0.0) else {
            debug!(particle = %particle, "no width, skipping lifetime");
            continue;
        };

        let lifetime_name = config.lifetime_parameter(particle);
        constraints
            .parameters_mut()
            .declare(&lifetime_name)
            .set_tex(&format!(r"$\tau_{{{}}}$", tex))
            .set_description(&format!("${}$ lifetime", tex));
        constraints.upsert_constraint(
            &[lifetime_name.as_str()],
            width.inverse().to_distribution()?,
        )?;
        lifetimes += 1;
    }

    info!(masses, lifetimes, "PDG masses and lifetimes loaded");
    Ok(())
}

/// Read a PDG table from a file, e.g. `mass_width_2017.mcd`
pub fn read_file_pdg<P: AsRef<Path>>(
    path: P,
    constraints: &mut ParameterConstraints,
    config: &PdgConfig,
) -> Result<()> {
    let text = std::fs::read_to_string(path)?;
    load_pdg(&text, constraints, config)
}
