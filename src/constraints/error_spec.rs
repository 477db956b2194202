//! Parsing of value-with-uncertainty strings
//!
//! Data files give parameter values as a central value followed by any number
//! of error terms:
//!
//! | Input | Meaning |
//! |---|---|
//! | `5.0` | exact value, no error |
//! | `5.0 ± 0.1`, `5.0 +- 0.1`, `5.0 +/- 0.1` | symmetric error |
//! | `5.0 +0.2 -0.1` | asymmetric error (upper, lower) |
//! | `5.0 ± 2%` | error relative to the central value |
//! | `5.0 ± 0.1 ± 0.05 +0.2 -0.1` | several independent errors |
//! | `(5.0 ± 0.1) e-3`, `(5.0 ± 0.1) × 10^-3` | overall power-of-ten scale |
//! | `(5.0 ± 0.1)` | parenthesised, no scale |

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, i32 as int32, multispace0, one_of},
    combinator::{map, opt},
    multi::many0,
    number::complete::double,
    sequence::{delimited, pair, preceded},
    IResult, Parser,
};

use crate::distributions::{
    AsymmetricNormalDistribution, DeltaDistribution, NormalDistribution, ProbabilityDistribution,
};
use crate::error::{FlavorError, Result};

/// Parsed value with its independent error components
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorSpec {
    /// Central value
    pub central_value: f64,

    /// Symmetric error components
    pub symmetric_errors: Vec<f64>,

    /// Asymmetric error components as `(right, left)`, both positive
    pub asymmetric_errors: Vec<(f64, f64)>,
}

impl ErrorSpec {
    /// Parse a value string
    ///
    /// # Examples
    ///
    /// ```
    /// use flavor_constraints::constraints::ErrorSpec;
    ///
    /// let spec = ErrorSpec::parse("(4.2 ± 0.1 +0.3 -0.2) e-3").unwrap();
    /// assert!((spec.central_value - 4.2e-3).abs() < 1e-15);
    /// assert_eq!(spec.symmetric_errors.len(), 1);
    /// assert_eq!(spec.asymmetric_errors.len(), 1);
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let (rest, (central, terms, exponent)) = value_spec(input.trim()).map_err(|e| {
            FlavorError::Parse(format!("cannot parse value '{}': {:?}", input, e))
        })?;
        if !rest.trim().is_empty() {
            return Err(FlavorError::Parse(format!(
                "unexpected trailing characters '{}' in value '{}'",
                rest, input
            )));
        }
        if !central.is_finite() {
            return Err(FlavorError::Parse(format!(
                "central value in '{}' is not finite",
                input
            )));
        }

        let scale = 10f64.powi(exponent);
        let resolve = |m: Magnitude| -> Result<f64> {
            let value = match m {
                Magnitude::Absolute(x) => x,
                Magnitude::Percent(p) => central.abs() * p / 100.0,
            };
            if value < 0.0 || !value.is_finite() {
                return Err(FlavorError::Parse(format!(
                    "error components in '{}' must be non-negative",
                    input
                )));
            }
            Ok(value * scale)
        };

        let mut spec = ErrorSpec {
            central_value: central * scale,
            symmetric_errors: Vec::new(),
            asymmetric_errors: Vec::new(),
        };
        for term in terms {
            match term {
                Term::Symmetric(e) => spec.symmetric_errors.push(resolve(e)?),
                Term::Asymmetric(right, left) => spec
                    .asymmetric_errors
                    .push((resolve(right)?, resolve(left)?)),
            }
        }
        Ok(spec)
    }

    /// A value with a single symmetric error
    pub fn symmetric(central_value: f64, error: f64) -> Self {
        Self {
            central_value,
            symmetric_errors: vec![error],
            asymmetric_errors: Vec::new(),
        }
    }

    /// Check if the value carries no uncertainty at all
    pub fn is_exact(&self) -> bool {
        self.symmetric_errors.iter().all(|&e| e == 0.0)
            && self
                .asymmetric_errors
                .iter()
                .all(|&(r, l)| r == 0.0 && l == 0.0)
    }

    fn sum_sym_squared(&self) -> f64 {
        self.symmetric_errors.iter().map(|e| e * e).sum()
    }

    /// Single symmetrized error: `sqrt(Σ sym² + Σ right·left)`
    ///
    /// This is the marginal error used when building covariance matrices.
    pub fn combined_error(&self) -> f64 {
        let asym: f64 = self.asymmetric_errors.iter().map(|(r, l)| r * l).sum();
        (self.sum_sym_squared() + asym).sqrt()
    }

    /// Upper and lower errors added in quadrature, symmetric parts on both sides
    pub fn combined_asymmetric(&self) -> (f64, f64) {
        let sym = self.sum_sym_squared();
        let right: f64 = self.asymmetric_errors.iter().map(|(r, _)| r * r).sum();
        let left: f64 = self.asymmetric_errors.iter().map(|(_, l)| l * l).sum();
        ((sym + right).sqrt(), (sym + left).sqrt())
    }

    /// Univariate distribution described by this value
    ///
    /// No error gives a delta distribution, equal upper and lower errors a
    /// normal distribution, otherwise a two-piece normal distribution.
    pub fn to_distribution(&self) -> Result<ProbabilityDistribution> {
        if self.is_exact() {
            return Ok(DeltaDistribution::new(self.central_value)?.into());
        }
        if let ([error], []) = (
            self.symmetric_errors.as_slice(),
            self.asymmetric_errors.as_slice(),
        ) {
            return Ok(NormalDistribution::new(self.central_value, *error)?.into());
        }
        let (right, left) = self.combined_asymmetric();
        if right == left {
            Ok(NormalDistribution::new(self.central_value, right)?.into())
        } else {
            Ok(AsymmetricNormalDistribution::new(self.central_value, right, left)?.into())
        }
    }
}

impl std::str::FromStr for ErrorSpec {
    type Err = FlavorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Magnitude {
    Absolute(f64),
    Percent(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Term {
    Symmetric(Magnitude),
    Asymmetric(Magnitude, Magnitude),
}

// Parser functions using nom

fn ws(input: &str) -> IResult<&str, &str> {
    multispace0(input)
}

fn number(input: &str) -> IResult<&str, f64> {
    double(input)
}

/// A number, optionally followed by `%`
fn magnitude(input: &str) -> IResult<&str, Magnitude> {
    let (input, value) = number(input)?;
    let (input, percent) = opt(preceded(ws, char('%'))).parse(input)?;
    let magnitude = match percent {
        Some(_) => Magnitude::Percent(value),
        None => Magnitude::Absolute(value),
    };
    Ok((input, magnitude))
}

fn plus_minus(input: &str) -> IResult<&str, &str> {
    alt((tag("±"), tag("+-"), tag("+/-"))).parse(input)
}

fn symmetric_term(input: &str) -> IResult<&str, Term> {
    map(preceded(pair(plus_minus, ws), magnitude), Term::Symmetric).parse(input)
}

fn asymmetric_term(input: &str) -> IResult<&str, Term> {
    map(
        (char('+'), ws, magnitude, ws, char('-'), ws, magnitude),
        |(_, _, right, _, _, _, left)| Term::Asymmetric(right, left),
    )
    .parse(input)
}

fn term(input: &str) -> IResult<&str, Term> {
    preceded(ws, alt((symmetric_term, asymmetric_term))).parse(input)
}

/// Central value followed by error terms
fn body(input: &str) -> IResult<&str, (f64, Vec<Term>)> {
    pair(number, many0(term)).parse(input)
}

/// `e-3`, `× 10^-3`, `* 10**-3`
fn exponent(input: &str) -> IResult<&str, i32> {
    alt((
        preceded(one_of("eE"), int32),
        preceded(
            (
                alt((tag("×"), tag("*"), tag("x"))),
                ws,
                tag("10"),
                ws,
                alt((tag("^"), tag("**"))),
                ws,
            ),
            int32,
        ),
    ))
    .parse(input)
}

fn scaled(input: &str) -> IResult<&str, (f64, Vec<Term>, i32)> {
    let (input, (central, terms)) =
        delimited(pair(char('('), ws), body, pair(ws, char(')'))).parse(input)?;
    let (input, exp) = opt(preceded(ws, exponent)).parse(input)?;
    Ok((input, (central, terms, exp.unwrap_or(0))))
}

fn value_spec(input: &str) -> IResult<&str, (f64, Vec<Term>, i32)> {
    alt((scaled, map(body, |(central, terms)| (central, terms, 0)))).parse(input)
}
