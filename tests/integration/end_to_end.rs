//! Loading metadata, values, correlated values and the PDG table in order,
//! then sampling and persisting the result.

use approx::assert_relative_eq;
use flavor_constraints::loaders::{
    load_pdg, read_file, read_metadata_str, read_values_correlated_str, read_values_str,
    write_file,
};
use flavor_constraints::{LoaderConfig, OneSigmaError, ParameterConstraints};
use std::sync::Arc;

use crate::test_helpers::{correlation, init_logging, pdg_line};

const METADATA: &str = r#"
m_B0:
  description: $B^0$ mass
tau_B0:
  description: $B^0$ lifetime
f_Bs:
  description: $B_s$ decay constant
a0_B->K:
a1_B->K:
"#;

const VALUES: &str = r#"
m_B0: 5.2 ± 0.1
f_Bs: 0.2303 ± 0.0013
"#;

const CORRELATED: &str = r#"
- values:
    - a0_B->K: 0.33 ± 0.03
    - a1_B->K: -0.9 ± 0.2 +0.1 -0.1
  correlation: 0.5
"#;

fn pdg_table() -> String {
    [
        pdg_line(
            "521",
            ["5.27932E+00", "+1.4E-04", "-1.4E-04"],
            ["4.018E-13", "+1.0E-15", "-1.0E-15"],
            "B              +",
        ),
        pdg_line(
            "511",
            ["5.27963E+00", "+1.5E-04", "-1.5E-04"],
            ["4.333E-13", "+1.1E-15", "-1.1E-15"],
            "B              0",
        ),
    ]
    .join("\n")
}

fn load_all() -> ParameterConstraints {
    init_logging();
    let config = LoaderConfig::default();
    let mut constraints = ParameterConstraints::new();
    read_metadata_str(METADATA, &mut constraints).unwrap();
    read_values_str(VALUES, &mut constraints).unwrap();
    read_values_correlated_str(CORRELATED, &mut constraints, &config).unwrap();
    load_pdg(
        &pdg_table(),
        &mut constraints,
        &config.pdg.clone().with_include(&["B0"]),
    )
    .unwrap();
    constraints
}

#[test]
fn test_json_metadata_and_values() {
    let mut constraints = ParameterConstraints::new();
    read_metadata_str(r#"{"m_x": {"description": "test mass"}}"#, &mut constraints).unwrap();
    read_values_str(r#"{"m_x": "5.0 ± 0.1"}"#, &mut constraints).unwrap();

    assert_eq!(constraints.get_central_value("m_x").unwrap(), 5.0);
    assert_eq!(
        constraints.get_1d_error("m_x").unwrap(),
        OneSigmaError::Symmetric(0.1)
    );
    assert_eq!(
        constraints.parameters().lookup("m_x").unwrap().description(),
        Some("test mass")
    );
}

#[test]
fn test_full_loading_sequence() {
    let constraints = load_all();

    // The PDG mass replaces the value from the values document
    assert_eq!(constraints.get_central_value("m_B0").unwrap(), 5.27963);
    assert_relative_eq!(
        constraints.get_central_value("tau_B0").unwrap(),
        1.0 / 4.333E-13,
        max_relative = 1e-12
    );
    // Metadata is overwritten by the PDG loader as well
    assert_eq!(
        constraints.parameters().lookup("m_B0").unwrap().description(),
        Some("$B^{0}$ mass")
    );

    // sqrt(0.2^2 + 0.1 * 0.1)
    let a1 = constraints.get_1d_error("a1_B->K").unwrap();
    assert_relative_eq!(a1.upper(), 0.05f64.sqrt(), epsilon = 1e-15);
    assert_eq!(constraints.len(), 4);
}

#[test]
fn test_shared_read_only_sampling() {
    let constraints = Arc::new(load_all());

    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            let constraints = Arc::clone(&constraints);
            std::thread::spawn(move || constraints.sample_batch(5_000, seed))
        })
        .collect();
    let batches: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(batches[1], constraints.sample_batch(5_000, 1));

    let samples: Vec<Vec<f64>> = batches
        .iter()
        .flatten()
        .map(|draw| vec![draw["a0_B->K"], draw["a1_B->K"]])
        .collect();
    assert_relative_eq!(correlation(&samples, 0, 1), 0.5, epsilon = 0.03);

    for draw in batches.iter().flatten() {
        assert!(constraints.log_probability(draw).unwrap().is_finite());
    }
}

#[test]
fn test_write_and_read_file() {
    let constraints = load_all();
    let path = std::env::temp_dir().join(format!(
        "flavor_constraints_end_to_end_{}.yml",
        std::process::id()
    ));

    write_file(&path, &constraints).unwrap();
    let restored = read_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(restored.get_central_all(), constraints.get_central_all());
    assert_eq!(restored.get_1d_errors(), constraints.get_1d_errors());
    assert_eq!(restored.len(), constraints.len());
}
