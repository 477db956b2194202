use approx::assert_relative_eq;
use flavor_constraints::loaders::{
    read_metadata_str, read_values_correlated_str, read_values_str, ValueSpec,
};
use flavor_constraints::{FlavorError, LoaderConfig, OneSigmaError, ParameterConstraints};

use crate::test_helpers::declared;

#[test]
fn test_value_spec_forms() {
    let number: ValueSpec = serde_yaml::from_str("0.5").unwrap();
    assert_eq!(number, ValueSpec::Number(0.5));

    let text: ValueSpec = serde_yaml::from_str("0.5 ± 0.1").unwrap();
    assert_eq!(text.to_distribution().unwrap().kind(), "normal");

    let record: ValueSpec =
        serde_yaml::from_str("{distribution: delta, central_value: 0.5}").unwrap();
    assert_eq!(record.to_distribution().unwrap().kind(), "delta");
    assert!(matches!(
        record.to_error_spec(),
        Err(FlavorError::Validation(_))
    ));
}

#[test]
fn test_values_need_declared_parameters() {
    let mut constraints = ParameterConstraints::new();
    assert!(matches!(
        read_values_str("m_x: 5.0 ± 0.1", &mut constraints),
        Err(FlavorError::NotFound(_))
    ));
}

#[test]
fn test_metadata_then_values() {
    let mut constraints = ParameterConstraints::new();
    read_metadata_str(
        "
Vus:
  description: CKM element
  tex: $|V_{us}|$
Vcb:
  tex: $|V_{cb}|$
",
        &mut constraints,
    )
    .unwrap();
    read_values_str("Vus: 0.2243 ± 0.0005\nVcb: 0.0422 ± 0.0008 ± 0.0006", &mut constraints)
        .unwrap();

    assert_eq!(
        constraints.get_1d_error("Vus").unwrap(),
        OneSigmaError::Symmetric(0.0005)
    );
    assert_relative_eq!(
        constraints.get_1d_error("Vcb").unwrap().upper(),
        0.001,
        epsilon = 1e-15
    );
}

#[test]
fn test_correlated_matrix_forms_agree() {
    let forms = [
        "0.4",
        "[[1.0, 0.4, 0.4], [0.4, 1.0, 0.4], [0.4, 0.4, 1.0]]",
        "[[1.0, 0.4, 0.4], [1.0, 0.4], [1.0]]",
        "[[1.0], [0.4, 1.0], [0.4, 0.4, 1.0]]",
    ];
    let mut documents = Vec::new();
    for correlation in forms {
        let mut constraints = declared(&["x", "y", "z"]);
        let yaml = format!(
            "- values: [{{x: 1.0 ± 0.1}}, {{y: 2.0 ± 0.2}}, {{z: 3.0 ± 0.3}}]\n  correlation: {}\n",
            correlation
        );
        read_values_correlated_str(&yaml, &mut constraints, &LoaderConfig::default()).unwrap();
        documents.push(constraints.get_yaml_dict());
    }
    for document in &documents[1..] {
        assert_eq!(document, &documents[0]);
    }
}

#[test]
fn test_damping_factor_is_configurable() {
    let yaml = "- values: [{a: 1.0 ± 1.0}, {b: 1.0 ± 1.0}]\n  correlation: 1.04\n";

    // One 1% pass is not enough
    let mut constraints = declared(&["a", "b"]);
    assert!(matches!(
        read_values_correlated_str(yaml, &mut constraints, &LoaderConfig::default()),
        Err(FlavorError::DataIntegrity(_))
    ));

    // A stronger damping repairs it
    let config = LoaderConfig {
        correlation_damping: 0.9,
        ..LoaderConfig::default()
    };
    read_values_correlated_str(yaml, &mut constraints, &config).unwrap();
    let constraint = constraints.constraint_for("a").unwrap();
    match constraint.distribution() {
        flavor_constraints::ProbabilityDistribution::MultivariateNormal(mvn) => {
            assert_relative_eq!(mvn.covariance()[[0, 1]], 0.9 * 1.04, epsilon = 1e-12);
        }
        other => panic!("unexpected distribution {:?}", other),
    }
}
