use approx::assert_relative_eq;
use flavor_constraints::distributions::covariance::{
    covariance_from_correlation, is_positive_definite, repaired_covariance,
};
use flavor_constraints::distributions::{CorrelationSpec, MultivariateNormalDistribution};
use flavor_constraints::FlavorError;
use ndarray::arr2;

#[test]
fn test_two_parameter_covariance() {
    let correl = CorrelationSpec::Uniform(0.9).to_matrix(2).unwrap();
    let covar = covariance_from_correlation(&[0.1, 0.2], &correl).unwrap();

    let expected = arr2(&[[0.01, 0.018], [0.018, 0.04]]);
    for i in 0..2 {
        for j in 0..2 {
            assert_relative_eq!(covar[[i, j]], expected[[i, j]], epsilon = 1e-15);
        }
    }
}

#[test]
fn test_construction_iff_positive_definite_after_one_damping() {
    crate::test_helpers::init_logging();
    let errors = [1.0, 1.0, 1.0];
    let cases = [
        // valid as given
        (0.5, true),
        // slightly over-correlated, fixed by one damping pass
        (1.005, true),
        // beyond what one 1% damping pass can repair
        (1.2, false),
    ];
    for (rho, ok) in cases {
        let correl = CorrelationSpec::Uniform(rho).to_matrix(3).unwrap();
        let result = repaired_covariance(&errors, &correl, 0.99);
        assert_eq!(result.is_ok(), ok, "rho = {}", rho);
        match result {
            Ok(covar) => {
                assert!(is_positive_definite(&covar));
                assert!(MultivariateNormalDistribution::new(vec![0.0; 3], covar).is_ok());
            }
            Err(e) => assert!(matches!(e, FlavorError::DataIntegrity(_))),
        }
    }
}

#[test]
fn test_shape_mismatch() {
    let correl = CorrelationSpec::Uniform(0.1).to_matrix(3).unwrap();
    assert!(matches!(
        covariance_from_correlation(&[0.1, 0.2], &correl),
        Err(FlavorError::DimensionMismatch(_))
    ));
}
