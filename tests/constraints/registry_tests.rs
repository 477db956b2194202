use approx::assert_relative_eq;
use flavor_constraints::distributions::{MultivariateNormalDistribution, NormalDistribution};
use flavor_constraints::{ErrorSpec, FlavorError, OneSigmaError};
use ndarray::arr2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::test_helpers::declared;

fn joint() -> MultivariateNormalDistribution {
    MultivariateNormalDistribution::new(vec![1.0, 2.0], arr2(&[[0.01, 0.018], [0.018, 0.04]]))
        .unwrap()
}

#[test]
fn test_symmetric_spec_round_trips_exactly() {
    let mut constraints = declared(&["p"]);
    for (central, error) in [(5.0, 0.1), (-0.3, 0.02), (1.2e-3, 4.0e-5), (173.0, 0.4)] {
        constraints
            .set_constraint("p", &format!("{} ± {}", central, error))
            .unwrap();
        assert_eq!(constraints.get_central_value("p").unwrap(), central);
        assert_eq!(
            constraints.get_1d_error("p").unwrap(),
            OneSigmaError::Symmetric(error)
        );
    }
}

#[test]
fn test_conflict_rejection_and_overwrite() {
    let mut constraints = declared(&["a", "b", "c"]);
    constraints.add_constraint(&["a", "b"], joint()).unwrap();

    // Conflict rejection: nothing changes
    let normal = NormalDistribution::new(0.0, 1.0).unwrap();
    assert!(matches!(
        constraints.add_constraint(&["b"], normal),
        Err(FlavorError::AlreadyConstrained(_))
    ));
    assert_eq!(constraints.get_central_value("b").unwrap(), 2.0);

    // Overwrite: the joint group is dropped as a whole
    let removed = constraints.upsert_constraint(&["b", "c"], joint()).unwrap();
    assert_eq!(removed.len(), 1);
    assert!(!constraints.is_constrained("a"));
    assert_eq!(constraints.get_central_value("b").unwrap(), 1.0);
    assert_eq!(constraints.get_central_value("c").unwrap(), 2.0);
}

#[test]
fn test_remove_joint_group_removes_all_members() {
    let mut constraints = declared(&["a", "b", "c"]);
    constraints.add_constraint(&["a", "b"], joint()).unwrap();
    constraints.set_constraint("c", "3.0 ± 0.3").unwrap();

    constraints.remove_constraint("a").unwrap();
    for name in ["a", "b"] {
        assert!(matches!(
            constraints.get_central_value(name),
            Err(FlavorError::NotFound(_))
        ));
    }
    assert_eq!(constraints.get_central_value("c").unwrap(), 3.0);
    assert_eq!(constraints.constrained_parameters(), vec!["c"]);

    // Parameters stay registered
    assert!(constraints.parameters().contains("a"));
}

#[test]
fn test_set_constraint_from_error_spec() {
    let mut constraints = declared(&["x"]);
    let spec: ErrorSpec = "1.0 ± 0.3 ± 0.4".parse().unwrap();
    constraints.set_constraint_spec("x", &spec).unwrap();

    // Several symmetric terms combine in quadrature
    assert_relative_eq!(
        constraints.get_1d_error("x").unwrap().upper(),
        0.5,
        epsilon = 1e-15
    );
}

#[test]
fn test_get_random_is_reproducible_per_rng() {
    let mut constraints = declared(&["a", "b", "c"]);
    constraints.add_constraint(&["a", "b"], joint()).unwrap();
    constraints.set_constraint("c", "0.1").unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let first = constraints.get_random(&mut rng);
    let second = constraints.get_random(&mut rng);
    assert_ne!(first["a"], second["a"]);
    // Exact values are always returned as is
    assert_eq!(first["c"], 0.1);

    let mut rng = ChaCha8Rng::seed_from_u64(11);
    assert_eq!(constraints.get_random(&mut rng), first);
}

#[test]
fn test_batch_sampling_correlation() {
    let mut constraints = declared(&["a", "b"]);
    constraints.add_constraint(&["a", "b"], joint()).unwrap();

    let batch = constraints.sample_batch(50_000, 5);
    let samples: Vec<Vec<f64>> = batch.iter().map(|d| vec![d["a"], d["b"]]).collect();
    assert_relative_eq!(
        crate::test_helpers::correlation(&samples, 0, 1),
        0.9,
        epsilon = 0.01
    );
}

#[test]
fn test_log_probability_of_joint_group() {
    let mut constraints = declared(&["a", "b"]);
    let dist = joint();
    let expected = dist.log_density(&[1.1, 1.9]).unwrap();
    constraints.add_constraint(&["a", "b"], dist).unwrap();

    let values = [("a".to_string(), 1.1), ("b".to_string(), 1.9)]
        .into_iter()
        .collect();
    assert_relative_eq!(
        constraints.log_probability(&values).unwrap(),
        expected,
        epsilon = 1e-14
    );
}
