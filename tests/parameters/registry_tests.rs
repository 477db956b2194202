use flavor_constraints::parameters::ParameterRegistry;
use flavor_constraints::{FlavorError, ParameterConstraints};

#[test]
fn test_registry_serialization() {
    let mut registry = ParameterRegistry::new();
    registry
        .declare("m_Bs")
        .set_description("Bs mass")
        .set_tex("$m_{B_s}$");
    registry.declare("alpha_s");

    let json = serde_json::to_string(&registry).unwrap();
    let restored: ParameterRegistry = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, registry);
    assert_eq!(restored.names(), vec!["alpha_s", "m_Bs"]);
}

#[test]
fn test_registry_inside_constraints() {
    let mut registry = ParameterRegistry::new();
    registry.declare("f_Bs").set_description("Bs decay constant");

    let mut constraints = ParameterConstraints::with_parameters(registry);
    constraints.set_constraint("f_Bs", "0.2303 ± 0.0013").unwrap();

    assert_eq!(
        constraints.parameters().lookup("f_Bs").unwrap().description(),
        Some("Bs decay constant")
    );

    // Parameters may exist without a constraint
    constraints.parameters_mut().declare("Vub");
    assert!(matches!(
        constraints.get_central_value("Vub"),
        Err(FlavorError::NotFound(_))
    ));
}

#[test]
fn test_remove_parameter() {
    let mut registry = ParameterRegistry::new();
    registry.declare("a");
    assert!(registry.remove("a").is_some());
    assert!(registry.remove("a").is_none());
    assert!(matches!(registry.lookup("a"), Err(FlavorError::NotFound(_))));
}
