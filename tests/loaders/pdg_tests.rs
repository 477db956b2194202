use approx::assert_relative_eq;
use flavor_constraints::loaders::pdg::{parse_pdg_table, Measurement};
use flavor_constraints::loaders::{load_pdg, pdg_particle_tex};
use flavor_constraints::{FlavorError, OneSigmaError, PdgConfig};

use crate::test_helpers::{declared, pdg_line};

fn table() -> String {
    [
        "*  MASSES, WIDTHS, AND MC ID NUMBERS".to_string(),
        pdg_line(
            "321",
            ["4.93677E-01", "+1.6E-05", "-1.6E-05"],
            ["5.317E-17", "+9.0E-20", "-9.0E-20"],
            "K              +",
        ),
        pdg_line(
            "311",
            ["4.97611E-01", "+1.3E-05", "-1.3E-05"],
            ["", "", ""],
            "K              0",
        ),
        pdg_line(
            "531",
            ["5.36689E+00", "+1.9E-04", "-1.9E-04"],
            ["4.35E-13", "+1.0E-13", "-5.0E-14"],
            "B(s)           0",
        ),
        pdg_line(
            "25",
            ["1.2509E+02", "+2.4E-01", "-2.4E-01"],
            ["", "", ""],
            "H              0",
        ),
    ]
    .join("\n")
}

#[test]
fn test_multiplets_are_keyed_by_charge() {
    let particles = parse_pdg_table(&table()).unwrap();
    let keys: Vec<&str> = particles.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["B(s)", "H", "K+", "K0"]);
    assert_eq!(particles["K0"].charge, "0");
    assert!(particles["K0"].width.is_none());
}

#[test]
fn test_lifetime_derivation() {
    let lifetime = Measurement {
        central: 1.0,
        right: 0.1,
        left: 0.05,
    }
    .inverse();
    assert_relative_eq!(lifetime.central, 1.0);
    assert_relative_eq!(lifetime.right, 0.05, epsilon = 1e-15);
    assert_relative_eq!(lifetime.left, 0.1, epsilon = 1e-15);
}

#[test]
fn test_translated_names_and_lifetimes() {
    let config = PdgConfig::default().with_include(&["B(s)", "K+", "K0", "H"]);
    let mut constraints = declared(&["m_Bs"]);
    constraints.set_constraint("m_Bs", "5.0 ± 1.0").unwrap();

    load_pdg(&table(), &mut constraints, &config).unwrap();

    assert_eq!(constraints.get_central_value("m_Bs").unwrap(), 5.36689);
    assert_eq!(constraints.get_central_value("m_h").unwrap(), 125.09);
    assert!(!constraints.parameters().contains("tau_K0"));
    assert!(!constraints.parameters().contains("tau_h"));

    // The width's upper error becomes the lifetime's lower error
    let gamma: f64 = 4.35E-13;
    match constraints.get_1d_error("tau_Bs").unwrap() {
        OneSigmaError::Asymmetric { upper, lower } => {
            assert_relative_eq!(upper, 5.0E-14 / (gamma * gamma), max_relative = 1e-12);
            assert_relative_eq!(lower, 1.0E-13 / (gamma * gamma), max_relative = 1e-12);
        }
        other => panic!("expected asymmetric errors, got {:?}", other),
    }

    let m_bs = constraints.parameters().lookup("m_Bs").unwrap();
    assert_eq!(m_bs.tex(), Some("$m_{B_{s}}$"));
    assert_eq!(m_bs.description(), Some("$B_{s}$ mass"));
    assert_eq!(
        constraints.parameters().lookup("tau_Bs").unwrap().description(),
        Some("$B_{s}$ lifetime")
    );
}

#[test]
fn test_custom_prefixes() {
    let config = PdgConfig {
        mass_prefix: "mass_".to_string(),
        lifetime_prefix: "lifetime_".to_string(),
        ..PdgConfig::default().with_include(&["K+"])
    };
    let mut constraints = declared(&[]);
    load_pdg(&table(), &mut constraints, &config).unwrap();
    assert!(constraints.is_constrained("mass_K+"));
    assert!(constraints.is_constrained("lifetime_K+"));
}

#[test]
fn test_charge_count_mismatch() {
    let line = pdg_line(
        "321  311",
        ["4.93677E-01", "+1.6E-05", "-1.6E-05"],
        ["", "", ""],
        "K              +",
    );
    let mut constraints = declared(&[]);
    assert!(matches!(
        load_pdg(&line, &mut constraints, &PdgConfig::default()),
        Err(FlavorError::DataIntegrity(_))
    ));
}

#[test]
fn test_tex_rendering() {
    assert_eq!(pdg_particle_tex("K*(892)0"), "K^{*0}");
    assert_eq!(pdg_particle_tex("rho(770)+"), r"\rho^{+}");
    assert_eq!(pdg_particle_tex("Lambda(c)"), r"\Lambda_{c}");
    assert_eq!(pdg_particle_tex("D(s)*"), "D^{*}_{s}");
    assert_eq!(pdg_particle_tex("mu"), r"\mu");
}
