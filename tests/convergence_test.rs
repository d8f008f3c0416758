// tests/convergence_test.rs
use fdm_pricer::analytics::bs_analytic;
use fdm_pricer::fdm::{FdmConfig, FdmEngine, Payoff};
use fdm_pricer::mesh::{LogSpaceBoundaries, MaturityBoundaries};
use fdm_pricer::models::{BlackScholes, ConstantModel, FlatRate, Instrument, PdeModel};

fn engine(model: Box<dyn PdeModel>, payoff: Payoff, r: f64, config: FdmConfig) -> FdmEngine {
    FdmEngine::new(
        model,
        Box::new(FlatRate::new(r)),
        Box::new(payoff),
        Box::new(LogSpaceBoundaries::default()),
        Box::new(MaturityBoundaries),
        config,
    )
    .expect("Valid configuration")
}

fn mesh_config(dx: f64, dt: f64, theta: f64) -> FdmConfig {
    FdmConfig {
        dx,
        dt,
        theta,
        ..Default::default()
    }
}

#[test]
fn test_crank_nicolson_call_vs_analytic() {
    let (s0, k, r, sigma, t) = (100.0, 100.0, 0.05, 0.2, 1.0);
    let inst = Instrument::new(s0, sigma, t, r).unwrap();

    let fdm_price = engine(
        Box::new(BlackScholes),
        Payoff::EuropeanCall { k },
        r,
        FdmConfig::default(),
    )
    .price(&inst)
    .unwrap();
    let analytic_price = bs_analytic::bs_call_price(s0, k, r, sigma, t);

    let rel_error = (fdm_price - analytic_price).abs() / analytic_price;
    println!("\nFDM call: {}  analytic: {}  rel error: {}", fdm_price, analytic_price, rel_error);
    assert!(rel_error < 0.005, "Relative error for CN call exceeds 0.5%: {}", rel_error);
}

#[test]
fn test_crank_nicolson_put_vs_analytic() {
    let (s0, k, r, sigma, t) = (100.0, 100.0, 0.05, 0.2, 1.0);
    let inst = Instrument::new(s0, sigma, t, r).unwrap();

    let fdm_price = engine(
        Box::new(BlackScholes),
        Payoff::EuropeanPut { k },
        r,
        FdmConfig::default(),
    )
    .price(&inst)
    .unwrap();
    let analytic_price = bs_analytic::bs_put_price(s0, k, r, sigma, t);

    let rel_error = (fdm_price - analytic_price).abs() / analytic_price;
    println!("\nFDM put: {}  analytic: {}  rel error: {}", fdm_price, analytic_price, rel_error);
    assert!(rel_error < 0.005, "Relative error for CN put exceeds 0.5%: {}", rel_error);
}

#[test]
fn test_heat_equation_vs_closed_form() {
    let (s0, k, sigma, t) = (100.0, 100.0, 0.2, 1.0);
    let inst = Instrument::new(s0, sigma, t, 0.0).unwrap();

    let fdm_price = engine(
        Box::new(ConstantModel::heat(sigma)),
        Payoff::EuropeanCall { k },
        0.0,
        FdmConfig::default(),
    )
    .price(&inst)
    .unwrap();
    let forward = s0 * (0.5 * sigma * sigma * t).exp();
    let closed_form = bs_analytic::black_call_price(forward, k, sigma, t);

    let rel_error = (fdm_price - closed_form).abs() / closed_form;
    println!("\nFDM heat: {}  closed form: {}  rel error: {}", fdm_price, closed_form, rel_error);
    assert!(rel_error < 0.005, "Relative error for heat equation exceeds 0.5%: {}", rel_error);
}

#[test]
fn test_all_theta_schemes_converge() {
    let (s0, k, r, sigma, t) = (100.0, 100.0, 0.05, 0.2, 1.0);
    let inst = Instrument::new(s0, sigma, t, r).unwrap();
    let analytic_price = bs_analytic::bs_call_price(s0, k, r, sigma, t);

    // explicit steps keep dt·σ²/dx² below one
    let schemes = [
        ("explicit", mesh_config(0.02, 0.005, 0.0)),
        ("crank-nicolson", mesh_config(0.01, 0.01, 0.5)),
        ("implicit", mesh_config(0.01, 0.01, 1.0)),
    ];

    for (name, config) in schemes {
        let fdm_price = engine(Box::new(BlackScholes), Payoff::EuropeanCall { k }, r, config)
            .price(&inst)
            .unwrap();
        let rel_error = (fdm_price - analytic_price).abs() / analytic_price;
        println!("{:>15}: {:.6}  rel error: {:.2e}", name, fdm_price, rel_error);
        assert!(rel_error < 0.01, "{} scheme error exceeds 1%: {}", name, rel_error);
    }
}

#[test]
fn test_error_decreases_with_mesh_refinement() {
    let (s0, k, r, sigma, t) = (100.0, 100.0, 0.05, 0.2, 1.0);
    let inst = Instrument::new(s0, sigma, t, r).unwrap();
    let analytic_price = bs_analytic::bs_put_price(s0, k, r, sigma, t);

    let errors: Vec<f64> = [0.04, 0.01]
        .iter()
        .map(|&h| {
            let price = engine(
                Box::new(BlackScholes),
                Payoff::EuropeanPut { k },
                r,
                mesh_config(h, h, 0.5),
            )
            .price(&inst)
            .unwrap();
            (price - analytic_price).abs()
        })
        .collect();

    println!("\nCoarse error: {}  fine error: {}", errors[0], errors[1]);
    assert!(errors[1] < errors[0], "Refinement did not reduce the error: {:?}", errors);
}

#[test]
fn test_digital_call_vs_analytic() {
    let (s0, k, r, sigma, t) = (100.0, 100.0, 0.05, 0.2, 1.0);
    let inst = Instrument::new(s0, sigma, t, r).unwrap();

    let fdm_price = engine(
        Box::new(BlackScholes),
        Payoff::DigitalCall { k, cash: 1.0 },
        r,
        mesh_config(0.005, 0.005, 1.0),
    )
    .price(&inst)
    .unwrap();

    let d2 = ((s0 / k).ln() + (r - 0.5 * sigma * sigma) * t) / (sigma * t.sqrt());
    let analytic_price = (-r * t).exp() * fdm_pricer::math_utils::norm_cdf(d2);

    let abs_error = (fdm_price - analytic_price).abs();
    println!("\nFDM digital: {}  analytic: {}  abs error: {}", fdm_price, analytic_price, abs_error);
    assert!(abs_error < 0.02, "Digital call error exceeds 0.02: {}", abs_error);
}
