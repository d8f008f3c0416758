// demos/demo.rs
use fdm_pricer::analytics::bs_analytic;
use fdm_pricer::fdm::{BumpSizes, FdmConfig, FdmEngine, GreeksSelection, MarchMode, Payoff};
use fdm_pricer::math_utils::Timer;
use fdm_pricer::mesh::{LogSpaceBoundaries, MaturityBoundaries};
use fdm_pricer::models::{BlackScholes, ConstantModel, FlatRate, Instrument};
use tracing_subscriber::EnvFilter;

fn bs_engine(payoff: Payoff, r: f64, config: FdmConfig) -> FdmEngine {
    FdmEngine::new(
        Box::new(BlackScholes),
        Box::new(FlatRate::new(r)),
        Box::new(payoff),
        Box::new(LogSpaceBoundaries::default()),
        Box::new(MaturityBoundaries),
        config,
    )
    .expect("Valid configuration")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("Running fdm-pricer Finite-Difference Demo\n");

    let s0 = 100.0;
    let k = 100.0;
    let r = 0.05;
    let sigma = 0.2;
    let t = 1.0;
    let inst = Instrument::new(s0, sigma, t, r).expect("Valid instrument");

    println!("--- Vanilla prices (Crank–Nicolson, dx = dt = 0.01) ---");
    let vanillas = [
        ("European call", Payoff::EuropeanCall { k }, bs_analytic::bs_call_price(s0, k, r, sigma, t)),
        ("European put", Payoff::EuropeanPut { k }, bs_analytic::bs_put_price(s0, k, r, sigma, t)),
    ];
    for (name, payoff, analytic) in vanillas {
        let mut timer = Timer::new();
        timer.start();
        let price = bs_engine(payoff, r, FdmConfig::default())
            .price(&inst)
            .expect("Stable march");
        println!(
            "{:<14} FDM: {:.6}  Analytic: {:.6}  Error: {:.2e}  ({:.2} ms)",
            name,
            price,
            analytic,
            (price - analytic).abs(),
            timer.elapsed_ms()
        );
    }

    println!("\n--- Theta schemes ---");
    for (name, theta, dx, dt) in [
        ("explicit", 0.0, 0.02, 0.005),
        ("crank-nicolson", 0.5, 0.01, 0.01),
        ("implicit", 1.0, 0.01, 0.01),
    ] {
        let config = FdmConfig {
            theta,
            dx,
            dt,
            ..Default::default()
        };
        let price = bs_engine(Payoff::EuropeanCall { k }, r, config)
            .price(&inst)
            .expect("Stable march");
        println!("{:<15} theta = {:.1}: {:.6}", name, theta, price);
    }

    println!("\n--- Heat equation ---");
    let heat = FdmEngine::new(
        Box::new(ConstantModel::heat(sigma)),
        Box::new(FlatRate::new(0.0)),
        Box::new(Payoff::EuropeanCall { k }),
        Box::new(LogSpaceBoundaries::default()),
        Box::new(MaturityBoundaries),
        FdmConfig::default(),
    )
    .expect("Valid configuration");
    let zero_rate = Instrument::new(s0, sigma, t, 0.0).expect("Valid instrument");
    let forward = s0 * (0.5 * sigma * sigma * t).exp();
    println!(
        "FDM: {:.6}  Closed form: {:.6}",
        heat.price(&zero_rate).expect("Stable march"),
        bs_analytic::black_call_price(forward, k, sigma, t)
    );

    println!("\n--- Greeks (fixed-width mesh, unit spot bump) ---");
    let greeks_engine = FdmEngine::new(
        Box::new(BlackScholes),
        Box::new(FlatRate::new(r)),
        Box::new(Payoff::EuropeanCall { k }),
        Box::new(LogSpaceBoundaries::fixed(1.0)),
        Box::new(MaturityBoundaries),
        FdmConfig {
            bumps: BumpSizes {
                spot: 1.0,
                ..Default::default()
            },
            ..Default::default()
        },
    )
    .expect("Valid configuration");
    let greeks = greeks_engine
        .sensitivities(&inst, GreeksSelection::ALL)
        .expect("Stable re-pricing");
    println!("Price: {:.6}", greeks.price);
    if let Some(delta) = greeks.delta {
        println!("Delta: {:.6}  (analytic {:.6})", delta, bs_analytic::bs_call_delta(s0, k, r, sigma, t));
    }
    if let Some(gamma) = greeks.gamma {
        println!("Gamma: {:.6}  (analytic {:.6})", gamma, bs_analytic::bs_gamma(s0, k, r, sigma, t));
    }
    if let Some(theta) = greeks.theta {
        println!("Theta: {:.6}  (analytic {:.6})", theta, -bs_analytic::bs_call_theta(s0, k, r, sigma, t));
    }
    if let Some(vega) = greeks.vega {
        println!("Vega:  {:.6}  (analytic {:.6})", vega, bs_analytic::bs_vega(s0, k, r, sigma, t));
    }

    println!("\n--- Legacy mode (uniform seeding) ---");
    let legacy = bs_engine(
        Payoff::EuropeanPut { k },
        r,
        FdmConfig {
            mode: MarchMode::Legacy,
            ..Default::default()
        },
    );
    let otm = inst.with_spot(90.0).expect("Valid instrument");
    println!(
        "Put at S = 90: {:.6}  (standard mode {:.6})",
        legacy.price(&otm).expect("Stable march"),
        bs_engine(Payoff::EuropeanPut { k }, r, FdmConfig::default())
            .price(&otm)
            .expect("Stable march")
    );
}
