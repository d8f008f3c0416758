// demos/error_handling_demo.rs
use fdm_pricer::error::FdmError;
use fdm_pricer::fdm::{FdmConfig, FdmEngine, Payoff};
use fdm_pricer::mesh::{LogSpaceBoundaries, MaturityBoundaries};
use fdm_pricer::models::{BlackScholes, ConstantModel, FlatRate, Instrument, PdeCoefficients, PdeModel};
use fdm_pricer::FdmResult;
use tracing_subscriber::EnvFilter;

struct UnquotedSurface;

impl PdeModel for UnquotedSurface {
    fn bind(&self, instrument: &Instrument) -> FdmResult<Box<dyn PdeCoefficients>> {
        Err(FdmError::ProviderError {
            provider: "vol surface".to_string(),
            reason: format!("no quotes for maturity {}", instrument.maturity()),
        })
    }
}

fn report<T: std::fmt::Debug>(result: FdmResult<T>) {
    match result {
        Ok(value) => println!("   Unexpected: Should have failed! Got {:?}", value),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("Error Handling Demo for fdm-pricer");
    println!("==================================\n");

    println!("1. Testing invalid instrument...");
    report(Instrument::new(-100.0, 0.2, 1.0, 0.05));

    println!("\n2. Testing theta outside [0, 1]...");
    let config = FdmConfig {
        theta: 1.5,
        ..Default::default()
    };
    report(config.validate());

    println!("\n3. Testing a zero space step...");
    let zero_step = FdmEngine::new(
        Box::new(BlackScholes),
        Box::new(FlatRate::new(0.05)),
        Box::new(Payoff::EuropeanCall { k: 100.0 }),
        Box::new(LogSpaceBoundaries::fixed(0.5)),
        Box::new(MaturityBoundaries),
        FdmConfig {
            dx: 0.0,
            ..Default::default()
        },
    );
    match zero_step {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    println!("\n4. Testing a zero pivot in the implicit system...");
    let singular = FdmEngine::new(
        Box::new(ConstantModel::new(0.25, 0.0)),
        Box::new(FlatRate::new(0.0)),
        Box::new(|_: f64| 1.0),
        Box::new(LogSpaceBoundaries::fixed(1.0)),
        Box::new(MaturityBoundaries),
        FdmConfig {
            dx: 0.5,
            dt: 0.5,
            theta: 1.0,
            ..Default::default()
        },
    )
    .expect("Valid configuration");
    let inst = Instrument::new(100.0, 0.2, 1.0, 0.0).expect("Valid instrument");
    report(singular.price(&inst));

    println!("\n5. Testing a failing coefficient provider...");
    let failing = FdmEngine::new(
        Box::new(UnquotedSurface),
        Box::new(FlatRate::new(0.05)),
        Box::new(Payoff::EuropeanPut { k: 100.0 }),
        Box::new(LogSpaceBoundaries::default()),
        Box::new(MaturityBoundaries),
        FdmConfig::default(),
    )
    .expect("Valid configuration");
    report(failing.vega(&inst));

    println!("\n6. Testing an explicit scheme beyond its stability bound (see the warning)...");
    let explicit = FdmEngine::new(
        Box::new(BlackScholes),
        Box::new(FlatRate::new(0.05)),
        Box::new(Payoff::EuropeanCall { k: 100.0 }),
        Box::new(LogSpaceBoundaries::default()),
        Box::new(MaturityBoundaries),
        FdmConfig {
            theta: 0.0,
            ..Default::default()
        },
    )
    .expect("Valid configuration");
    let inst = Instrument::new(100.0, 0.2, 1.0, 0.05).expect("Valid instrument");
    match explicit.price(&inst) {
        Ok(price) => println!("   Price {:.4e} is meaningless", price),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    println!("\nError handling demo completed!");
}
