// tests/integration_test.rs
use fdm_pricer::error::FdmError;
use fdm_pricer::fdm::{FdmConfig, FdmEngine, MarchMode, Payoff, TerminalPayoff};
use fdm_pricer::mesh::{LogSpaceBoundaries, MaturityBoundaries, SpaceBoundaries, TimeBoundaries};
use fdm_pricer::models::{
    BlackScholes, ConstantModel, FlatRate, Instrument, PdeCoefficients, PdeModel,
};
use fdm_pricer::FdmResult;

fn engine(
    model: Box<dyn PdeModel>,
    payoff: Box<dyn TerminalPayoff>,
    space: Box<dyn SpaceBoundaries>,
    r: f64,
    config: FdmConfig,
) -> FdmResult<FdmEngine> {
    FdmEngine::new(
        model,
        Box::new(FlatRate::new(r)),
        payoff,
        space,
        Box::new(MaturityBoundaries),
        config,
    )
}

fn bs_call_engine(config: FdmConfig) -> FdmEngine {
    engine(
        Box::new(BlackScholes),
        Box::new(Payoff::EuropeanCall { k: 100.0 }),
        Box::new(LogSpaceBoundaries::default()),
        0.05,
        config,
    )
    .expect("Valid configuration")
}

fn instrument() -> Instrument {
    Instrument::new(100.0, 0.2, 1.0, 0.05).unwrap()
}

/// Space mesh that always reports a single interval
struct DegenerateSpace;

impl SpaceBoundaries for DegenerateSpace {
    fn space_mesh(&self, _dx: f64, _instrument: &Instrument) -> FdmResult<usize> {
        Ok(1)
    }

    fn upper_boundary(&self, spot: f64, _vol: f64, _maturity: f64) -> FdmResult<f64> {
        Ok(spot.ln())
    }

    fn coordinate_of(&self, spot: f64) -> f64 {
        spot.ln()
    }

    fn spot_at(&self, x: f64) -> f64 {
        x.exp()
    }
}

/// Log mesh pinned around a fixed level, ignoring the instrument's spot
struct AnchoredSpace {
    anchor: f64,
}

impl SpaceBoundaries for AnchoredSpace {
    fn space_mesh(&self, dx: f64, instrument: &Instrument) -> FdmResult<usize> {
        LogSpaceBoundaries::fixed(0.5).space_mesh(dx, instrument)
    }

    fn upper_boundary(&self, _spot: f64, vol: f64, maturity: f64) -> FdmResult<f64> {
        LogSpaceBoundaries::fixed(0.5).upper_boundary(self.anchor, vol, maturity)
    }

    fn coordinate_of(&self, spot: f64) -> f64 {
        spot.ln()
    }

    fn spot_at(&self, x: f64) -> f64 {
        x.exp()
    }
}

struct FailingModel;

impl PdeModel for FailingModel {
    fn bind(&self, _instrument: &Instrument) -> FdmResult<Box<dyn PdeCoefficients>> {
        Err(FdmError::ProviderError {
            provider: "vol surface".to_string(),
            reason: "no quotes for maturity".to_string(),
        })
    }
}

#[test]
fn test_identical_inputs_give_identical_prices() {
    let engine = bs_call_engine(FdmConfig::default());
    let first = engine.price(&instrument()).unwrap();
    let second = engine.price(&instrument()).unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn test_parallel_matches_sequential() {
    let parallel = bs_call_engine(FdmConfig::default());
    let sequential = bs_call_engine(FdmConfig {
        parallel: false,
        ..Default::default()
    });

    let par = parallel.solve(&instrument()).unwrap();
    let seq = sequential.solve(&instrument()).unwrap();
    assert_eq!(par.values(), seq.values());
    assert_eq!(
        parallel.price(&instrument()).unwrap().to_bits(),
        sequential.price(&instrument()).unwrap().to_bits()
    );
}

#[test]
fn test_legacy_mode_seeds_uniformly() {
    // the payoff at an at-the-money spot is zero, so is every seeded value
    let atm = bs_call_engine(FdmConfig {
        mode: MarchMode::Legacy,
        ..Default::default()
    });
    assert_eq!(atm.price(&instrument()).unwrap(), 0.0);

    let boundary = 4.0;
    let constant = engine(
        Box::new(ConstantModel::new(-0.045, 0.02)),
        Box::new(move |_: f64| boundary),
        Box::new(LogSpaceBoundaries::fixed(0.8)),
        0.0,
        FdmConfig {
            f0: boundary,
            f_n: boundary,
            mode: MarchMode::Legacy,
            ..Default::default()
        },
    )
    .unwrap();
    let inst = Instrument::new(50.0, 0.3, 2.0, 0.0).unwrap();
    let price = constant.price(&inst).unwrap();
    assert!((price - boundary).abs() < 1e-9, "constant not preserved: {}", price);
}

#[test]
fn test_standard_mode_reads_at_spot() {
    let engine = bs_call_engine(FdmConfig::default());
    let inst = instrument();
    let solution = engine.solve(&inst).unwrap();

    let at_spot = solution.price_at(inst.spot()).unwrap();
    assert_eq!(at_spot, engine.price(&inst).unwrap());

    // deep in and out of the money neighbours bracket the at-the-money value
    let low = solution.price_at(80.0).unwrap();
    let high = solution.price_at(120.0).unwrap();
    assert!(low < at_spot && at_spot < high);
}

#[test]
fn test_invalid_configuration_rejected() {
    let config = FdmConfig {
        theta: 2.0,
        ..Default::default()
    };
    let result = engine(
        Box::new(BlackScholes),
        Box::new(Payoff::EuropeanCall { k: 100.0 }),
        Box::new(LogSpaceBoundaries::default()),
        0.05,
        config,
    );
    assert!(matches!(result, Err(FdmError::InvalidParameters { .. })));

    let config = FdmConfig {
        dx: 0.0,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_degenerate_mesh_is_configuration_error() {
    let engine = engine(
        Box::new(BlackScholes),
        Box::new(Payoff::EuropeanCall { k: 100.0 }),
        Box::new(DegenerateSpace),
        0.05,
        FdmConfig::default(),
    )
    .unwrap();
    assert!(matches!(
        engine.price(&instrument()),
        Err(FdmError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_unrepresentable_mesh_is_configuration_error() {
    let fine = bs_call_engine(FdmConfig {
        dx: 2.0_f64.powi(-63),
        ..Default::default()
    });
    match fine.price(&instrument()) {
        Err(FdmError::InvalidConfiguration { field, .. }) => assert_eq!(field, "space_mesh"),
        other => panic!("expected a configuration error, got {:?}", other),
    }
}

#[test]
fn test_spot_outside_mesh_is_configuration_error() {
    let engine = engine(
        Box::new(BlackScholes),
        Box::new(Payoff::EuropeanCall { k: 100.0 }),
        Box::new(AnchoredSpace { anchor: 1000.0 }),
        0.05,
        FdmConfig::default(),
    )
    .unwrap();
    match engine.price(&instrument()) {
        Err(FdmError::InvalidConfiguration { field, .. }) => assert_eq!(field, "spot"),
        other => panic!("expected a configuration error, got {:?}", other),
    }
}

#[test]
fn test_zero_pivot_is_numerical_instability() {
    // theta = 1, dx = dt = 0.5 and diffusion 0.25 put a zero on the diagonal
    let engine = engine(
        Box::new(ConstantModel::new(0.25, 0.0)),
        Box::new(|_: f64| 1.0),
        Box::new(LogSpaceBoundaries::fixed(1.0)),
        0.0,
        FdmConfig {
            dx: 0.5,
            dt: 0.5,
            theta: 1.0,
            ..Default::default()
        },
    )
    .unwrap();
    let inst = Instrument::new(100.0, 0.2, 1.0, 0.0).unwrap();
    assert!(matches!(
        engine.price(&inst),
        Err(FdmError::NumericalInstability { .. })
    ));
}

#[test]
fn test_provider_error_propagates_unchanged() {
    let engine = engine(
        Box::new(FailingModel),
        Box::new(Payoff::EuropeanPut { k: 100.0 }),
        Box::new(LogSpaceBoundaries::default()),
        0.05,
        FdmConfig::default(),
    )
    .unwrap();

    let expected = FdmError::ProviderError {
        provider: "vol surface".to_string(),
        reason: "no quotes for maturity".to_string(),
    };
    assert_eq!(engine.price(&instrument()).unwrap_err(), expected);
    assert_eq!(engine.delta(&instrument()).unwrap_err(), expected);
}

#[test]
fn test_non_finite_payoff_is_provider_error() {
    let engine = engine(
        Box::new(BlackScholes),
        Box::new(|s: f64| if s > 150.0 { f64::NAN } else { 0.0 }),
        Box::new(LogSpaceBoundaries::default()),
        0.05,
        FdmConfig::default(),
    )
    .unwrap();
    assert!(matches!(
        engine.price(&instrument()),
        Err(FdmError::ProviderError { .. })
    ));
}

#[test]
fn test_custom_time_boundaries() {
    // a mesh that stops short of today prices the forward-starting value
    struct Window;
    impl TimeBoundaries for Window {
        fn time_mesh(&self, dt: f64, instrument: &Instrument) -> FdmResult<usize> {
            MaturityBoundaries.time_mesh(dt, &instrument.with_maturity(instrument.maturity() / 2.0)?)
        }
        fn upper_boundary(&self, maturity: f64) -> f64 {
            maturity
        }
        fn lower_boundary(&self, maturity: f64) -> f64 {
            maturity / 2.0
        }
    }

    let full = bs_call_engine(FdmConfig::default());
    let half = FdmEngine::new(
        Box::new(BlackScholes),
        Box::new(FlatRate::new(0.05)),
        Box::new(Payoff::EuropeanCall { k: 100.0 }),
        Box::new(LogSpaceBoundaries::default()),
        Box::new(Window),
        FdmConfig::default(),
    )
    .unwrap();

    let inst = instrument();
    let full_price = full.price(&inst).unwrap();
    let half_price = half.price(&inst).unwrap();
    let half_maturity = full.price(&inst.with_maturity(0.5).unwrap()).unwrap();
    assert!(half_price < full_price);
    assert!((half_price - half_maturity).abs() < 0.05);
}
