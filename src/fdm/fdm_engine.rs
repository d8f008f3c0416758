// src/fdm/fdm_engine.rs
use crate::error::{validation::*, FdmError, FdmResult};
use crate::fdm::greeks::BumpSizes;
use crate::fdm::payoffs::TerminalPayoff;
use crate::math_utils::lerp;
use crate::mesh::boundaries::{SpaceBoundaries, TimeBoundaries};
use crate::mesh::grid::Mesh;
use crate::models::instrument::Instrument;
use crate::models::model::{PdeCoefficients, PdeModel, RateProvider};
use crate::solvers::stencil::{CoefficientCalculator, StencilLayer};
use crate::solvers::tridiagonal::solve_tridiagonal;
use ndarray::Array1;

/// How the terminal layer is seeded and the price read out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarchMode {
    /// Payoff evaluated at every mesh point, price interpolated at the spot
    #[default]
    Standard,
    /// Every point seeded with the payoff at the spot, price taken from the
    /// last element of the final layer
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FdmConfig {
    /// Dirichlet value on the ghost row above the upper boundary
    pub f0: f64,
    /// Dirichlet value on the ghost row below the last interior point
    pub f_n: f64,
    pub dt: f64,
    pub dx: f64,
    /// Implicitness weight: 0 explicit, 0.5 Crank–Nicolson, 1 implicit
    pub theta: f64,
    pub mode: MarchMode,
    /// Compute coefficient layers and Greek re-pricings on rayon
    pub parallel: bool,
    pub bumps: BumpSizes,
}

impl FdmConfig {
    /// Validate the solver configuration
    pub fn validate(&self) -> FdmResult<()> {
        validate_finite("f0", self.f0)?;
        validate_finite("f_n", self.f_n)?;
        validate_positive("dt", self.dt)?;
        validate_positive("dx", self.dx)?;
        validate_range("theta", self.theta, 0.0, 1.0)?;
        self.bumps.validate()?;
        Ok(())
    }
}

impl Default for FdmConfig {
    fn default() -> Self {
        FdmConfig {
            f0: 0.0,
            f_n: 0.0,
            dt: 0.01,
            dx: 0.01,
            theta: 0.5,
            mode: MarchMode::Standard,
            parallel: true,
            bumps: BumpSizes::default(),
        }
    }
}

/// Constant boundary correction folded into every right-hand side
///
/// Only the first and last entries are nonzero; with a single interior
/// point both contributions land on it.
pub fn boundary_correction(layer: &StencilLayer, f0: f64, f_n: f64, discount: f64) -> Array1<f64> {
    let n = layer.len();
    let mut c = Array1::<f64>::zeros(n);
    if n == 0 {
        return c;
    }
    c[0] = (layer.a1[0] - layer.b1[0] * discount) * f0;
    c[n - 1] += (layer.a3[n - 1] - layer.b3[n - 1] * discount) * f_n;
    c
}

/// Final time layer of a march together with the mesh it lives on
pub struct GridSolution<'a> {
    values: Array1<f64>,
    mesh: Mesh,
    space: &'a dyn SpaceBoundaries,
}

impl<'a> GridSolution<'a> {
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Spot level of every interior point, in mesh order
    pub fn spots(&self) -> Array1<f64> {
        Array1::from_shape_fn(self.values.len(), |i| {
            self.space.spot_at(self.mesh.space_coordinate(i))
        })
    }

    /// Value of the last interior point
    pub fn last(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    /// Linear interpolation of the layer at a mesh coordinate
    pub fn value_at_coordinate(&self, x: f64) -> FdmResult<f64> {
        let (i, w) = self.mesh.locate(x).ok_or_else(|| FdmError::InvalidConfiguration {
            field: "spot".to_string(),
            reason: format!(
                "coordinate {} outside mesh [{}, {}]",
                x,
                self.mesh.x_lower(),
                self.mesh.x_upper
            ),
        })?;
        if w == 0.0 {
            return Ok(self.values[i]);
        }
        Ok(lerp(self.values[i], self.values[i + 1], w))
    }

    pub fn price_at(&self, spot: f64) -> FdmResult<f64> {
        validate_positive("spot", spot)?;
        self.value_at_coordinate(self.space.coordinate_of(spot))
    }
}

/// Theta-scheme pricer over an injected model, rate, payoff and mesh extent
pub struct FdmEngine {
    model: Box<dyn PdeModel>,
    rate: Box<dyn RateProvider>,
    payoff: Box<dyn TerminalPayoff>,
    space: Box<dyn SpaceBoundaries>,
    time: Box<dyn TimeBoundaries>,
    config: FdmConfig,
}

impl FdmEngine {
    pub fn new(
        model: Box<dyn PdeModel>,
        rate: Box<dyn RateProvider>,
        payoff: Box<dyn TerminalPayoff>,
        space: Box<dyn SpaceBoundaries>,
        time: Box<dyn TimeBoundaries>,
        config: FdmConfig,
    ) -> FdmResult<Self> {
        config.validate()?;
        Ok(FdmEngine {
            model,
            rate,
            payoff,
            space,
            time,
            config,
        })
    }

    pub fn config(&self) -> &FdmConfig {
        &self.config
    }

    /// Bind the model to `instrument` and march the grid
    pub fn solve(&self, instrument: &Instrument) -> FdmResult<GridSolution<'_>> {
        let pde = self.model.bind(instrument)?;
        self.solve_with(pde.as_ref(), instrument)
    }

    /// March the grid with an already bound coefficient provider
    ///
    /// # Algorithm
    ///
    /// 1. Derive the mesh from the boundary providers
    /// 2. Seed the terminal layer according to [`MarchMode`]
    /// 3. Build the boundary correction `C` once from the terminal stencil
    /// 4. For `k = T-1 .. 0` solve `B·F = A·F_prev + C` with the stencil at `t_k`
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` / `InvalidConfiguration` for a degenerate mesh
    /// - `ProviderError` for a non-finite terminal payoff
    /// - `NumericalInstability` when a solved layer is not finite
    pub fn solve_with(
        &self,
        pde: &dyn PdeCoefficients,
        instrument: &Instrument,
    ) -> FdmResult<GridSolution<'_>> {
        let cfg = &self.config;
        let mesh = Mesh::build(cfg.dx, cfg.dt, instrument, self.space.as_ref(), self.time.as_ref())?;
        let n = mesh.interior_points();
        tracing::debug!(
            space_intervals = mesh.space_intervals,
            time_steps = mesh.time_steps,
            dx = mesh.dx,
            dt = mesh.dt,
            "mesh derived"
        );

        let mut values = self.terminal_layer(&mesh, instrument)?;

        let calc = CoefficientCalculator::new(pde, self.rate.as_ref(), mesh.dx, mesh.dt, cfg.theta);
        if cfg.theta < 0.5 {
            self.check_explicit_stability(&calc, &mesh, instrument);
        }

        let terminal = StencilLayer::compute(&calc, &mesh, mesh.t_upper, cfg.parallel);
        let discount = (-instrument.rate() * mesh.dt).exp();
        let correction = boundary_correction(&terminal, cfg.f0, cfg.f_n, discount);
        let mut rhs = terminal.explicit_rhs(&values, &correction);

        for k in (0..mesh.time_steps).rev() {
            let t = mesh.time_coordinate(k);
            let layer = StencilLayer::compute(&calc, &mesh, t, cfg.parallel);
            values = solve_tridiagonal(layer.b1.view(), layer.b2.view(), layer.b3.view(), rhs.view());

            if let Some(i) = values.iter().position(|v| !v.is_finite()) {
                return Err(FdmError::NumericalInstability {
                    method: "theta-scheme march".to_string(),
                    reason: format!("non-finite value at point {} of {} in step {} (t = {})", i, n, k, t),
                });
            }
            tracing::trace!(step = k, t, "layer solved");

            rhs = layer.explicit_rhs(&values, &correction);
        }

        Ok(GridSolution {
            values,
            mesh,
            space: self.space.as_ref(),
        })
    }

    /// Present value of the instrument
    pub fn price(&self, instrument: &Instrument) -> FdmResult<f64> {
        let solution = self.solve(instrument)?;
        let price = match self.config.mode {
            MarchMode::Legacy => solution.last(),
            MarchMode::Standard => solution.price_at(instrument.spot())?,
        };
        tracing::debug!(spot = instrument.spot(), price, "priced");
        Ok(price)
    }

    fn terminal_layer(&self, mesh: &Mesh, instrument: &Instrument) -> FdmResult<Array1<f64>> {
        let n = mesh.interior_points();
        let values = match self.config.mode {
            MarchMode::Standard => Array1::from_shape_fn(n, |i| {
                let spot = self.space.spot_at(mesh.space_coordinate(i));
                self.payoff.payoff(spot)
            }),
            MarchMode::Legacy => Array1::from_elem(n, self.payoff.payoff(instrument.spot())),
        };
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(FdmError::ProviderError {
                provider: "payoff".to_string(),
                reason: format!("non-finite terminal value at point {}", i),
            });
        }
        Ok(values)
    }

    fn check_explicit_stability(&self, calc: &CoefficientCalculator<'_>, mesh: &Mesh, instrument: &Instrument) {
        let probes = [
            mesh.x_upper,
            self.space.coordinate_of(instrument.spot()),
            mesh.x_lower(),
        ];
        let ratio = probes
            .iter()
            .map(|&x| calc.explicit_stability_ratio(x, mesh.t_upper))
            .fold(0.0_f64, f64::max);
        if ratio > 1.0 {
            tracing::warn!(
                ratio,
                theta = self.config.theta,
                dx = mesh.dx,
                dt = mesh.dt,
                "explicit part of the scheme exceeds its stability bound"
            );
        }
    }
}
