// src/models/black_scholes.rs
//! Black–Scholes coefficients in log-spot space
//!
//! With `x = ln S` the Black–Scholes PDE has constant coefficients
//! ```text
//! ∂V/∂t + ½σ² ∂²V/∂x² + (r - ½σ²) ∂V/∂x - rV = 0
//! ```
//! In the stencil convention this is `diffusion = -½σ²`,
//! `convection = r - ½σ²` and a rate provider returning `r`.

use super::instrument::Instrument;
use super::model::{PdeCoefficients, PdeModel};
use crate::error::FdmResult;

/// Black–Scholes coefficients bound to one instrument snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BsPde {
    pub sigma: f64,
    pub r: f64,
}

impl BsPde {
    pub fn new(instrument: &Instrument) -> Self {
        BsPde {
            sigma: instrument.volatility(),
            r: instrument.rate(),
        }
    }
}

impl PdeCoefficients for BsPde {
    fn diffusion(&self, _s: f64, _t: f64) -> f64 {
        -0.5 * self.sigma * self.sigma
    }

    fn convection(&self, _s: f64, _t: f64) -> f64 {
        self.r - 0.5 * self.sigma * self.sigma
    }
}

/// Model producing a fresh [`BsPde`] for every instrument it is bound to
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholes;

impl PdeModel for BlackScholes {
    fn bind(&self, instrument: &Instrument) -> FdmResult<Box<dyn PdeCoefficients>> {
        Ok(Box::new(BsPde::new(instrument)))
    }
}

/// Coefficients that depend on neither the mesh point nor the instrument
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantCoefficients {
    pub diffusion: f64,
    pub convection: f64,
}

impl PdeCoefficients for ConstantCoefficients {
    fn diffusion(&self, _s: f64, _t: f64) -> f64 {
        self.diffusion
    }

    fn convection(&self, _s: f64, _t: f64) -> f64 {
        self.convection
    }
}

/// Model that binds the same [`ConstantCoefficients`] to every instrument
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantModel {
    pub coefficients: ConstantCoefficients,
}

impl ConstantModel {
    pub fn new(diffusion: f64, convection: f64) -> Self {
        ConstantModel {
            coefficients: ConstantCoefficients {
                diffusion,
                convection,
            },
        }
    }

    /// Pure heat equation with diffusion magnitude `σ²/2` and no drift
    pub fn heat(sigma: f64) -> Self {
        Self::new(-0.5 * sigma * sigma, 0.0)
    }
}

impl PdeModel for ConstantModel {
    fn bind(&self, _instrument: &Instrument) -> FdmResult<Box<dyn PdeCoefficients>> {
        Ok(Box::new(self.coefficients))
    }
}
