// src/models/model.rs
use super::instrument::Instrument;
use crate::error::FdmResult;

/// Spatial coefficients of the pricing PDE at a mesh point
///
/// Signs follow the stencil convention of [`crate::solvers::stencil`]: the
/// diffusion coefficient carries the sign it has in the calendar-time PDE and
/// the convection coefficient is the drift along the increasing space axis.
/// For Black–Scholes in `x = ln S` that means `diffusion = -σ²/2` and
/// `convection = r - σ²/2`.
pub trait PdeCoefficients: Send + Sync {
    fn diffusion(&self, s: f64, t: f64) -> f64;
    fn convection(&self, s: f64, t: f64) -> f64;
}

/// Builds coefficient providers from an instrument snapshot
///
/// A bound provider captures whatever instrument state it needs (spot, vol,
/// rate) at bind time. Every perturbed instrument gets its own provider.
pub trait PdeModel: Send + Sync {
    fn bind(&self, instrument: &Instrument) -> FdmResult<Box<dyn PdeCoefficients>>;
}

/// Possibly space/time dependent short rate
pub trait RateProvider: Send + Sync {
    fn rate(&self, s: f64, t: f64) -> f64;
}
