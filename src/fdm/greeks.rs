// src/fdm/greeks.rs
//! Finite-Difference Greeks
//!
//! # Estimators
//!
//! Every Greek re-prices perturbed copies of the instrument with the same
//! payoff and mesh collaborators, rebinding the model for each copy:
//! ```text
//! Δ = (V(S+h) - V(S-h)) / 2h
//! Γ = (V(S+h) + V(S-h) - 2V(S)) / h²
//! Θ = (V(T+h) - V(T-h)) / 2h
//! ν = (V(σ+h) - V(σ-h)) / 2h
//! ```
//! Theta is the sensitivity to the maturity input; it has the opposite sign of
//! the calendar decay `∂V/∂t`.

use crate::error::{validation::*, FdmResult};
use crate::fdm::fdm_engine::FdmEngine;
use crate::models::instrument::Instrument;
use bitflags::bitflags;

pub const DEFAULT_SPOT_BUMP: f64 = 0.01;
pub const DEFAULT_MATURITY_BUMP: f64 = 0.003;
pub const DEFAULT_VOL_BUMP: f64 = 0.01;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GreeksSelection: u32 {
        const DELTA = 1 << 0;
        const GAMMA = 1 << 1;
        const THETA = 1 << 2;
        const VEGA  = 1 << 3;
        const ALL   = Self::DELTA.bits() | Self::GAMMA.bits() | Self::THETA.bits() | Self::VEGA.bits();
    }
}

/// Absolute bump sizes of the finite-difference estimators
///
/// A negative bump swaps the roles of the up and down prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BumpSizes {
    pub spot: f64,
    pub maturity: f64,
    pub volatility: f64,
}

impl BumpSizes {
    pub fn validate(&self) -> FdmResult<()> {
        validate_nonzero("spot bump", self.spot)?;
        validate_nonzero("maturity bump", self.maturity)?;
        validate_nonzero("volatility bump", self.volatility)?;
        Ok(())
    }
}

impl Default for BumpSizes {
    fn default() -> Self {
        BumpSizes {
            spot: DEFAULT_SPOT_BUMP,
            maturity: DEFAULT_MATURITY_BUMP,
            volatility: DEFAULT_VOL_BUMP,
        }
    }
}

/// Price and the requested subset of Greeks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Greeks {
    pub price: f64,
    pub delta: Option<f64>,
    pub gamma: Option<f64>,
    pub theta: Option<f64>,
    pub vega: Option<f64>,
}

impl FdmEngine {
    pub fn delta(&self, instrument: &Instrument) -> FdmResult<f64> {
        let h = self.config().bumps.spot;
        let (up, down) = self.spot_prices(instrument)?;
        Ok((up - down) / (2.0 * h))
    }

    pub fn gamma(&self, instrument: &Instrument) -> FdmResult<f64> {
        let h = self.config().bumps.spot;
        let base = self.price(instrument)?;
        let (up, down) = self.spot_prices(instrument)?;
        Ok((up + down - 2.0 * base) / (h * h))
    }

    /// Sensitivity to the maturity input
    pub fn theta(&self, instrument: &Instrument) -> FdmResult<f64> {
        let h = self.config().bumps.maturity;
        let (up, down) = self.maturity_prices(instrument)?;
        Ok((up - down) / (2.0 * h))
    }

    pub fn vega(&self, instrument: &Instrument) -> FdmResult<f64> {
        let h = self.config().bumps.volatility;
        let (up, down) = self.vol_prices(instrument)?;
        Ok((up - down) / (2.0 * h))
    }

    /// Price plus every Greek in `selection`
    ///
    /// Delta and gamma share the spot-bumped prices. Fails as a whole if any
    /// re-pricing fails.
    pub fn sensitivities(&self, instrument: &Instrument, selection: GreeksSelection) -> FdmResult<Greeks> {
        let bumps = self.config().bumps;
        let mut greeks = Greeks {
            price: self.price(instrument)?,
            ..Default::default()
        };

        if selection.intersects(GreeksSelection::DELTA | GreeksSelection::GAMMA) {
            let h = bumps.spot;
            let (up, down) = self.spot_prices(instrument)?;
            if selection.contains(GreeksSelection::DELTA) {
                greeks.delta = Some((up - down) / (2.0 * h));
            }
            if selection.contains(GreeksSelection::GAMMA) {
                greeks.gamma = Some((up + down - 2.0 * greeks.price) / (h * h));
            }
        }
        if selection.contains(GreeksSelection::THETA) {
            let (up, down) = self.maturity_prices(instrument)?;
            greeks.theta = Some((up - down) / (2.0 * bumps.maturity));
        }
        if selection.contains(GreeksSelection::VEGA) {
            let (up, down) = self.vol_prices(instrument)?;
            greeks.vega = Some((up - down) / (2.0 * bumps.volatility));
        }
        Ok(greeks)
    }

    fn spot_prices(&self, instrument: &Instrument) -> FdmResult<(f64, f64)> {
        let h = self.config().bumps.spot;
        let up = instrument.with_spot(instrument.spot() + h)?;
        let down = instrument.with_spot(instrument.spot() - h)?;
        self.bumped_prices("spot", &up, &down)
    }

    fn maturity_prices(&self, instrument: &Instrument) -> FdmResult<(f64, f64)> {
        let h = self.config().bumps.maturity;
        let up = instrument.with_maturity(instrument.maturity() + h)?;
        let down = instrument.with_maturity(instrument.maturity() - h)?;
        self.bumped_prices("maturity", &up, &down)
    }

    fn vol_prices(&self, instrument: &Instrument) -> FdmResult<(f64, f64)> {
        let h = self.config().bumps.volatility;
        let up = instrument.with_volatility(instrument.volatility() + h)?;
        let down = instrument.with_volatility(instrument.volatility() - h)?;
        self.bumped_prices("volatility", &up, &down)
    }

    fn bumped_prices(&self, input: &str, up: &Instrument, down: &Instrument) -> FdmResult<(f64, f64)> {
        let (up_price, down_price) = if self.config().parallel {
            let (u, d) = rayon::join(|| self.price(up), || self.price(down));
            (u?, d?)
        } else {
            (self.price(up)?, self.price(down)?)
        };
        tracing::debug!(input, up = up_price, down = down_price, "bumped prices");
        Ok((up_price, down_price))
    }
}
