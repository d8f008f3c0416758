// src/models/instrument.rs
use crate::error::{validation::*, FdmResult};

/// Market snapshot of the contract being priced
///
/// Fields are read-only; the `with_*` methods return modified copies so a
/// perturbation never touches the caller's value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instrument {
    spot: f64,
    volatility: f64,
    maturity: f64,
    rate: f64,
}

impl Instrument {
    pub fn new(spot: f64, volatility: f64, maturity: f64, rate: f64) -> FdmResult<Self> {
        validate_positive("spot", spot)?;
        validate_positive("volatility", volatility)?;
        validate_positive("maturity", maturity)?;
        validate_finite("rate", rate)?;

        Ok(Instrument {
            spot,
            volatility,
            maturity,
            rate,
        })
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn with_spot(&self, spot: f64) -> FdmResult<Self> {
        Self::new(spot, self.volatility, self.maturity, self.rate)
    }

    pub fn with_maturity(&self, maturity: f64) -> FdmResult<Self> {
        Self::new(self.spot, self.volatility, maturity, self.rate)
    }

    /// Copy with a constant volatility override
    pub fn with_volatility(&self, volatility: f64) -> FdmResult<Self> {
        Self::new(self.spot, volatility, self.maturity, self.rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_snapshot() {
        assert!(Instrument::new(-100.0, 0.2, 1.0, 0.05).is_err());
        assert!(Instrument::new(100.0, 0.0, 1.0, 0.05).is_err());
        assert!(Instrument::new(100.0, 0.2, 0.0, 0.05).is_err());
        assert!(Instrument::new(100.0, 0.2, 1.0, f64::NAN).is_err());
        assert!(Instrument::new(100.0, 0.2, 1.0, -0.01).is_ok());
    }

    #[test]
    fn test_overrides_leave_original_untouched() {
        let base = Instrument::new(100.0, 0.2, 1.0, 0.05).unwrap();

        let bumped = base.with_spot(100.01).unwrap();
        assert_eq!(bumped.spot(), 100.01);
        assert_eq!(bumped.volatility(), base.volatility());

        let longer = base.with_maturity(1.003).unwrap();
        assert_eq!(longer.maturity(), 1.003);

        let vol_up = base.with_volatility(0.21).unwrap();
        assert_eq!(vol_up.volatility(), 0.21);

        assert_eq!(base, Instrument::new(100.0, 0.2, 1.0, 0.05).unwrap());
        assert!(base.with_volatility(-0.01).is_err());
    }
}
