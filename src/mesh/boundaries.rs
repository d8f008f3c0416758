// src/mesh/boundaries.rs
use crate::error::{validation::*, FdmError, FdmResult};
use crate::models::instrument::Instrument;

/// Tolerance used when rounding a span up to whole mesh steps
const STEP_ROUNDING_TOL: f64 = 1e-9;

/// Whole step count for a rounded-up ratio, `None` if it does not fit a `usize`
fn step_count(steps: f64) -> Option<usize> {
    // `usize::MAX as f64` rounds up to 2^64, which itself does not fit
    if !steps.is_finite() || steps >= usize::MAX as f64 {
        return None;
    }
    Some(steps.max(0.0) as usize)
}

/// Extent of the spatial mesh
pub trait SpaceBoundaries: Send + Sync {
    /// Number of intervals `N` of the spatial mesh (`N - 1` interior unknowns)
    fn space_mesh(&self, dx: f64, instrument: &Instrument) -> FdmResult<usize>;

    /// Coordinate of the first interior point; later points step down by `dx`
    fn upper_boundary(&self, spot: f64, vol: f64, maturity: f64) -> FdmResult<f64>;

    /// Mesh coordinate of a spot level
    fn coordinate_of(&self, spot: f64) -> f64;

    /// Spot level at a mesh coordinate
    fn spot_at(&self, x: f64) -> f64;
}

/// Extent of the time mesh
pub trait TimeBoundaries: Send + Sync {
    /// Number of time steps `T` between the lower and upper boundary
    fn time_mesh(&self, dt: f64, instrument: &Instrument) -> FdmResult<usize>;
    fn upper_boundary(&self, maturity: f64) -> f64;
    fn lower_boundary(&self, maturity: f64) -> f64;
}

/// Half-width of a log-spot mesh around `ln S`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpaceWidth {
    /// Fixed distance in log-spot units
    Fixed(f64),
    /// Multiple of the terminal standard deviation `σ√T`
    StdDevs(f64),
}

/// Log-spot mesh centred on the instrument's spot
///
/// Interior points cover `[ln S - w, ln S + w]`; with a [`SpaceWidth::Fixed`]
/// width and `w/dx` integral the spot sits exactly on a mesh point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogSpaceBoundaries {
    pub width: SpaceWidth,
}

impl Default for LogSpaceBoundaries {
    fn default() -> Self {
        LogSpaceBoundaries {
            width: SpaceWidth::StdDevs(5.0),
        }
    }
}

impl LogSpaceBoundaries {
    pub fn new(width: SpaceWidth) -> Self {
        LogSpaceBoundaries { width }
    }

    pub fn fixed(half_width: f64) -> Self {
        Self::new(SpaceWidth::Fixed(half_width))
    }

    pub fn std_devs(multiple: f64) -> Self {
        Self::new(SpaceWidth::StdDevs(multiple))
    }

    fn half_width(&self, vol: f64, maturity: f64) -> FdmResult<f64> {
        let w = match self.width {
            SpaceWidth::Fixed(w) => w,
            SpaceWidth::StdDevs(k) => k * vol * maturity.sqrt(),
        };
        validate_positive("space half-width", w)?;
        Ok(w)
    }
}

impl SpaceBoundaries for LogSpaceBoundaries {
    fn space_mesh(&self, dx: f64, instrument: &Instrument) -> FdmResult<usize> {
        validate_positive("dx", dx)?;
        let w = self.half_width(instrument.volatility(), instrument.maturity())?;
        let steps = (2.0 * w / dx - STEP_ROUNDING_TOL).ceil();
        // the two extra intervals hold the Dirichlet ghost rows
        step_count(steps)
            .and_then(|n| n.checked_add(2))
            .ok_or_else(|| FdmError::InvalidConfiguration {
                field: "space_mesh".to_string(),
                reason: format!("width {} cannot be split into steps of {}", 2.0 * w, dx),
            })
    }

    fn upper_boundary(&self, spot: f64, vol: f64, maturity: f64) -> FdmResult<f64> {
        validate_positive("spot", spot)?;
        Ok(spot.ln() + self.half_width(vol, maturity)?)
    }

    fn coordinate_of(&self, spot: f64) -> f64 {
        spot.ln()
    }

    fn spot_at(&self, x: f64) -> f64 {
        x.exp()
    }
}

/// Time axis running from today (`0`) to the instrument's maturity
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MaturityBoundaries;

impl TimeBoundaries for MaturityBoundaries {
    fn time_mesh(&self, dt: f64, instrument: &Instrument) -> FdmResult<usize> {
        validate_positive("dt", dt)?;
        let span = self.upper_boundary(instrument.maturity()) - self.lower_boundary(instrument.maturity());
        let steps = (span / dt - STEP_ROUNDING_TOL).ceil();
        step_count(steps)
            .map(|n| n.max(1))
            .ok_or_else(|| FdmError::InvalidConfiguration {
                field: "time_mesh".to_string(),
                reason: format!("span {} cannot be split into steps of {}", span, dt),
            })
    }

    fn upper_boundary(&self, maturity: f64) -> f64 {
        maturity
    }

    fn lower_boundary(&self, _maturity: f64) -> f64 {
        0.0
    }
}
