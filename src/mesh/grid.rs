// src/mesh/grid.rs
use super::boundaries::{SpaceBoundaries, TimeBoundaries};
use crate::error::{validation::*, FdmError, FdmResult};
use crate::models::instrument::Instrument;

/// Slack allowed when locating a coordinate at the edge of the mesh
const LOCATE_TOL: f64 = 1e-9;

/// Uniform space/time mesh for one price query
///
/// Interior point `i` sits at `x_upper - i·dx` for `i in 0..N-1`; the
/// Dirichlet values live on the ghost rows `-1` and `N-1`. Time layer `k`
/// sits at `t_lower + k·dt` for `k in 0..=T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mesh {
    pub dx: f64,
    /// Effective step: the time span divided into `time_steps` equal parts
    pub dt: f64,
    pub space_intervals: usize,
    pub time_steps: usize,
    pub x_upper: f64,
    pub t_lower: f64,
    pub t_upper: f64,
}

impl Mesh {
    pub fn build(
        dx: f64,
        dt: f64,
        instrument: &Instrument,
        space: &dyn SpaceBoundaries,
        time: &dyn TimeBoundaries,
    ) -> FdmResult<Self> {
        validate_positive("dx", dx)?;
        validate_positive("dt", dt)?;

        let space_intervals = space.space_mesh(dx, instrument)?;
        validate_mesh_size("space_mesh", space_intervals, 2)?;
        let time_steps = time.time_mesh(dt, instrument)?;
        validate_mesh_size("time_mesh", time_steps, 1)?;

        let x_upper = space.upper_boundary(
            instrument.spot(),
            instrument.volatility(),
            instrument.maturity(),
        )?;
        validate_finite("space upper boundary", x_upper)?;

        let t_upper = time.upper_boundary(instrument.maturity());
        let t_lower = time.lower_boundary(instrument.maturity());
        validate_finite("time upper boundary", t_upper)?;
        validate_finite("time lower boundary", t_lower)?;
        if t_upper <= t_lower {
            return Err(FdmError::InvalidConfiguration {
                field: "time boundaries".to_string(),
                reason: format!("upper {} must exceed lower {}", t_upper, t_lower),
            });
        }

        Ok(Mesh {
            dx,
            dt: (t_upper - t_lower) / time_steps as f64,
            space_intervals,
            time_steps,
            x_upper,
            t_lower,
            t_upper,
        })
    }

    /// Number of unknowns per time layer (`N - 1`)
    pub fn interior_points(&self) -> usize {
        self.space_intervals - 1
    }

    pub fn space_coordinate(&self, i: usize) -> f64 {
        self.x_upper - i as f64 * self.dx
    }

    pub fn time_coordinate(&self, k: usize) -> f64 {
        if k == self.time_steps {
            self.t_upper
        } else {
            self.t_lower + k as f64 * self.dt
        }
    }

    /// Lowest interior coordinate
    pub fn x_lower(&self) -> f64 {
        self.space_coordinate(self.interior_points() - 1)
    }

    /// Bracketing interior index and interpolation weight for `x`
    ///
    /// Returns `(i, w)` such that the value at `x` is
    /// `(1 - w)·F[i] + w·F[i + 1]`, or `None` if `x` lies outside the
    /// interior points.
    pub fn locate(&self, x: f64) -> Option<(usize, f64)> {
        let last = self.interior_points() - 1;
        let p = (self.x_upper - x) / self.dx;
        if !p.is_finite() || p < -LOCATE_TOL || p > last as f64 + LOCATE_TOL {
            return None;
        }
        if last == 0 {
            return Some((0, 0.0));
        }
        let p = p.clamp(0.0, last as f64);
        let i = (p.floor() as usize).min(last - 1);
        Some((i, p - i as f64))
    }
}
