// src/solvers/stencil.rs
//! Theta-Scheme Stencil Coefficients
//!
//! # Mathematical Framework
//!
//! At a mesh point `s` and time `t`, with
//! ```text
//! α = diffusion(s,t) / dx²
//! β = convection(s,t) / (2·dx)
//! ```
//! one theta-scheme step couples each unknown to its two neighbours through
//! ```text
//! B1·F[i-1] + B2·F[i] + B3·F[i+1] = A1·G[i-1] + A2·G[i] + A3·G[i+1]
//! ```
//! where `G` is the already solved later layer and
//! ```text
//! A1 = dt(1-θ)(β - α)          B1 = dt·θ(α - β)
//! A2 = 1 - (1-θ)dt(r - 2α)     B2 = 1 + θ·dt(r - 2α)
//! A3 = -dt(1-θ)(β + α)         B3 = dt·θ(β + α)
//! ```
//! `θ = 0` is fully explicit, `θ = 1` fully implicit and `θ = ½` is
//! Crank–Nicolson.

use crate::mesh::grid::Mesh;
use crate::models::model::{PdeCoefficients, RateProvider};
use ndarray::Array1;
use rayon::prelude::*;

/// The six coefficients at one mesh point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stencil {
    pub a1: f64,
    pub a2: f64,
    pub a3: f64,
    pub b1: f64,
    pub b2: f64,
    pub b3: f64,
}

/// Evaluates [`Stencil`]s for one coefficient provider and mesh step
pub struct CoefficientCalculator<'a> {
    pde: &'a dyn PdeCoefficients,
    rate: &'a dyn RateProvider,
    dx: f64,
    dt: f64,
    theta: f64,
}

impl<'a> CoefficientCalculator<'a> {
    pub fn new(
        pde: &'a dyn PdeCoefficients,
        rate: &'a dyn RateProvider,
        dx: f64,
        dt: f64,
        theta: f64,
    ) -> Self {
        CoefficientCalculator {
            pde,
            rate,
            dx,
            dt,
            theta,
        }
    }

    pub fn at(&self, s: f64, t: f64) -> Stencil {
        let alpha = self.pde.diffusion(s, t) / (self.dx * self.dx);
        let beta = self.pde.convection(s, t) / (2.0 * self.dx);
        let r = self.rate.rate(s, t);
        let (dt, theta) = (self.dt, self.theta);

        Stencil {
            a1: dt * (1.0 - theta) * (beta - alpha),
            a2: 1.0 - (1.0 - theta) * dt * (r - 2.0 * alpha),
            a3: -dt * (1.0 - theta) * (beta + alpha),
            b1: dt * theta * (alpha - beta),
            b2: 1.0 + theta * dt * (r - 2.0 * alpha),
            b3: dt * theta * (beta + alpha),
        }
    }

    /// Growth factor of the explicit part for the highest mesh frequency
    ///
    /// Values above one mean the scheme amplifies grid-scale noise; only
    /// possible for `θ < ½`.
    pub fn explicit_stability_ratio(&self, s: f64, t: f64) -> f64 {
        let alpha = self.pde.diffusion(s, t) / (self.dx * self.dx);
        2.0 * (1.0 - 2.0 * self.theta).max(0.0) * self.dt * alpha.abs()
    }
}

/// Stencil coefficients across every interior point of one time layer
#[derive(Debug, Clone, PartialEq)]
pub struct StencilLayer {
    pub a1: Array1<f64>,
    pub a2: Array1<f64>,
    pub a3: Array1<f64>,
    pub b1: Array1<f64>,
    pub b2: Array1<f64>,
    pub b3: Array1<f64>,
}

impl StencilLayer {
    /// Evaluate the layer at time `t`, point `i` at `mesh.space_coordinate(i)`
    ///
    /// Each point is computed from its own index, so the parallel and
    /// sequential paths give identical coefficients.
    pub fn compute(calc: &CoefficientCalculator<'_>, mesh: &Mesh, t: f64, parallel: bool) -> Self {
        let n = mesh.interior_points();
        let point = |i: usize| calc.at(mesh.space_coordinate(i), t);
        let points: Vec<Stencil> = if parallel {
            (0..n).into_par_iter().map(point).collect()
        } else {
            (0..n).map(point).collect()
        };
        Self::from_points(&points)
    }

    pub fn from_points(points: &[Stencil]) -> Self {
        let column = |f: fn(&Stencil) -> f64| points.iter().map(f).collect::<Array1<f64>>();
        StencilLayer {
            a1: column(|p| p.a1),
            a2: column(|p| p.a2),
            a3: column(|p| p.a3),
            b1: column(|p| p.b1),
            b2: column(|p| p.b2),
            b3: column(|p| p.b3),
        }
    }

    pub fn len(&self) -> usize {
        self.a2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a2.is_empty()
    }

    /// Explicit side applied to a solved layer: `A·g + correction`
    pub fn explicit_rhs(&self, g: &Array1<f64>, correction: &Array1<f64>) -> Array1<f64> {
        let n = self.len();
        Array1::from_shape_fn(n, |i| {
            let mut d = self.a2[i] * g[i] + correction[i];
            if i > 0 {
                d += self.a1[i] * g[i - 1];
            }
            if i + 1 < n {
                d += self.a3[i] * g[i + 1];
            }
            d
        })
    }
}
