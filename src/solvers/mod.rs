//! Theta-scheme stencil coefficients and the tridiagonal solver.
pub mod stencil;
pub mod tridiagonal;

pub use stencil::{CoefficientCalculator, Stencil, StencilLayer};
pub use tridiagonal::{apply_tridiagonal, solve_tridiagonal};
