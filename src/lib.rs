//! # fdm-pricer: Theta-Scheme Finite-Difference Option Pricing
//!
//! A Rust library that prices derivatives by solving a parabolic PDE on a
//! uniform space/time mesh and estimates Greeks by bump-and-reprice.
//!
//! ## Key Features
//!
//! - **Theta-scheme**: explicit, implicit and Crank–Nicolson from one weight
//! - **Thomas solver**: O(n) tridiagonal elimination per time step
//! - **Injected collaborators**: coefficients, rates, payoff and mesh extent are traits
//! - **Greeks**: delta, gamma, theta and vega by finite differences
//! - **Parallel layers**: per-step coefficients and Greek re-pricings on Rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use fdm_pricer::fdm::{FdmConfig, FdmEngine, Payoff};
//! use fdm_pricer::mesh::{LogSpaceBoundaries, MaturityBoundaries};
//! use fdm_pricer::models::{BlackScholes, FlatRate, Instrument};
//!
//! let engine = FdmEngine::new(
//!     Box::new(BlackScholes),
//!     Box::new(FlatRate::new(0.05)),
//!     Box::new(Payoff::EuropeanCall { k: 100.0 }),
//!     Box::new(LogSpaceBoundaries::default()),
//!     Box::new(MaturityBoundaries),
//!     FdmConfig::default(),
//! )
//! .expect("valid configuration");
//!
//! let instrument = Instrument::new(100.0, 0.2, 1.0, 0.05).expect("valid instrument");
//! let price = engine.price(&instrument).expect("stable march");
//! assert!((price - 10.4506).abs() < 0.05);
//! ```
//!
//! ## Mathematical Foundation
//!
//! Starting from the terminal payoff the march solves, once per time step,
//! ```text
//! B1·F[i-1] + B2·F[i] + B3·F[i+1] = A1·G[i-1] + A2·G[i] + A3·G[i+1] + C[i]
//! ```
//! where `G` is the later layer and `C` folds in the Dirichlet boundary
//! values. See [`solvers::stencil`] for the coefficients.

pub mod analytics;
pub mod error;
pub mod fdm;
pub mod math_utils;
pub mod mesh;
pub mod models;
pub mod solvers;

pub use error::{FdmError, FdmResult};
