//! The grid marcher, its configuration, payoffs and finite-difference Greeks.
pub mod fdm_engine;
pub mod greeks;
pub mod payoffs;

pub use fdm_engine::{FdmConfig, FdmEngine, GridSolution, MarchMode};
pub use greeks::{BumpSizes, Greeks, GreeksSelection};
pub use payoffs::{Payoff, TerminalPayoff};
