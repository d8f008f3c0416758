//! Closed-form references for the grid pricer
pub mod bs_analytic;
