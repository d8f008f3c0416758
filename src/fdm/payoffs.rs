//! Terminal Payoff Functions
//!
//! # Definitions
//!
//! The grid pricer only needs the contract value at maturity as a function of
//! the terminal spot:
//! - **Call**: max(S_T - K, 0)
//! - **Put**: max(K - S_T, 0)
//! - **Digital call**: pays `cash` if S_T > K
//! - **Digital put**: pays `cash` if S_T < K
//! - **Forward**: S_T - K
//!
//! Path-dependent contracts have no place on a one-factor grid and are not
//! represented.

/// Terminal contract value as a function of the terminal spot
pub trait TerminalPayoff: Send + Sync {
    fn payoff(&self, spot: f64) -> f64;
}

/// Enumeration of supported terminal payoffs
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payoff {
    /// European call option: max(S_T - K, 0)
    EuropeanCall { k: f64 },

    /// European put option: max(K - S_T, 0)
    EuropeanPut { k: f64 },

    /// Cash-or-nothing call: cash if S_T > K
    DigitalCall { k: f64, cash: f64 },

    /// Cash-or-nothing put: cash if S_T < K
    DigitalPut { k: f64, cash: f64 },

    /// Forward contract: S_T - K
    Forward { k: f64 },
}

impl Payoff {
    pub fn calculate(&self, spot: f64) -> f64 {
        match *self {
            Payoff::EuropeanCall { k } => (spot - k).max(0.0),
            Payoff::EuropeanPut { k } => (k - spot).max(0.0),
            Payoff::DigitalCall { k, cash } => {
                if spot > k {
                    cash
                } else {
                    0.0
                }
            }
            Payoff::DigitalPut { k, cash } => {
                if spot < k {
                    cash
                } else {
                    0.0
                }
            }
            Payoff::Forward { k } => spot - k,
        }
    }
}

impl TerminalPayoff for Payoff {
    fn payoff(&self, spot: f64) -> f64 {
        self.calculate(spot)
    }
}

impl<F> TerminalPayoff for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn payoff(&self, spot: f64) -> f64 {
        self(spot)
    }
}
