//! Collaborators injected into the grid pricer: the instrument snapshot,
//! PDE coefficient providers and short-rate providers.
pub mod black_scholes;
pub mod instrument;
pub mod model;
pub mod rates;

pub use black_scholes::{BlackScholes, BsPde, ConstantCoefficients, ConstantModel};
pub use instrument::Instrument;
pub use model::{PdeCoefficients, PdeModel, RateProvider};
pub use rates::FlatRate;
