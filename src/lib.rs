//! Monte Carlo estimation of manufacturing profit under uncertain demand,
//! unit cost and fixed cost.
//!
//! The pipeline is `ParameterSet -> sampling -> simulation -> monte_carlo ->
//! histogram`, with the random source passed explicitly at every step.

pub mod config;
pub mod error;
pub mod histogram;
pub mod logging;
pub mod models;
pub mod monte_carlo;
pub mod reporting;
pub mod sampling;
pub mod simulation;

pub use error::{Result, SimError};
pub use models::{
    Histogram, HistogramBin, Marker, MarkerKind, ParameterSet, ProfitSequence, SimulationResult,
    Summary, TrialBatch,
};
pub use monte_carlo::{run_monte_carlo, run_seeded, summarize};
