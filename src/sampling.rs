//! Random variate generation for the stochastic inputs.
//! The random source is always passed in by the caller.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::error::{Result, SimError};
use crate::models::{ParameterSet, TrialBatch};

/// Draw `trial_count` i.i.d. values from Normal(mean, sd).
///
/// `sd = 0` is a degenerate normal and yields `mean` for every draw.
pub fn generate<R: Rng + ?Sized>(
    trial_count: usize,
    mean: f64,
    sd: f64,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if trial_count == 0 {
        return Err(SimError::invalid_parameter(
            "trial_count",
            "must be > 0",
            trial_count,
        ));
    }
    if !mean.is_finite() {
        return Err(SimError::invalid_parameter("mean", "must be finite", mean));
    }
    if !sd.is_finite() || sd < 0.0 {
        return Err(SimError::invalid_parameter(
            "sd",
            "must be finite and >= 0",
            sd,
        ));
    }

    let normal = Normal::new(mean, sd)
        .map_err(|_| SimError::invalid_parameter("sd", "must be finite and >= 0", sd))?;

    Ok((0..trial_count).map(|_| normal.sample(rng)).collect())
}

/// Draw the demand, unit cost and fixed cost sequences for one run, in that
/// order, from the same source. `params` is validated first, so an invalid
/// set leaves the source untouched.
pub fn draw_batch<R: Rng + ?Sized>(params: &ParameterSet, rng: &mut R) -> Result<TrialBatch> {
    params.validate()?;

    let n = params.trial_count;
    let demand = generate(n, params.demand_mean, params.demand_sd, rng)?;
    let unit_cost = generate(n, params.unit_cost_mean, params.unit_cost_sd, rng)?;
    let fixed_cost = generate(n, params.fixed_cost_mean, params.fixed_cost_sd, rng)?;
    debug!(trials = n, "drew trial batch");

    TrialBatch::new(demand, unit_cost, fixed_cost)
}
