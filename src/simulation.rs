//! Per-trial profit computation.
//! Production cost is charged on the full quantity produced; only revenue is
//! capped by the units actually sold.

use rand::Rng;
use tracing::debug;

use crate::error::Result;
use crate::models::{ParameterSet, ProfitSequence, TrialBatch};
use crate::sampling::draw_batch;

/// Breakdown of a single trial
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialOutcome {
    pub quantity_sold: f64,
    pub variable_cost: f64,
    pub revenue: f64,
    pub profit: f64,
}

/// Evaluate one trial. Negative demand or costs are passed through as drawn.
pub fn evaluate_trial(
    demand: f64,
    unit_cost: f64,
    fixed_cost: f64,
    quantity_produced: f64,
    unit_price: f64,
) -> TrialOutcome {
    let quantity_sold = demand.min(quantity_produced);
    let variable_cost = quantity_produced * unit_cost;
    let revenue = unit_price * quantity_sold;
    let profit = revenue - fixed_cost - variable_cost;

    TrialOutcome {
        quantity_sold,
        variable_cost,
        revenue,
        profit,
    }
}

/// Derive the profit of every trial in `batch`.
pub fn profits_from_batch(
    batch: &TrialBatch,
    quantity_produced: f64,
    unit_price: f64,
) -> ProfitSequence {
    let profits = batch
        .demand()
        .iter()
        .zip(batch.unit_cost())
        .zip(batch.fixed_cost())
        .map(|((&demand, &unit_cost), &fixed_cost)| {
            evaluate_trial(demand, unit_cost, fixed_cost, quantity_produced, unit_price).profit
        })
        .collect();

    ProfitSequence::new(profits)
}

/// Validate `params`, draw a fresh batch and return the per-trial profits.
pub fn run<R: Rng + ?Sized>(params: &ParameterSet, rng: &mut R) -> Result<ProfitSequence> {
    run_with_batch(params, rng).map(|(_, profits)| profits)
}

/// Like [`run`], but also hands back the drawn batch for diagnostics.
/// Invalid parameters are rejected by [`draw_batch`] before any variate is drawn.
pub fn run_with_batch<R: Rng + ?Sized>(
    params: &ParameterSet,
    rng: &mut R,
) -> Result<(TrialBatch, ProfitSequence)> {
    let batch = draw_batch(params, rng)?;
    let profits = profits_from_batch(&batch, params.quantity_produced, params.unit_price);
    debug!(trials = profits.len(), "computed profit sequence");

    Ok((batch, profits))
}
