//! Monte Carlo pipeline and statistical analysis of the profit sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::error::{Result, SimError};
use crate::histogram;
use crate::models::{ParameterSet, SimulationResult, Summary};
use crate::simulation;

/// Linear-interpolated quantile of an ascending slice, `p` in `[0, 1]`.
pub(crate) fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let pos = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Middle value of an ascending slice; mean of the two middle values for even lengths.
fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Bessel-corrected standard deviation around a precomputed mean.
pub fn sample_std(profits: &[f64], mean: f64) -> Result<f64> {
    if profits.len() < 2 {
        return Err(SimError::insufficient_samples(2, profits.len()));
    }
    let sum_sq = profits.iter().map(|p| (p - mean).powi(2)).sum::<f64>();
    Ok((sum_sq / (profits.len() - 1) as f64).sqrt())
}

/// Fraction of trials whose profit is strictly below `threshold`.
pub fn risk_probability(profits: &[f64], threshold: f64) -> f64 {
    if profits.is_empty() {
        return 0.0;
    }
    let below = profits.iter().filter(|&&p| p < threshold).count();
    below as f64 / profits.len() as f64
}

/// Reduce a profit sequence to its summary statistics.
pub fn summarize(profits: &[f64], risk_threshold: f64) -> Result<Summary> {
    if profits.len() < 2 {
        return Err(SimError::insufficient_samples(2, profits.len()));
    }

    let mean = profits.iter().sum::<f64>() / profits.len() as f64;
    let sample_std = sample_std(profits, mean)?;

    let mut sorted = profits.to_vec();
    sorted.sort_by(f64::total_cmp);

    Ok(Summary {
        trial_count: profits.len(),
        mean,
        median: median_sorted(&sorted),
        sample_std,
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        risk_threshold,
        risk_probability: risk_probability(profits, risk_threshold),
    })
}

/// Run the full pipeline: sample, compute profits, summarize and bin.
/// `bins` forces a bin count; `None` selects one automatically.
pub fn run_monte_carlo<R: Rng + ?Sized>(
    params: &ParameterSet,
    bins: Option<usize>,
    rng: &mut R,
) -> Result<SimulationResult> {
    let profits = simulation::run(params, rng)?;
    let summary = summarize(profits.as_slice(), params.risk_threshold)?;

    let markers = histogram::markers_for(&summary);
    let histogram = match bins {
        Some(count) => histogram::build_with_bins(profits.as_slice(), markers, count)?,
        None => histogram::build(profits.as_slice(), markers)?,
    };

    info!(
        trials = summary.trial_count,
        mean = summary.mean,
        risk_probability = summary.risk_probability,
        "simulation complete"
    );

    Ok(SimulationResult {
        seed: None,
        summary,
        histogram,
    })
}

/// Run the pipeline on a ChaCha8 source, seeded from `seed` or from OS entropy.
/// The seed actually used is recorded in the result.
pub fn run_seeded(
    params: &ParameterSet,
    seed: Option<u64>,
    bins: Option<usize>,
) -> Result<SimulationResult> {
    let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!(seed, trials = params.trial_count, "starting simulation");

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut result = run_monte_carlo(params, bins, &mut rng)?;
    result.seed = Some(seed);
    Ok(result)
}
