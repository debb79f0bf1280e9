//! Data model for the manufacturing profit simulation.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Inputs of one simulation run: static management decisions plus the
/// normal distributions of demand, unit cost and fixed cost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    /// Number of trials (events) to simulate
    pub trial_count: usize,
    pub quantity_produced: f64,
    pub unit_price: f64,
    pub demand_mean: f64,
    pub demand_sd: f64,
    pub fixed_cost_mean: f64,
    pub fixed_cost_sd: f64,
    pub unit_cost_mean: f64,
    pub unit_cost_sd: f64,
    /// Minimum acceptable profit
    pub risk_threshold: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        ParameterSet {
            trial_count: 500_000,
            quantity_produced: 40_000.0,
            unit_price: 45.0,
            demand_mean: 50_000.0,
            demand_sd: 5_000.0,
            fixed_cost_mean: 10_000.0,
            fixed_cost_sd: 1_000.0,
            unit_cost_mean: 25.0,
            unit_cost_sd: 3.0,
            risk_threshold: 250_000.0,
        }
    }
}

impl ParameterSet {
    /// Check every field against its constraint, reporting the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.trial_count == 0 {
            return Err(SimError::invalid_parameter(
                "trial_count",
                "must be > 0",
                self.trial_count,
            ));
        }

        let finite = [
            ("quantity_produced", self.quantity_produced),
            ("unit_price", self.unit_price),
            ("demand_mean", self.demand_mean),
            ("demand_sd", self.demand_sd),
            ("fixed_cost_mean", self.fixed_cost_mean),
            ("fixed_cost_sd", self.fixed_cost_sd),
            ("unit_cost_mean", self.unit_cost_mean),
            ("unit_cost_sd", self.unit_cost_sd),
            ("risk_threshold", self.risk_threshold),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SimError::invalid_parameter(field, "must be finite", value));
            }
        }

        let non_negative = [
            ("quantity_produced", self.quantity_produced),
            ("unit_price", self.unit_price),
            ("demand_sd", self.demand_sd),
            ("fixed_cost_sd", self.fixed_cost_sd),
            ("unit_cost_sd", self.unit_cost_sd),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(SimError::invalid_parameter(field, "must be >= 0", value));
            }
        }

        Ok(())
    }
}

/// Drawn stochastic inputs for every trial. The three sequences always have
/// the same length.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrialBatch {
    demand: Vec<f64>,
    unit_cost: Vec<f64>,
    fixed_cost: Vec<f64>,
}

impl TrialBatch {
    pub fn new(demand: Vec<f64>, unit_cost: Vec<f64>, fixed_cost: Vec<f64>) -> Result<Self> {
        if demand.is_empty() {
            return Err(SimError::invalid_parameter(
                "trial_batch",
                "must contain at least one trial",
                0,
            ));
        }
        if unit_cost.len() != demand.len() {
            return Err(SimError::invalid_parameter(
                "unit_cost",
                "length must equal demand length",
                unit_cost.len(),
            ));
        }
        if fixed_cost.len() != demand.len() {
            return Err(SimError::invalid_parameter(
                "fixed_cost",
                "length must equal demand length",
                fixed_cost.len(),
            ));
        }
        Ok(TrialBatch {
            demand,
            unit_cost,
            fixed_cost,
        })
    }

    pub fn len(&self) -> usize {
        self.demand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demand.is_empty()
    }

    pub fn demand(&self) -> &[f64] {
        &self.demand
    }

    pub fn unit_cost(&self) -> &[f64] {
        &self.unit_cost
    }

    pub fn fixed_cost(&self) -> &[f64] {
        &self.fixed_cost
    }
}

/// One profit value per trial, in trial order.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProfitSequence(Vec<f64>);

impl ProfitSequence {
    pub fn new(profits: Vec<f64>) -> Self {
        ProfitSequence(profits)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for ProfitSequence {
    fn from(profits: Vec<f64>) -> Self {
        ProfitSequence(profits)
    }
}

/// Summary statistics of a profit sequence
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub trial_count: usize,
    pub mean: f64,
    pub median: f64,
    pub sample_std: f64,
    pub min: f64,
    pub max: f64,
    pub risk_threshold: f64,
    /// Fraction of trials with profit strictly below `risk_threshold`
    pub risk_probability: f64,
}

impl Summary {
    /// Range of mean ± 2 standard deviations (~95% of trials under normality).
    pub fn two_sigma_interval(&self) -> (f64, f64) {
        (
            self.mean - 2.0 * self.sample_std,
            self.mean + 2.0 * self.sample_std,
        )
    }
}

/// Which reference line a marker stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Mean,
    Median,
    PlusOneSd,
    MinusOneSd,
    PlusTwoSd,
    MinusTwoSd,
    RiskThreshold,
}

impl MarkerKind {
    pub fn label(&self) -> &'static str {
        match self {
            MarkerKind::Mean => "Mean",
            MarkerKind::Median => "Median",
            MarkerKind::PlusOneSd => "+1SD",
            MarkerKind::MinusOneSd => "-1SD",
            MarkerKind::PlusTwoSd => "+2SD",
            MarkerKind::MinusTwoSd => "-2SD",
            MarkerKind::RiskThreshold => "Risk Value",
        }
    }
}

/// Reference value drawn alongside the histogram
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub value: f64,
}

/// A single histogram bin. Half-open `[lower, upper)` except the last bin,
/// which also includes its upper bound.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Binned profit distribution plus the reference markers to draw with it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    pub markers: Vec<Marker>,
    /// Set when every profit was identical (single padded bin) or when some
    /// profits overflowed and were left out of the bins
    pub degenerate: bool,
    /// Trials whose profit was not finite; not included in any bin
    pub non_finite: usize,
}

impl Histogram {
    pub fn total_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Everything handed to the rendering side after a run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SimulationResult {
    pub seed: Option<u64>,
    pub summary: Summary,
    pub histogram: Histogram,
}
