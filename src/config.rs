//! Run configuration: an optional TOML file, overridden by command-line flags.
//!
//! Every key is optional. A file such as
//!
//! ```toml
//! seed = 42
//! bins = 60
//!
//! [params]
//! trial_count = 100000
//! quantity_produced = 40000
//! risk_threshold = 250000
//! ```
//!
//! keeps the defaults for everything it does not mention.

use std::fs;
use std::path::Path;

use clap::Args;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SimError};
use crate::models::ParameterSet;

/// Fully resolved settings for one run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub params: ParameterSet,
    /// Seed for the random source; drawn from OS entropy when absent
    pub seed: Option<u64>,
    /// Forced histogram bin count; chosen automatically when absent
    pub bins: Option<usize>,
}

/// Command-line overrides, one flag per configurable value.
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    /// Number of events (trials) to simulate
    #[arg(long, short = 'n', env = "MFG_MC_TRIALS")]
    pub trials: Option<usize>,

    /// Quantity to produce
    #[arg(long, allow_negative_numbers = true)]
    pub quantity: Option<f64>,

    /// Unit price the product is sold at
    #[arg(long, allow_negative_numbers = true)]
    pub price: Option<f64>,

    /// Average demand (units)
    #[arg(long, allow_negative_numbers = true)]
    pub demand_mean: Option<f64>,

    /// Standard deviation of demand
    #[arg(long, allow_negative_numbers = true)]
    pub demand_sd: Option<f64>,

    /// Average fixed cost
    #[arg(long, allow_negative_numbers = true)]
    pub fixed_cost_mean: Option<f64>,

    /// Standard deviation of fixed cost
    #[arg(long, allow_negative_numbers = true)]
    pub fixed_cost_sd: Option<f64>,

    /// Average unit cost to produce
    #[arg(long, allow_negative_numbers = true)]
    pub unit_cost_mean: Option<f64>,

    /// Standard deviation of unit cost to produce
    #[arg(long, allow_negative_numbers = true)]
    pub unit_cost_sd: Option<f64>,

    /// Minimum acceptable profit
    #[arg(long, allow_negative_numbers = true)]
    pub risk: Option<f64>,

    /// Seed for reproducible runs
    #[arg(long, env = "MFG_MC_SEED")]
    pub seed: Option<u64>,

    /// Number of histogram bins (automatic when omitted)
    #[arg(long)]
    pub bins: Option<usize>,
}

impl RunConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| SimError::config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| SimError::config(format!("cannot read {}: {}", path.display(), e)))?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&text)
    }

    /// Apply command-line overrides on top of this configuration.
    pub fn apply(mut self, o: &Overrides) -> Self {
        let p = &mut self.params;
        if let Some(v) = o.trials {
            p.trial_count = v;
        }
        if let Some(v) = o.quantity {
            p.quantity_produced = v;
        }
        if let Some(v) = o.price {
            p.unit_price = v;
        }
        if let Some(v) = o.demand_mean {
            p.demand_mean = v;
        }
        if let Some(v) = o.demand_sd {
            p.demand_sd = v;
        }
        if let Some(v) = o.fixed_cost_mean {
            p.fixed_cost_mean = v;
        }
        if let Some(v) = o.fixed_cost_sd {
            p.fixed_cost_sd = v;
        }
        if let Some(v) = o.unit_cost_mean {
            p.unit_cost_mean = v;
        }
        if let Some(v) = o.unit_cost_sd {
            p.unit_cost_sd = v;
        }
        if let Some(v) = o.risk {
            p.risk_threshold = v;
        }
        if o.seed.is_some() {
            self.seed = o.seed;
        }
        if o.bins.is_some() {
            self.bins = o.bins;
        }
        self
    }

    /// Check parameters and run settings.
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        if self.bins == Some(0) {
            return Err(SimError::invalid_parameter("bins", "must be > 0", 0));
        }
        Ok(())
    }
}

/// Resolve the configuration for a run: file (if any), then overrides, then validation.
pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<RunConfig> {
    let base = match path {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    let config = base.apply(overrides);
    config.validate()?;
    Ok(config)
}
