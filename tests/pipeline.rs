use manufacturing_mc::config::{self, Overrides};
use manufacturing_mc::histogram;
use manufacturing_mc::sampling::generate;
use manufacturing_mc::simulation::{profits_from_batch, run};
use manufacturing_mc::{run_monte_carlo, summarize, ParameterSet, SimError, TrialBatch};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn scalar_scenario_end_to_end() {
    let batch = TrialBatch::new(
        vec![50.0, 150.0, 100.0],
        vec![2.0, 2.0, 2.0],
        vec![0.0, 0.0, 0.0],
    )
    .unwrap();
    let profits = profits_from_batch(&batch, 100.0, 10.0);
    assert_eq!(profits.as_slice(), &[300.0, 800.0, 800.0]);

    let summary = summarize(profits.as_slice(), 500.0).unwrap();
    assert!((summary.mean - 1900.0 / 3.0).abs() < 1e-9);
    assert_eq!(summary.median, 800.0);
    assert!((summary.sample_std - 288.68).abs() < 0.01);
    assert!((summary.risk_probability - 1.0 / 3.0).abs() < 1e-12);

    let hist = histogram::build(profits.as_slice(), histogram::markers_for(&summary)).unwrap();
    assert_eq!(hist.total_count(), 3);
    assert_eq!(hist.bins.first().unwrap().lower, 300.0);
    assert_eq!(hist.bins.last().unwrap().upper, 800.0);
}

#[test]
fn default_plan_is_reproducible() {
    let params = ParameterSet {
        trial_count: 20_000,
        ..ParameterSet::default()
    };
    let a = run_monte_carlo(&params, None, &mut ChaCha8Rng::seed_from_u64(2024)).unwrap();
    let b = run_monte_carlo(&params, None, &mut ChaCha8Rng::seed_from_u64(2024)).unwrap();
    assert_eq!(a, b);

    let s = &a.summary;
    assert!(s.min <= s.median && s.median <= s.max);
    assert!(s.sample_std > 0.0);
    assert!((0.0..=1.0).contains(&s.risk_probability));
    assert_eq!(a.histogram.total_count(), 20_000);
    assert_eq!(a.histogram.bins.first().unwrap().lower, s.min);
    assert_eq!(a.histogram.bins.last().unwrap().upper, s.max);
}

#[test]
fn constant_inputs_give_degenerate_histogram() {
    let params = ParameterSet {
        trial_count: 50,
        quantity_produced: 100.0,
        unit_price: 10.0,
        demand_mean: 80.0,
        demand_sd: 0.0,
        fixed_cost_mean: 100.0,
        fixed_cost_sd: 0.0,
        unit_cost_mean: 2.0,
        unit_cost_sd: 0.0,
        risk_threshold: 0.0,
    };
    let result = run_monte_carlo(&params, None, &mut ChaCha8Rng::seed_from_u64(1)).unwrap();
    // 10 * 80 - 100 - 100 * 2
    assert_eq!(result.summary.mean, 500.0);
    assert_eq!(result.summary.sample_std, 0.0);
    assert!(result.histogram.degenerate);
    assert_eq!(result.histogram.total_count(), 50);
}

#[test]
fn demand_draws_are_exact_with_zero_sd() {
    let mut rng = ChaCha8Rng::seed_from_u64(10);
    let demand = generate(1_000, 50_000.0, 0.0, &mut rng).unwrap();
    assert!(demand.iter().all(|&d| d == 50_000.0));
}

#[test]
fn invalid_inputs_are_rejected_before_sampling() {
    let mut rng = ChaCha8Rng::seed_from_u64(10);
    let zero = ParameterSet {
        trial_count: 0,
        ..ParameterSet::default()
    };
    assert!(matches!(run(&zero, &mut rng), Err(SimError::InvalidParameter { .. })));

    let negative = ParameterSet {
        unit_cost_sd: -0.5,
        ..ParameterSet::default()
    };
    let err = run(&negative, &mut rng).unwrap_err();
    assert!(err.to_string().contains("unit_cost_sd"));
    assert_eq!(rng.get_word_pos(), 0);
}

#[test]
fn single_trial_cannot_be_summarized() {
    let params = ParameterSet {
        trial_count: 1,
        ..ParameterSet::default()
    };
    let result = run_monte_carlo(&params, None, &mut ChaCha8Rng::seed_from_u64(4));
    assert!(matches!(result, Err(SimError::InsufficientSamples { .. })));
}

#[test]
fn overrides_feed_the_pipeline() {
    let overrides = Overrides {
        trials: Some(2_000),
        seed: Some(77),
        bins: Some(12),
        ..Overrides::default()
    };
    let config = config::load(None, &overrides).unwrap();
    let result = manufacturing_mc::run_seeded(&config.params, config.seed, config.bins).unwrap();
    assert_eq!(result.seed, Some(77));
    assert_eq!(result.histogram.bins.len(), 12);
    assert_eq!(result.summary.trial_count, 2_000);
}

#[test]
fn extreme_fixed_cost_spread_still_completes() {
    let params = ParameterSet {
        trial_count: 2_000,
        fixed_cost_sd: f64::MAX / 8.0,
        ..ParameterSet::default()
    };
    let result = manufacturing_mc::run_seeded(&params, Some(5), None).unwrap();
    let hist = &result.histogram;
    assert_eq!(hist.total_count() + hist.non_finite, 2_000);
    assert!(!hist.bins.is_empty());
    assert!(hist.bins.iter().all(|b| b.lower.is_finite() && b.upper.is_finite()));
}
