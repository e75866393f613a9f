//! Controlled Process Integration Tests
//!
//! Exercise the full pipeline (policy -> increments -> simulator -> path)
//! against the properties every run must satisfy:
//! 1. Band membership after each step
//! 2. Non-decreasing cost ledgers
//! 3. Deterministic behaviour without noise and with a fixed seed
//! 4. Exact adjustment cost on each barrier hit
//!
//! All tests are deterministic (seeded or scripted increments).

use approx::assert_relative_eq;

use band_control::config::Config;
use band_control::ports::{IncrementSource, ScriptedIncrements};
use band_control::{
    Adjustment, AdjustmentCosts, ControlPolicy, GaussianIncrements, HoldingCost,
    SimulationError, SimulationParams, Simulator, Thresholds,
};

// ============================================================================
// Test Fixtures
// ============================================================================

/// u=0.5, U=0.2, D=-0.2, d=-0.5; k=0.1, K=1 (lower), l=0.1, L=1 (upper); h(x)=x^2
fn reference_policy() -> ControlPolicy {
    ControlPolicy::new(
        Thresholds::new(0.5, 0.2, -0.2, -0.5),
        AdjustmentCosts::new(0.1, 1.0, 0.1, 1.0),
        HoldingCost::quadratic(),
    )
    .unwrap()
}

/// Draw `n` seeded increments so tests can see the tentative values
fn seeded_increments(seed: u64, n: usize, params: &SimulationParams) -> Vec<f64> {
    let mut source = GaussianIncrements::new(seed).unwrap();
    (0..n)
        .map(|_| {
            source
                .next_increment(params.step_size(), params.volatility, params.drift)
                .unwrap()
        })
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_band_invariant_holds_on_every_step() {
    let policy = reference_policy();
    let params = SimulationParams::default().with_steps(5000).with_horizon(5.0);
    let increments = seeded_increments(17, params.steps - 1, &params);

    let sim = Simulator::new(policy.clone(), params).unwrap();
    let path = sim
        .run_with(ScriptedIncrements::new(increments.iter().copied()))
        .unwrap();

    assert_eq!(path.len(), params.steps);

    let mut jumps = 0;
    for i in 1..path.len() {
        let tentative = path.values[i - 1] + increments[i - 1];
        let value = path.values[i];

        if tentative >= policy.upper_barrier() {
            assert_eq!(value, policy.upper_target(), "step {}", i);
            assert_eq!(path.adjustments[i], Adjustment::Down);
            jumps += 1;
        } else if tentative <= policy.lower_barrier() {
            assert_eq!(value, policy.lower_target(), "step {}", i);
            assert_eq!(path.adjustments[i], Adjustment::Up);
            jumps += 1;
        } else {
            assert_eq!(value, tentative, "step {}", i);
            assert_eq!(path.adjustments[i], Adjustment::None);
        }

        assert!(value > policy.lower_barrier() && value < policy.upper_barrier());
    }

    // sigma=1 over T=5 must hit a barrier half a unit away
    assert!(jumps > 0);
}

#[test]
fn test_cost_ledgers_are_non_decreasing() {
    let params = SimulationParams::default()
        .with_steps(3000)
        .with_drift(0.8)
        .with_seed(5);
    let path = Simulator::new(reference_policy(), params).unwrap().run().unwrap();

    for i in 1..path.len() {
        assert!(path.adjustment_costs[i] >= path.adjustment_costs[i - 1]);
        assert!(path.holding_costs[i] >= path.holding_costs[i - 1]);
    }
}

#[test]
fn test_zero_noise_stays_at_origin() {
    let policy = ControlPolicy::new(
        Thresholds::default(),
        AdjustmentCosts::default(),
        HoldingCost::custom(|x| x * x + 0.5),
    )
    .unwrap();
    let params = SimulationParams::default()
        .with_steps(200)
        .with_volatility(0.0)
        .with_drift(0.0);

    let path = Simulator::new(policy, params).unwrap().run().unwrap();

    assert_eq!(path.len(), 200);
    for i in 0..path.len() {
        assert_eq!(path.values[i], 0.0);
        assert_eq!(path.adjustment_costs[i], 0.0);
        assert_eq!(path.holding_costs[i], 0.5 * i as f64);
    }
}

#[test]
fn test_same_seed_reproduces_path_bit_for_bit() {
    let params = SimulationParams::default().with_seed(2024);
    let a = Simulator::new(reference_policy(), params).unwrap().run().unwrap();
    let b = Simulator::new(reference_policy(), params).unwrap().run().unwrap();

    let bits = |xs: &[f64]| xs.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a.values), bits(&b.values));
    assert_eq!(bits(&a.adjustment_costs), bits(&b.adjustment_costs));
    assert_eq!(bits(&a.holding_costs), bits(&b.holding_costs));

    let c = Simulator::new(reference_policy(), params.with_seed(2025))
        .unwrap()
        .run()
        .unwrap();
    assert_ne!(a.values, c.values);
}

#[test]
fn test_adjustment_cost_increment_on_each_jump() {
    let policy = reference_policy();
    let params = SimulationParams::default().with_steps(4000).with_horizon(4.0).with_seed(99);
    let path = Simulator::new(policy.clone(), params).unwrap().run().unwrap();

    let up_barrier_cost = 1.0 + (0.5 - 0.2) * 0.1;
    let low_barrier_cost = 1.0 + (0.5 - 0.2) * 0.1;

    for i in 1..path.len() {
        let delta = path.adjustment_costs[i] - path.adjustment_costs[i - 1];
        match path.adjustments[i] {
            Adjustment::Down => assert_relative_eq!(delta, up_barrier_cost, epsilon = 1e-9),
            Adjustment::Up => assert_relative_eq!(delta, low_barrier_cost, epsilon = 1e-9),
            Adjustment::None => assert_eq!(delta, 0.0),
        }
    }

    let summary = path.summary(params.horizon);
    let jumps = summary.up_adjustments + summary.down_adjustments;
    assert_relative_eq!(summary.adjustment_cost, jumps as f64 * 1.03, epsilon = 1e-9);
}

#[test]
fn test_downward_reset_cost_scaled_by_upper_gap() {
    // Asymmetric bands: u - U = 0.1, D - d = 0.7
    let policy = ControlPolicy::new(
        Thresholds::new(0.3, 0.2, -0.1, -0.8),
        AdjustmentCosts::new(0.0, 0.0, 2.0, 0.5),
        HoldingCost::quadratic(),
    )
    .unwrap();
    let params = SimulationParams::default().with_steps(2);
    let path = Simulator::new(policy, params)
        .unwrap()
        .run_with(ScriptedIncrements::new([-1.0]))
        .unwrap();

    assert_eq!(path.values[1], -0.1);
    assert_relative_eq!(path.adjustment_costs[1], 0.5 + 0.1 * 2.0, epsilon = 1e-12);
}

#[test]
fn test_invalid_policies_construct_nothing() {
    let inverted = ControlPolicy::new(
        Thresholds::new(0.5, -0.2, 0.2, -0.5),
        AdjustmentCosts::default(),
        HoldingCost::quadratic(),
    );
    assert!(matches!(inverted, Err(SimulationError::Configuration(_))));

    let collapsed_upper = ControlPolicy::new(
        Thresholds::new(0.2, 0.2, -0.2, -0.5),
        AdjustmentCosts::default(),
        HoldingCost::quadratic(),
    );
    assert!(matches!(collapsed_upper, Err(SimulationError::Configuration(_))));
}

#[test]
fn test_end_to_end_upper_barrier_scenario() {
    let params = SimulationParams::default().with_steps(3);
    let sim = Simulator::new(reference_policy(), params).unwrap();
    let source = ScriptedIncrements::new([0.6, -0.1]);

    let path = sim.run_with(source.clone()).unwrap();

    assert_eq!(path.values[0], 0.0);
    assert_eq!(path.adjustment_costs[0], 0.0);
    assert_eq!(path.holding_costs[0], 0.0);

    // v' = 0.6 >= u: reset to U = 0.2
    assert_eq!(path.values[1], 0.2);
    assert_relative_eq!(path.adjustment_costs[1], 1.03, epsilon = 1e-12);
    assert_relative_eq!(path.holding_costs[1], 0.04, epsilon = 1e-12);
    assert_eq!(path.adjustments[1], Adjustment::Down);

    assert_relative_eq!(path.values[2], 0.1, epsilon = 1e-12);
    assert_relative_eq!(path.adjustment_costs[2], 1.03, epsilon = 1e-12);
    assert_relative_eq!(path.holding_costs[2], 0.05, epsilon = 1e-12);

    // One draw per step after the seeded index 0
    let calls = source.get_calls();
    assert_eq!(calls.len(), 2);
    assert_relative_eq!(calls[0].0, 1.0 / 3.0, epsilon = 1e-15);
}

#[test]
fn test_non_finite_increment_fails_run() {
    let sim = Simulator::new(reference_policy(), SimulationParams::default().with_steps(5)).unwrap();
    let result = sim.run_with(ScriptedIncrements::new([0.1, 0.1, f64::NAN, 0.1]));
    assert!(matches!(result, Err(SimulationError::Numeric { step: 3, .. })));
}

#[test]
fn test_incremental_iterator_matches_full_run() {
    let params = SimulationParams::default().with_steps(250).with_seed(8);
    let sim = Simulator::new(reference_policy(), params).unwrap();

    let full = sim.run().unwrap();
    let source = GaussianIncrements::new(params.seed).unwrap();
    let records: Vec<_> = sim.steps(source).collect::<Result<_, _>>().unwrap();

    assert_eq!(records.len(), full.len());
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.state.step_index, i);
        assert_eq!(Some(*record), full.record(i));
    }
}

#[test]
fn test_default_config_builds_reference_run() {
    let config = Config::from_toml_str("[process]\nsteps = 100\nseed = 3\n").unwrap();
    let policy = config.to_policy().unwrap();
    let params = config.to_params().unwrap();

    assert_eq!(policy.thresholds(), reference_policy().thresholds());
    assert_eq!(policy.costs(), reference_policy().costs());
    assert_eq!(params.steps, 100);

    let path = Simulator::new(policy, params).unwrap().run().unwrap();
    assert_eq!(path.len(), 100);
    assert_eq!(path.times(params.horizon).last().copied(), Some(1.0));
}
