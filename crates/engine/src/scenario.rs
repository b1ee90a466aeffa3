//! What-if scenario simulator.
//!
//! A single-shot deterministic recompute: given multiplicative adjustments to
//! average price, average promo depth, and per-channel spend, the simulator
//! derives elasticity-scaled deltas, folds them into one multiplicative lift
//! factor on the window's incremental revenue, and reports a fixed ±5%
//! uncertainty band. There is no iteration or convergence loop.

use crate::transforms::saturation;
use mixboard_core::{Channel, ChannelMap, MixResult, MixboardError, WeeklyRecord};
use serde::{Deserialize, Serialize};

/// Reported band around the simulated total revenue.
const UNCERTAINTY_FACTOR: f64 = 0.05;

/// Assumed response parameters. In a production analog these would come from
/// model estimation; per-channel Hill shapes and lift coefficients come from
/// [`Channel::params`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub price_elasticity: f64,
    pub promo_elasticity: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            price_elasticity: -1.5,
            promo_elasticity: 0.8,
        }
    }
}

/// Multiplicative adjustments relative to the window's averages. A value of
/// 1.0 everywhere reproduces the observed window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInputs {
    #[serde(default = "one")]
    pub price_multiplier: f64,
    #[serde(default = "one")]
    pub promo_depth_multiplier: f64,
    #[serde(default = "unit_map")]
    pub spend_multipliers: ChannelMap,
}

fn one() -> f64 {
    1.0
}

fn unit_map() -> ChannelMap {
    ChannelMap::splat(1.0)
}

impl Default for ScenarioInputs {
    fn default() -> Self {
        Self {
            price_multiplier: 1.0,
            promo_depth_multiplier: 1.0,
            spend_multipliers: unit_map(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub base_incremental_revenue: f64,
    pub base_total_revenue: f64,
    /// `1 + price delta + promo delta + media delta`.
    pub lift_factor: f64,
    pub simulated_incremental_revenue: f64,
    pub simulated_total_revenue: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Simulate revenue for an adjusted scenario over a non-empty window.
pub fn simulate(
    window: &[WeeklyRecord],
    inputs: &ScenarioInputs,
    params: &SimulationParams,
) -> MixResult<ScenarioOutcome> {
    if window.is_empty() {
        return Err(MixboardError::EmptyWindow(
            "scenario simulation requires at least one record".to_string(),
        ));
    }

    let n = window.len() as f64;
    let avg_price = window.iter().map(|r| r.price).sum::<f64>() / n;
    let avg_promo_pct = window.iter().map(|r| r.promo_discount_pct).sum::<f64>() / n;
    let baseline_revenue: f64 = window.iter().map(|r| r.baseline_sales * r.price).sum();
    let incremental_revenue: f64 = window
        .iter()
        .map(|r| (r.media_contribution_total + r.promo_effect) * r.price)
        .sum();

    // Price and promo deltas relative to the window averages.
    let sim_price = avg_price * inputs.price_multiplier;
    let price_delta = (sim_price - avg_price) / avg_price * params.price_elasticity;

    let sim_promo = avg_promo_pct * inputs.promo_depth_multiplier;
    let promo_delta = (sim_promo - avg_promo_pct) * params.promo_elasticity;

    // Media delta: saturation shift at the adjusted window-total spend,
    // scaled by the channel's lift coefficient.
    let mut media_delta = 0.0;
    for channel in Channel::ALL {
        let p = channel.params();
        let base_spend: f64 = window.iter().map(|r| r.spend.get(channel)).sum();
        let sim_spend = base_spend * inputs.spend_multipliers.get(channel);

        let base_sat = saturation(base_spend, p.saturation_alpha, p.saturation_k);
        let sim_sat = saturation(sim_spend, p.saturation_alpha, p.saturation_k);
        media_delta += (sim_sat - base_sat) * p.media_coeff;
    }

    let lift_factor = 1.0 + price_delta + promo_delta + media_delta;
    let simulated_incremental_revenue = incremental_revenue * lift_factor;
    let simulated_total_revenue = baseline_revenue + simulated_incremental_revenue;

    Ok(ScenarioOutcome {
        base_incremental_revenue: incremental_revenue,
        base_total_revenue: baseline_revenue + incremental_revenue,
        lift_factor,
        simulated_incremental_revenue,
        simulated_total_revenue,
        lower_bound: simulated_total_revenue * (1.0 - UNCERTAINTY_FACTOR),
        upper_bound: simulated_total_revenue * (1.0 + UNCERTAINTY_FACTOR),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::series;

    fn window_with_media() -> Vec<WeeklyRecord> {
        let mut data = series(10);
        for r in &mut data {
            r.spend.search = 1_000.0;
            r.spend.social = 2_000.0;
            r.media_contribution_total = 400.0;
            r.promo_effect = 100.0;
        }
        data
    }

    #[test]
    fn test_identity_inputs_reproduce_base() {
        let data = window_with_media();
        let outcome = simulate(&data, &ScenarioInputs::default(), &SimulationParams::default())
            .unwrap();
        assert!((outcome.lift_factor - 1.0).abs() < 1e-12);
        assert!(
            (outcome.simulated_incremental_revenue - outcome.base_incremental_revenue).abs()
                < 1e-9
        );
        assert!((outcome.simulated_total_revenue - outcome.base_total_revenue).abs() < 1e-9);
    }

    #[test]
    fn test_price_increase_reduces_lift() {
        let data = window_with_media();
        let inputs = ScenarioInputs {
            price_multiplier: 1.1,
            ..Default::default()
        };
        let outcome = simulate(&data, &inputs, &SimulationParams::default()).unwrap();
        // 10% price increase at elasticity -1.5 -> -15% lift.
        assert!((outcome.lift_factor - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_spend_increase_raises_lift() {
        let data = window_with_media();
        let inputs = ScenarioInputs {
            spend_multipliers: ChannelMap {
                social: 1.5,
                ..ChannelMap::splat(1.0)
            },
            ..Default::default()
        };
        let outcome = simulate(&data, &inputs, &SimulationParams::default()).unwrap();
        assert!(outcome.lift_factor > 1.0);
    }

    #[test]
    fn test_spend_cut_lowers_lift() {
        let data = window_with_media();
        let inputs = ScenarioInputs {
            spend_multipliers: ChannelMap {
                search: 0.0,
                ..ChannelMap::splat(1.0)
            },
            ..Default::default()
        };
        let outcome = simulate(&data, &inputs, &SimulationParams::default()).unwrap();
        assert!(outcome.lift_factor < 1.0);
    }

    #[test]
    fn test_uncertainty_band_is_five_percent() {
        let data = window_with_media();
        let outcome = simulate(&data, &ScenarioInputs::default(), &SimulationParams::default())
            .unwrap();
        assert!((outcome.lower_bound - outcome.simulated_total_revenue * 0.95).abs() < 1e-9);
        assert!((outcome.upper_bound - outcome.simulated_total_revenue * 1.05).abs() < 1e-9);
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let data = window_with_media();
        let inputs = ScenarioInputs {
            price_multiplier: 0.9,
            promo_depth_multiplier: 2.0,
            spend_multipliers: ChannelMap::splat(1.2),
        };
        let a = simulate(&data, &inputs, &SimulationParams::default()).unwrap();
        let b = simulate(&data, &inputs, &SimulationParams::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_window_rejected() {
        assert!(simulate(&[], &ScenarioInputs::default(), &SimulationParams::default()).is_err());
    }
}
