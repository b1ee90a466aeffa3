//! Chart-facing response curves: per-channel saturation grids and
//! price/revenue/profit curves from the linear demand fit.

use crate::kpi::DemandFit;
use crate::transforms::saturation;
use mixboard_core::{Channel, MixResult, MixboardError};
use serde::{Deserialize, Serialize};

/// Price grid spans `[0.5, 1.5] * avg_price`.
const PRICE_GRID_LOW_MULT: f64 = 0.5;
const PRICE_GRID_HIGH_MULT: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaturationCurve {
    pub channel: Channel,
    /// `(adstocked spend, response in [0,1))` pairs.
    pub points: Vec<(f64, f64)>,
}

/// One sample on the linear-demand price grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: f64,
    pub demand: f64,
    pub revenue: f64,
    pub profit: f64,
}

/// Sample a channel's Hill curve on `points` evenly spaced spend levels from
/// zero to `max_spend`.
pub fn saturation_curve(
    channel: Channel,
    max_spend: f64,
    points: usize,
) -> MixResult<SaturationCurve> {
    if points < 2 {
        return Err(MixboardError::InvalidParameter(
            "saturation curve needs at least 2 points".to_string(),
        ));
    }
    if max_spend.is_nan() || max_spend <= 0.0 {
        return Err(MixboardError::InvalidParameter(
            "saturation curve max_spend must be positive".to_string(),
        ));
    }

    let params = channel.params();
    let step = max_spend / (points - 1) as f64;
    let points = (0..points)
        .map(|i| {
            let spend = i as f64 * step;
            (
                spend,
                saturation(spend, params.saturation_alpha, params.saturation_k),
            )
        })
        .collect();

    Ok(SaturationCurve { channel, points })
}

/// Demand, revenue, and unit profit over a price grid around the window's
/// average price, using the fitted linear demand curve and average unit cost.
pub fn price_curve(fit: &DemandFit, points: usize) -> MixResult<Vec<PricePoint>> {
    if points < 2 {
        return Err(MixboardError::InvalidParameter(
            "price curve needs at least 2 points".to_string(),
        ));
    }

    let low = fit.avg_price * PRICE_GRID_LOW_MULT;
    let high = fit.avg_price * PRICE_GRID_HIGH_MULT;
    let step = (high - low) / (points - 1) as f64;

    Ok((0..points)
        .map(|i| {
            let price = low + i as f64 * step;
            let demand = fit.demand_at(price);
            PricePoint {
                price,
                demand,
                revenue: price * demand,
                profit: (price - fit.avg_cost) * demand,
            }
        })
        .collect())
}
