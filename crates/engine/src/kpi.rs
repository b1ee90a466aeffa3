//! KPI aggregation over a contiguous window of weekly records.

use mixboard_core::{Kpi, MixResult, MixboardError, WeeklyRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Plausible band for the revenue-maximizing price. A regression optimum
/// outside this band is treated as degenerate and replaced with
/// `avg_price * 1.1`.
const REVENUE_OPTIMUM_BAND: (f64, f64) = (0.0, 50.0);

/// Plausible band for the profit-maximizing price; fallback is
/// `avg_price * 1.25`.
const PROFIT_OPTIMUM_BAND: (f64, f64) = (0.0, 60.0);

/// Linear demand approximation `Q = intercept - slope * P`, anchored at the
/// window's average price and sales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandFit {
    pub intercept: f64,
    pub slope: f64,
    /// OLS slope of `log(sales)` on `log(price)` over the window.
    pub elasticity: f64,
    pub avg_price: f64,
    pub avg_sales: f64,
    pub avg_cost: f64,
}

/// Fit the log-log elasticity regression and derive the linear demand
/// approximation anchored at window averages.
///
/// Non-positive prices or sales make the log-log regression undefined; the
/// resulting NaN/infinity propagates through the fit rather than being
/// silently zeroed. Likewise an all-equal-price window has a zero regression
/// denominator and yields NaN.
pub fn fit_linear_demand(window: &[WeeklyRecord]) -> MixResult<DemandFit> {
    if window.is_empty() {
        return Err(MixboardError::EmptyWindow(
            "demand fit requires at least one record".to_string(),
        ));
    }

    let n = window.len() as f64;
    let mut sum_log_p = 0.0;
    let mut sum_log_q = 0.0;
    let mut sum_log_p_sq = 0.0;
    let mut sum_log_pq = 0.0;
    for r in window {
        let log_p = r.price.ln();
        let log_q = r.sales.ln();
        sum_log_p += log_p;
        sum_log_q += log_q;
        sum_log_p_sq += log_p * log_p;
        sum_log_pq += log_p * log_q;
    }

    let elasticity =
        (n * sum_log_pq - sum_log_p * sum_log_q) / (n * sum_log_p_sq - sum_log_p * sum_log_p);

    let avg_price = window.iter().map(|r| r.price).sum::<f64>() / n;
    let avg_sales = window.iter().map(|r| r.sales).sum::<f64>() / n;
    let avg_cost = window.iter().map(|r| r.cost_of_goods).sum::<f64>() / n;

    let slope = -elasticity * (avg_sales / avg_price);
    let intercept = avg_sales + slope * avg_price;

    Ok(DemandFit {
        intercept,
        slope,
        elasticity,
        avg_price,
        avg_sales,
        avg_cost,
    })
}

impl DemandFit {
    /// Demand at a given price on the linear curve, floored at zero.
    pub fn demand_at(&self, price: f64) -> f64 {
        (self.intercept - self.slope * price).max(0.0)
    }

    /// Revenue-maximizing price `a / (2b)` on the linear demand curve.
    pub fn revenue_optimum(&self) -> f64 {
        self.intercept / (2.0 * self.slope)
    }

    /// Profit-maximizing price `(a + b * avg_cost) / (2b)`.
    pub fn profit_optimum(&self) -> f64 {
        (self.intercept + self.slope * self.avg_cost) / (2.0 * self.slope)
    }
}

/// A NaN optimum fails the band check and takes the fallback.
fn clamp_to_band(value: f64, band: (f64, f64), fallback: f64) -> f64 {
    if value > band.0 && value < band.1 {
        value
    } else {
        fallback
    }
}

/// Compute the ten headline KPIs over a non-empty window.
///
/// Deterministic and side-effect free: the same window always yields
/// bit-identical output. Expected-degenerate inputs (zero spend, no promo
/// weeks, singular regressions) resolve to documented fallbacks instead of
/// errors; only an empty window is rejected.
pub fn compute_kpis(window: &[WeeklyRecord]) -> MixResult<Kpi> {
    if window.is_empty() {
        return Err(MixboardError::EmptyWindow(
            "KPI aggregation requires at least one record".to_string(),
        ));
    }

    let total_revenue: f64 = window.iter().map(|r| r.sales * r.price).sum();
    let baseline_revenue: f64 = window.iter().map(|r| r.baseline_sales * r.price).sum();
    let incremental_revenue: f64 = window
        .iter()
        .map(|r| (r.media_contribution_total + r.promo_effect) * r.price)
        .sum();

    // Digital channels only; OOH and trade are excluded from this aggregate.
    let total_marketing_spend: f64 = window.iter().map(|r| r.spend.digital_total()).sum();

    let total_roas = if total_marketing_spend > 0.0 {
        incremental_revenue / total_marketing_spend
    } else {
        0.0
    };

    let fit = fit_linear_demand(window)?;

    let optimal_price_revenue = clamp_to_band(
        fit.revenue_optimum(),
        REVENUE_OPTIMUM_BAND,
        fit.avg_price * 1.1,
    );
    let optimal_price_profit = clamp_to_band(
        fit.profit_optimum(),
        PROFIT_OPTIMUM_BAND,
        fit.avg_price * 1.25,
    );

    // Promo uplift: average promo-week sales vs average non-promo-week sales.
    let (promo_sales, promo_weeks, non_promo_sales, non_promo_weeks) = window.iter().fold(
        (0.0, 0u32, 0.0, 0u32),
        |(ps, pw, ns, nw), r| {
            if r.promo_flag {
                (ps + r.sales, pw + 1, ns, nw)
            } else {
                (ps, pw, ns + r.sales, nw + 1)
            }
        },
    );
    let avg_promo_sales = if promo_weeks > 0 {
        promo_sales / promo_weeks as f64
    } else {
        0.0
    };
    let avg_non_promo_sales = if non_promo_weeks > 0 {
        non_promo_sales / non_promo_weeks as f64
    } else {
        0.0
    };
    // Uplift is only defined when both groups are populated.
    let promo_uplift = if promo_weeks > 0 && avg_non_promo_sales > 0.0 {
        (avg_promo_sales - avg_non_promo_sales) / avg_non_promo_sales
    } else {
        0.0
    };

    let competitor_price_pressure_index = window
        .iter()
        .map(|r| (r.price / r.competitor_price - 1.0) * r.competition_effect)
        .sum::<f64>()
        / window.len() as f64
        / 1_000.0;

    debug!(
        weeks = window.len(),
        total_revenue,
        total_roas,
        elasticity = fit.elasticity,
        "KPI window aggregated"
    );

    Ok(Kpi {
        total_revenue,
        baseline_revenue,
        incremental_revenue,
        total_marketing_spend,
        total_roas,
        price_elasticity: fit.elasticity,
        optimal_price_revenue,
        optimal_price_profit,
        promo_uplift,
        competitor_price_pressure_index,
    })
}
