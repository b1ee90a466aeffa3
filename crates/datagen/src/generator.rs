//! Synthetic weekly series generator.
//!
//! Structure mirrors a fitted marketing-mix model run in reverse: draw
//! independent variables (spend, price, promo, market context), push spend
//! through per-channel adstock and Hill saturation, then assemble sales from
//! baseline, media contributions, and price/promo/competition effects plus
//! observation noise.

use chrono::{Datelike, Duration, NaiveDate};
use mixboard_core::{Channel, ChannelMap, WeeklyRecord};
use mixboard_engine::transforms::{adstock, saturation_series};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

const BASE_PRICE: f64 = 19.99;
const COST_RATIO: f64 = 0.4;
const PROMO_PROBABILITY: f64 = 0.25;
const COMPETITOR_PROMO_PROBABILITY: f64 = 0.3;
/// Weekly baseline sales at week zero, before trend and seasonality.
const BASELINE_LEVEL: f64 = 20_000.0;
/// Linear baseline growth per week.
const BASELINE_TREND: f64 = 50.0;
const PRICE_EFFECT_SLOPE: f64 = -3_000.0;
const PROMO_EFFECT_SCALE: f64 = 50_000.0;
const COMPETITION_EFFECT_SLOPE: f64 = 800.0;
/// Sales observation noise, ±2.5%.
const NOISE_SPREAD: f64 = 0.05;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub weeks: u32,
    pub seed: u64,
    /// Date of the final (most recent) week.
    pub anchor: NaiveDate,
}

impl GeneratorConfig {
    pub fn new(weeks: u32, seed: u64, anchor: NaiveDate) -> Self {
        Self { weeks, seed, anchor }
    }
}

/// Campaign-flight multiplier for a channel during the last four weeks of
/// each 26-week block (quarterly pushes).
fn quarterly_multiplier(channel: Channel) -> f64 {
    match channel {
        Channel::Search => 1.5,
        Channel::Social => 1.8,
        Channel::Video => 1.7,
        Channel::Ooh => 1.4,
        _ => 1.0,
    }
}

/// Holiday-season multiplier, applied to weeks 46-52 of each calendar year.
fn holiday_multiplier(channel: Channel) -> f64 {
    match channel {
        Channel::Search => 2.0,
        Channel::Social => 2.5,
        Channel::Display => 1.5,
        Channel::Video => 2.2,
        Channel::Trade => 1.8,
        _ => 1.0,
    }
}

fn is_holiday_week(date: NaiveDate) -> bool {
    (46..=52).contains(&date.iso_week().week())
}

/// Generate a chronologically ordered, gap-free weekly series.
///
/// Deterministic for a given config: the same seed, week count, and anchor
/// always produce the same records.
pub fn generate(config: &GeneratorConfig) -> Vec<WeeklyRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let weeks = config.weeks as usize;
    let first_date = config.anchor - Duration::weeks(config.weeks as i64 - 1);

    // 1. Independent variables, drawn chronologically.
    let mut spend: Vec<ChannelMap> = Vec::with_capacity(weeks);
    for i in 0..weeks {
        let date = first_date + Duration::weeks(i as i64);
        let in_quarterly_flight = i % 26 >= 22;
        let in_holiday = is_holiday_week(date);
        spend.push(ChannelMap::from_fn(|channel| {
            let p = channel.params();
            let mut s = p.weekly_spend_min + rng.gen::<f64>() * p.weekly_spend_spread;
            if in_quarterly_flight {
                s *= quarterly_multiplier(channel);
            }
            if in_holiday {
                s *= holiday_multiplier(channel);
            }
            s
        }));
    }

    struct Draw {
        price: f64,
        competitor_price: f64,
        promo_flag: bool,
        promo_discount_pct: f64,
        distribution_score: f64,
        market_share: f64,
        competitor_promos: bool,
    }

    let draws: Vec<Draw> = (0..weeks)
        .map(|i| {
            let price = BASE_PRICE
                + (i as f64 / 10.0).sin() * 2.0
                + (rng.gen::<f64>() - 0.5) * 2.0;
            let competitor_price = price * (1.0 + (rng.gen::<f64>() - 0.5) * 0.2);
            let promo_flag = rng.gen::<f64>() < PROMO_PROBABILITY;
            let promo_discount_pct = if promo_flag {
                0.1 + rng.gen::<f64>() * 0.15
            } else {
                0.0
            };
            Draw {
                price,
                competitor_price,
                promo_flag,
                promo_discount_pct,
                distribution_score: 75.0
                    + (i as f64 / 20.0).sin() * 10.0
                    + rng.gen::<f64>() * 5.0,
                market_share: 0.2 + rng.gen::<f64>() * 0.05,
                competitor_promos: rng.gen::<f64>() < COMPETITOR_PROMO_PROBABILITY,
            }
        })
        .collect();

    // 2. Media response: adstock then saturation, per channel.
    let mut saturated: Vec<(Channel, Vec<f64>)> = Vec::with_capacity(Channel::ALL.len());
    for channel in Channel::ALL {
        let p = channel.params();
        let raw: Vec<f64> = spend.iter().map(|s| s.get(channel)).collect();
        let adstocked = adstock(&raw, p.adstock_decay);
        saturated.push((
            channel,
            saturation_series(&adstocked, p.saturation_alpha, p.saturation_k),
        ));
    }

    let avg_price = draws.iter().map(|d| d.price).sum::<f64>() / weeks as f64;
    let avg_competitor_price =
        draws.iter().map(|d| d.competitor_price).sum::<f64>() / weeks as f64;

    // 3. Dependent variables and decomposition.
    let mut records = Vec::with_capacity(weeks);
    for (i, d) in draws.iter().enumerate() {
        let date = first_date + Duration::weeks(i as i64);

        let mut seasonality_index =
            1.0 + ((i as f64 / 52.0) * std::f64::consts::TAU - std::f64::consts::FRAC_PI_2).sin()
                * 0.2;
        if is_holiday_week(date) {
            seasonality_index += 0.3;
        }

        let baseline_sales = (BASELINE_LEVEL + i as f64 * BASELINE_TREND)
            * seasonality_index
            * (d.distribution_score / 80.0);

        let contribution = ChannelMap::from_fn(|channel| {
            let sat = saturated
                .iter()
                .find(|(c, _)| *c == channel)
                .map(|(_, values)| values[i])
                .unwrap_or(0.0);
            sat * channel.params().contribution_scale
        });
        let media_contribution_total = contribution.total();

        let price_effect = (d.price - avg_price) * PRICE_EFFECT_SLOPE;
        let promo_effect = d.promo_discount_pct * PROMO_EFFECT_SCALE;
        let competition_effect =
            (d.competitor_price - avg_competitor_price) * COMPETITION_EFFECT_SLOPE;

        let predicted_sales = baseline_sales
            + media_contribution_total
            + price_effect
            + promo_effect
            + competition_effect;
        let noise = 1.0 + (rng.gen::<f64>() - 0.5) * NOISE_SPREAD;
        let sales = (predicted_sales * noise).round().max(0.0);

        let cost_of_goods = d.price * COST_RATIO;

        records.push(WeeklyRecord {
            week: i as u32 + 1,
            date,
            price: d.price,
            competitor_price: d.competitor_price,
            cost_of_goods,
            gross_margin: (d.price - cost_of_goods) / d.price,
            promo_flag: d.promo_flag,
            promo_discount_pct: d.promo_discount_pct,
            sales,
            predicted_sales,
            baseline_sales,
            spend: spend[i],
            contribution,
            media_contribution_total,
            price_effect,
            promo_effect,
            competition_effect,
            distribution_score: d.distribution_score,
            market_share: d.market_share,
            seasonality_index,
            competitor_promos: d.competitor_promos,
        });
    }

    info!(
        weeks = records.len(),
        seed = config.seed,
        from = %records.first().map(|r| r.date).unwrap_or(config.anchor),
        to = %config.anchor,
        "Synthetic dataset generated"
    );

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GeneratorConfig {
        GeneratorConfig::new(104, 42, NaiveDate::from_ymd_opt(2025, 12, 29).unwrap())
    }

    #[test]
    fn test_deterministic_for_same_seed() {
        assert_eq!(generate(&config()), generate(&config()));
    }

    #[test]
    fn test_seed_changes_output() {
        let mut other = config();
        other.seed = 7;
        assert_ne!(generate(&config()), generate(&other));
    }

    #[test]
    fn test_chronological_gap_free_weekly_sequence() {
        let data = generate(&config());
        assert_eq!(data.len(), 104);
        for (i, r) in data.iter().enumerate() {
            assert_eq!(r.week, i as u32 + 1);
        }
        for pair in data.windows(2) {
            assert_eq!(pair[1].date - pair[0].date, Duration::weeks(1));
        }
        assert_eq!(data.last().unwrap().date, config().anchor);
    }

    #[test]
    fn test_promo_policy_holds_at_generation_time() {
        let data = generate(&config());
        for r in &data {
            if r.promo_flag {
                assert!(r.promo_discount_pct >= 0.1 && r.promo_discount_pct <= 0.25);
            } else {
                assert_eq!(r.promo_discount_pct, 0.0);
            }
        }
    }

    #[test]
    fn test_value_ranges() {
        let data = generate(&config());
        for r in &data {
            assert!(r.sales >= 0.0);
            assert!(r.price > 0.0);
            assert!(r.cost_of_goods < r.price);
            assert!((0.0..1.0).contains(&r.gross_margin));
            for (_, s) in r.spend.iter() {
                assert!(s >= 0.0);
            }
            for (_, c) in r.contribution.iter() {
                assert!(c >= 0.0);
            }
        }
    }

    #[test]
    fn test_contribution_total_matches_channel_sum() {
        let data = generate(&config());
        for r in &data {
            assert!((r.media_contribution_total - r.contribution.total()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_decomposition_reconstructs_predicted_sales() {
        let data = generate(&config());
        for r in &data {
            let rebuilt = r.baseline_sales
                + r.media_contribution_total
                + r.price_effect
                + r.promo_effect
                + r.competition_effect;
            assert!((r.predicted_sales - rebuilt).abs() < 1e-6);
        }
    }

    #[test]
    fn test_holiday_weeks_carry_spend_lift() {
        let data = generate(&config());
        let (holiday, regular): (Vec<_>, Vec<_>) =
            data.iter().partition(|r| is_holiday_week(r.date));
        assert!(!holiday.is_empty());
        let avg = |rs: &[&WeeklyRecord]| {
            rs.iter().map(|r| r.spend.social).sum::<f64>() / rs.len() as f64
        };
        assert!(avg(&holiday) > avg(&regular));
    }
}
