//! Shared fixtures for engine unit tests.

use chrono::{Duration, NaiveDate};
use mixboard_core::{ChannelMap, WeeklyRecord};

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// A neutral weekly record: flat price, no promo, no media.
pub fn record(week: u32) -> WeeklyRecord {
    WeeklyRecord {
        week,
        date: start_date() + Duration::weeks(week as i64 - 1),
        price: 20.0,
        competitor_price: 20.0,
        cost_of_goods: 8.0,
        gross_margin: 0.6,
        promo_flag: false,
        promo_discount_pct: 0.0,
        sales: 1_000.0,
        predicted_sales: 1_000.0,
        baseline_sales: 900.0,
        spend: ChannelMap::default(),
        contribution: ChannelMap::default(),
        media_contribution_total: 0.0,
        price_effect: 0.0,
        promo_effect: 0.0,
        competition_effect: 0.0,
        distribution_score: 80.0,
        market_share: 0.2,
        seasonality_index: 1.0,
        competitor_promos: false,
    }
}

/// `n` consecutive neutral weeks.
pub fn series(n: u32) -> Vec<WeeklyRecord> {
    (1..=n).map(record).collect()
}
