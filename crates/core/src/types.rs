use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Media channels modeled by the marketing mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Search,
    Social,
    Display,
    Video,
    Affiliate,
    Ooh,
    Trade,
}

impl Channel {
    /// All seven modeled channels, in canonical order.
    pub const ALL: [Channel; 7] = [
        Channel::Search,
        Channel::Social,
        Channel::Display,
        Channel::Video,
        Channel::Affiliate,
        Channel::Ooh,
        Channel::Trade,
    ];

    /// The five digitally-bought channels. The headline marketing-spend KPI
    /// aggregates only these; OOH and trade are tracked but excluded from it.
    pub const DIGITAL: [Channel; 5] = [
        Channel::Search,
        Channel::Social,
        Channel::Display,
        Channel::Video,
        Channel::Affiliate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Search => "search",
            Channel::Social => "social",
            Channel::Display => "display",
            Channel::Video => "video",
            Channel::Affiliate => "affiliate",
            Channel::Ooh => "ooh",
            Channel::Trade => "trade",
        }
    }

    /// Fitted response-model parameters for this channel.
    pub fn params(&self) -> ChannelParams {
        match self {
            Channel::Search => ChannelParams {
                adstock_decay: 0.5,
                saturation_alpha: 0.8,
                saturation_k: 5_000.0,
                contribution_scale: 15_000.0,
                media_coeff: 0.05,
                weekly_spend_min: 500.0,
                weekly_spend_spread: 2_000.0,
            },
            Channel::Social => ChannelParams {
                adstock_decay: 0.7,
                saturation_alpha: 0.9,
                saturation_k: 8_000.0,
                contribution_scale: 25_000.0,
                media_coeff: 0.08,
                weekly_spend_min: 1_000.0,
                weekly_spend_spread: 3_000.0,
            },
            Channel::Display => ChannelParams {
                adstock_decay: 0.3,
                saturation_alpha: 0.7,
                saturation_k: 4_000.0,
                contribution_scale: 8_000.0,
                media_coeff: 0.02,
                weekly_spend_min: 300.0,
                weekly_spend_spread: 1_500.0,
            },
            Channel::Video => ChannelParams {
                adstock_decay: 0.8,
                saturation_alpha: 0.85,
                saturation_k: 7_000.0,
                contribution_scale: 20_000.0,
                media_coeff: 0.06,
                weekly_spend_min: 800.0,
                weekly_spend_spread: 2_500.0,
            },
            Channel::Affiliate => ChannelParams {
                adstock_decay: 0.4,
                saturation_alpha: 0.75,
                saturation_k: 3_000.0,
                contribution_scale: 10_000.0,
                media_coeff: 0.03,
                weekly_spend_min: 200.0,
                weekly_spend_spread: 1_000.0,
            },
            Channel::Ooh => ChannelParams {
                adstock_decay: 0.2,
                saturation_alpha: 0.6,
                saturation_k: 3_500.0,
                contribution_scale: 9_000.0,
                media_coeff: 0.04,
                weekly_spend_min: 400.0,
                weekly_spend_spread: 1_200.0,
            },
            Channel::Trade => ChannelParams {
                adstock_decay: 0.6,
                saturation_alpha: 0.8,
                saturation_k: 6_000.0,
                contribution_scale: 12_000.0,
                media_coeff: 0.05,
                weekly_spend_min: 600.0,
                weekly_spend_spread: 1_800.0,
            },
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-channel model parameters: adstock carry-over, Hill saturation shape,
/// incremental-sales scale, and the scenario-simulation lift coefficient.
/// `weekly_spend_min`/`weekly_spend_spread` bound the synthetic spend draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelParams {
    pub adstock_decay: f64,
    pub saturation_alpha: f64,
    pub saturation_k: f64,
    pub contribution_scale: f64,
    pub media_coeff: f64,
    pub weekly_spend_min: f64,
    pub weekly_spend_spread: f64,
}

/// One `f64` per media channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelMap {
    pub search: f64,
    pub social: f64,
    pub display: f64,
    pub video: f64,
    pub affiliate: f64,
    pub ooh: f64,
    pub trade: f64,
}

impl ChannelMap {
    pub fn get(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Search => self.search,
            Channel::Social => self.social,
            Channel::Display => self.display,
            Channel::Video => self.video,
            Channel::Affiliate => self.affiliate,
            Channel::Ooh => self.ooh,
            Channel::Trade => self.trade,
        }
    }

    pub fn set(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::Search => self.search = value,
            Channel::Social => self.social = value,
            Channel::Display => self.display = value,
            Channel::Video => self.video = value,
            Channel::Affiliate => self.affiliate = value,
            Channel::Ooh => self.ooh = value,
            Channel::Trade => self.trade = value,
        }
    }

    pub fn from_fn(mut f: impl FnMut(Channel) -> f64) -> Self {
        let mut map = ChannelMap::default();
        for channel in Channel::ALL {
            map.set(channel, f(channel));
        }
        map
    }

    /// Uniform value across all seven channels.
    pub fn splat(value: f64) -> Self {
        Self::from_fn(|_| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, f64)> + '_ {
        Channel::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Sum over all seven channels.
    pub fn total(&self) -> f64 {
        Channel::ALL.iter().map(|c| self.get(*c)).sum()
    }

    /// Sum over the five digital channels only (headline spend KPI).
    pub fn digital_total(&self) -> f64 {
        Channel::DIGITAL.iter().map(|c| self.get(*c)).sum()
    }
}

/// One observed/simulated week of marketing and sales activity.
///
/// Records form a chronologically ordered, gap-free weekly sequence and are
/// immutable once generated; the engine derives aggregates from them but
/// never writes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRecord {
    /// 1-based ordinal of the week within the series.
    pub week: u32,
    pub date: NaiveDate,

    // Pricing
    pub price: f64,
    pub competitor_price: f64,
    pub cost_of_goods: f64,
    /// `(price - cost_of_goods) / price`. Negative margins are tolerated.
    pub gross_margin: f64,

    // Promotion
    pub promo_flag: bool,
    /// Zero when `promo_flag` is false at generation time; downstream code
    /// must not rely on that coupling.
    pub promo_discount_pct: f64,

    // Demand outcome
    pub sales: f64,
    pub predicted_sales: f64,
    /// Modeled sales absent media, promo, and competitive effects.
    pub baseline_sales: f64,

    // Media
    pub spend: ChannelMap,
    pub contribution: ChannelMap,
    pub media_contribution_total: f64,

    // Decomposition effects (signed deltas from baseline)
    pub price_effect: f64,
    pub promo_effect: f64,
    pub competition_effect: f64,

    // Market context
    pub distribution_score: f64,
    pub market_share: f64,
    pub seasonality_index: f64,
    pub competitor_promos: bool,
}

/// The ten headline KPIs computed over a contiguous window of weekly records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kpi {
    pub total_revenue: f64,
    pub baseline_revenue: f64,
    pub incremental_revenue: f64,
    /// Digital channels only (search/social/display/video/affiliate).
    pub total_marketing_spend: f64,
    /// `incremental_revenue / total_marketing_spend`, 0 at zero spend.
    pub total_roas: f64,
    /// OLS slope of log(sales) on log(price). NaN/infinite values propagate
    /// for degenerate windows (all-equal prices, non-positive inputs).
    pub price_elasticity: f64,
    pub optimal_price_revenue: f64,
    pub optimal_price_profit: f64,
    pub promo_uplift: f64,
    pub competitor_price_pressure_index: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_map_get_set_roundtrip() {
        let mut map = ChannelMap::default();
        for (i, channel) in Channel::ALL.into_iter().enumerate() {
            map.set(channel, (i + 1) as f64);
        }
        for (i, channel) in Channel::ALL.into_iter().enumerate() {
            assert_eq!(map.get(channel), (i + 1) as f64);
        }
    }

    #[test]
    fn test_channel_map_totals() {
        let map = ChannelMap::splat(10.0);
        assert!((map.total() - 70.0).abs() < f64::EPSILON);
        assert!((map.digital_total() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_digital_excludes_ooh_and_trade() {
        assert!(!Channel::DIGITAL.contains(&Channel::Ooh));
        assert!(!Channel::DIGITAL.contains(&Channel::Trade));
    }

    #[test]
    fn test_channel_serde_snake_case() {
        let json = serde_json::to_string(&Channel::Ooh).unwrap();
        assert_eq!(json, "\"ooh\"");
        let back: Channel = serde_json::from_str("\"search\"").unwrap();
        assert_eq!(back, Channel::Search);
    }

    #[test]
    fn test_channel_params_decay_in_unit_interval() {
        for channel in Channel::ALL {
            let p = channel.params();
            assert!(p.adstock_decay >= 0.0 && p.adstock_decay < 1.0);
            assert!(p.saturation_alpha > 0.0);
            assert!(p.saturation_k > 0.0);
        }
    }
}
