//! Window-level sales decomposition and per-channel performance breakdowns.

use mixboard_core::{Channel, ChannelMap, MixResult, MixboardError, WeeklyRecord};
use serde::{Deserialize, Serialize};

/// Window sums of the modeled sales components: baseline, per-channel media
/// contribution, and the signed price/promo/competition effects, alongside
/// actual and predicted sales for fit inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionSummary {
    pub weeks: usize,
    pub actual_sales: f64,
    pub predicted_sales: f64,
    pub baseline_sales: f64,
    pub media_contribution: ChannelMap,
    pub media_contribution_total: f64,
    pub price_effect: f64,
    pub promo_effect: f64,
    pub competition_effect: f64,
}

/// Spend, incremental contribution, attributed revenue, and ROAS for one
/// channel over the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPerformance {
    pub channel: Channel,
    pub spend: f64,
    pub contribution: f64,
    /// Weekly `contribution * price`, summed.
    pub attributed_revenue: f64,
    /// `attributed_revenue / spend`, 0 at zero spend.
    pub roas: f64,
}

/// Promo vs non-promo week comparison over the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoSummary {
    pub promo_weeks: u32,
    pub non_promo_weeks: u32,
    pub avg_promo_sales: f64,
    pub avg_non_promo_sales: f64,
    /// `(avg_promo - avg_non_promo) / avg_non_promo`, 0 if either group is
    /// empty.
    pub uplift: f64,
}

/// Sum the decomposition components over a non-empty window.
pub fn decompose(window: &[WeeklyRecord]) -> MixResult<DecompositionSummary> {
    if window.is_empty() {
        return Err(MixboardError::EmptyWindow(
            "decomposition requires at least one record".to_string(),
        ));
    }

    let media_contribution =
        ChannelMap::from_fn(|c| window.iter().map(|r| r.contribution.get(c)).sum());

    Ok(DecompositionSummary {
        weeks: window.len(),
        actual_sales: window.iter().map(|r| r.sales).sum(),
        predicted_sales: window.iter().map(|r| r.predicted_sales).sum(),
        baseline_sales: window.iter().map(|r| r.baseline_sales).sum(),
        media_contribution,
        media_contribution_total: window.iter().map(|r| r.media_contribution_total).sum(),
        price_effect: window.iter().map(|r| r.price_effect).sum(),
        promo_effect: window.iter().map(|r| r.promo_effect).sum(),
        competition_effect: window.iter().map(|r| r.competition_effect).sum(),
    })
}

/// Per-channel spend/contribution/ROAS over a non-empty window, in canonical
/// channel order.
pub fn channel_breakdown(window: &[WeeklyRecord]) -> MixResult<Vec<ChannelPerformance>> {
    if window.is_empty() {
        return Err(MixboardError::EmptyWindow(
            "channel breakdown requires at least one record".to_string(),
        ));
    }

    Ok(Channel::ALL
        .into_iter()
        .map(|channel| {
            let spend: f64 = window.iter().map(|r| r.spend.get(channel)).sum();
            let contribution: f64 = window.iter().map(|r| r.contribution.get(channel)).sum();
            let attributed_revenue: f64 = window
                .iter()
                .map(|r| r.contribution.get(channel) * r.price)
                .sum();
            let roas = if spend > 0.0 {
                attributed_revenue / spend
            } else {
                0.0
            };
            ChannelPerformance {
                channel,
                spend,
                contribution,
                attributed_revenue,
                roas,
            }
        })
        .collect())
}

/// Compare promo and non-promo weeks over a non-empty window.
pub fn promo_summary(window: &[WeeklyRecord]) -> MixResult<PromoSummary> {
    if window.is_empty() {
        return Err(MixboardError::EmptyWindow(
            "promo summary requires at least one record".to_string(),
        ));
    }

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
    let uplift = if promo_weeks > 0 && avg_non_promo_sales > 0.0 {
        (avg_promo_sales - avg_non_promo_sales) / avg_non_promo_sales
    } else {
        0.0
    };

    Ok(PromoSummary {
        promo_weeks,
        non_promo_weeks,
        avg_promo_sales,
        avg_non_promo_sales,
        uplift,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::series;

    #[test]
    fn test_decompose_sums_components() {
        let mut data = series(3);
        for r in &mut data {
            r.contribution.search = 100.0;
            r.contribution.trade = 50.0;
            r.media_contribution_total = 150.0;
            r.price_effect = -20.0;
            r.promo_effect = 30.0;
            r.competition_effect = -5.0;
        }
        let summary = decompose(&data).unwrap();
        assert_eq!(summary.weeks, 3);
        assert!((summary.media_contribution.search - 300.0).abs() < 1e-9);
        assert!((summary.media_contribution.trade - 150.0).abs() < 1e-9);
        assert!((summary.media_contribution_total - 450.0).abs() < 1e-9);
        assert!((summary.price_effect + 60.0).abs() < 1e-9);
        assert!((summary.promo_effect - 90.0).abs() < 1e-9);
        assert!((summary.competition_effect + 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_channel_breakdown_roas() {
        let mut data = series(2);
        for r in &mut data {
            r.price = 10.0;
            r.spend.video = 500.0;
            r.contribution.video = 200.0;
        }
        let breakdown = channel_breakdown(&data).unwrap();
        let video = breakdown
            .iter()
            .find(|p| p.channel == Channel::Video)
            .unwrap();
        assert!((video.spend - 1_000.0).abs() < 1e-9);
        assert!((video.attributed_revenue - 4_000.0).abs() < 1e-9);
        assert!((video.roas - 4.0).abs() < 1e-9);

        // Channels without spend report zero ROAS, not NaN.
        let ooh = breakdown.iter().find(|p| p.channel == Channel::Ooh).unwrap();
        assert_eq!(ooh.roas, 0.0);
    }

    #[test]
    fn test_channel_breakdown_covers_all_channels_in_order() {
        let breakdown = channel_breakdown(&series(1)).unwrap();
        let channels: Vec<Channel> = breakdown.iter().map(|p| p.channel).collect();
        assert_eq!(channels, Channel::ALL.to_vec());
    }

    #[test]
    fn test_promo_summary_groups() {
        let mut data = series(5);
        data[0].promo_flag = true;
        data[0].sales = 1_200.0;
        data[3].promo_flag = true;
        data[3].sales = 1_400.0;
        let summary = promo_summary(&data).unwrap();
        assert_eq!(summary.promo_weeks, 2);
        assert_eq!(summary.non_promo_weeks, 3);
        assert!((summary.avg_promo_sales - 1_300.0).abs() < 1e-9);
        assert!((summary.avg_non_promo_sales - 1_000.0).abs() < 1e-9);
        assert!((summary.uplift - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_promo_summary_all_promo_weeks_has_zero_uplift() {
        let mut data = series(3);
        for r in &mut data {
            r.promo_flag = true;
        }
        let summary = promo_summary(&data).unwrap();
        assert_eq!(summary.non_promo_weeks, 0);
        assert_eq!(summary.uplift, 0.0);
    }

    #[test]
    fn test_empty_window_rejected() {
        assert!(decompose(&[]).is_err());
        assert!(channel_breakdown(&[]).is_err());
        assert!(promo_summary(&[]).is_err());
    }
}
