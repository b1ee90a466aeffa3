//! Budget reallocation advisor.
//!
//! An illustrative heuristic, not an optimizer: fixed per-channel multipliers
//! bias the split toward channels deemed under-invested, then the result is
//! renormalized so the suggested total equals the current total exactly. A
//! real replacement would equalize marginal ROAS over the saturation curves;
//! that is out of scope here.

use mixboard_core::{Channel, MixResult, MixboardError, WeeklyRecord};
use serde::{Deserialize, Serialize};

/// Bias applied to the average digital spend before renormalization.
fn reallocation_bias(channel: Channel) -> f64 {
    match channel {
        Channel::Search => 1.2,
        Channel::Social => 1.5,
        Channel::Display => 0.8,
        Channel::Video => 1.3,
        Channel::Affiliate => 0.7,
        // Not part of the digital reallocation.
        Channel::Ooh | Channel::Trade => 1.0,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelAllocation {
    pub channel: Channel,
    pub current: f64,
    pub suggested: f64,
}

/// Suggest a reallocation of the window's digital media budget.
///
/// Covers the five digital channels only; OOH and trade budgets are managed
/// outside this heuristic. Total suggested spend equals total current spend.
pub fn suggest_reallocation(window: &[WeeklyRecord]) -> MixResult<Vec<ChannelAllocation>> {
    if window.is_empty() {
        return Err(MixboardError::EmptyWindow(
            "reallocation requires at least one record".to_string(),
        ));
    }

    let current: Vec<(Channel, f64)> = Channel::DIGITAL
        .into_iter()
        .map(|c| (c, window.iter().map(|r| r.spend.get(c)).sum()))
        .collect();
    let total: f64 = current.iter().map(|(_, s)| s).sum();

    let biased: Vec<(Channel, f64)> = current
        .iter()
        .map(|(c, _)| {
            let avg = total / Channel::DIGITAL.len() as f64;
            (*c, avg * reallocation_bias(*c))
        })
        .collect();
    let biased_total: f64 = biased.iter().map(|(_, s)| s).sum();
    let normalization = if biased_total > 0.0 {
        total / biased_total
    } else {
        0.0
    };

    Ok(current
        .into_iter()
        .zip(biased)
        .map(|((channel, current), (_, suggestion))| ChannelAllocation {
            channel,
            current,
            suggested: suggestion * normalization,
        })
        .collect())
}
