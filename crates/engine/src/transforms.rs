//! Media response transforms: geometric adstock and Hill saturation.

/// Geometric-decay carry-over of advertising exposure.
///
/// `a[0] = s[0]`, `a[i] = s[i] + decay * a[i-1]`. The input must be in
/// chronological order; this is the one ordering-sensitive operation in the
/// engine, and a reversed or shuffled series silently yields a different,
/// wrong result. A decay outside `[0, 1)` is accepted but produces
/// divergent output — bounding it is the caller's responsibility.
pub fn adstock(spend: &[f64], decay: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(spend.len());
    let mut carry = 0.0;
    for &s in spend {
        carry = s + decay * carry;
        out.push(carry);
    }
    out
}

/// Hill saturation: `x^alpha / (x^alpha + k^alpha)`.
///
/// Bounded in `[0, 1)`, exactly 0 at `x = 0`, monotonically increasing,
/// and 0.5 at `x = k` for any `alpha`. Models diminishing returns of
/// adstocked spend.
pub fn saturation(x: f64, alpha: f64, k: f64) -> f64 {
    let xa = x.powf(alpha);
    xa / (xa + k.powf(alpha))
}

/// Elementwise [`saturation`] over a series.
pub fn saturation_series(values: &[f64], alpha: f64, k: f64) -> Vec<f64> {
    values.iter().map(|&x| saturation(x, alpha, k)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1. Adstock ------------------------------------------------------------

    #[test]
    fn test_adstock_zero_decay_is_identity() {
        let spend = vec![100.0, 250.0, 0.0, 75.5];
        assert_eq!(adstock(&spend, 0.0), spend);
    }

    #[test]
    fn test_adstock_recurrence() {
        let spend = vec![100.0, 100.0, 100.0];
        let out = adstock(&spend, 0.5);
        assert!((out[0] - 100.0).abs() < 1e-12);
        assert!((out[1] - 150.0).abs() < 1e-12);
        assert!((out[2] - 175.0).abs() < 1e-12);
    }

    #[test]
    fn test_adstock_constant_spend_converges_to_geometric_limit() {
        let spend = vec![100.0; 500];
        let out = adstock(&spend, 0.8);
        let limit = 100.0 / (1.0 - 0.8);
        assert!((out.last().unwrap() - limit).abs() < 1e-6);
    }

    #[test]
    fn test_adstock_is_order_sensitive() {
        let spend = vec![100.0, 0.0, 0.0, 300.0];
        let mut reversed = spend.clone();
        reversed.reverse();
        let forward = adstock(&spend, 0.5);
        let mut backward = adstock(&reversed, 0.5);
        backward.reverse();
        assert_ne!(forward, backward);
    }

    #[test]
    fn test_adstock_empty_input() {
        assert!(adstock(&[], 0.5).is_empty());
    }

    // 2. Saturation ---------------------------------------------------------

    #[test]
    fn test_saturation_zero_at_zero() {
        assert_eq!(saturation(0.0, 0.8, 5_000.0), 0.0);
        assert_eq!(saturation(0.0, 2.0, 1.0), 0.0);
    }

    #[test]
    fn test_saturation_half_at_k() {
        for alpha in [0.5, 0.8, 1.0, 2.0] {
            let v = saturation(3_000.0, alpha, 3_000.0);
            assert!((v - 0.5).abs() < 1e-12, "alpha={alpha} gave {v}");
        }
    }

    #[test]
    fn test_saturation_strictly_increasing_and_bounded() {
        let mut prev = -1.0;
        for i in 0..100 {
            let x = i as f64 * 500.0;
            let v = saturation(x, 0.85, 7_000.0);
            assert!(v > prev, "not increasing at x={x}");
            assert!((0.0..1.0).contains(&v));
            prev = v;
        }
    }

    #[test]
    fn test_saturation_series_matches_scalar() {
        let xs = vec![0.0, 1_000.0, 5_000.0];
        let series = saturation_series(&xs, 0.8, 5_000.0);
        for (x, s) in xs.iter().zip(&series) {
            assert_eq!(*s, saturation(*x, 0.8, 5_000.0));
        }
    }
}
