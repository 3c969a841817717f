//! Trailing compounded accumulation.
//!
//! Monthly percentage changes compound multiplicatively, so a 12-month total
//! is not a sum:
//!
//! ```text
//! acc_i = (Π_{j=i-11..=i} (1 + v_j / 100) − 1) × 100
//! ```
//!
//! The product is taken left to right over each window, with plain IEEE
//! arithmetic: NaN and ±Infinity propagate, and a −100 entry zeroes the
//! product, so that window reads exactly −100.

use crate::domain::WINDOW_MONTHS;

/// Trailing `window`-period compounded totals.
///
/// Output element `i` closes at input index `i + window - 1`, so the output
/// length is `values.len() - window + 1` (empty when the input is shorter than
/// one window, or when `window == 0`).
pub fn accumulate_trailing(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || values.len() < window {
        return Vec::new();
    }
    values
        .windows(window)
        .map(|w| {
            let product = w.iter().fold(1.0_f64, |acc, v| acc * (1.0 + v / 100.0));
            (product - 1.0) * 100.0
        })
        .collect()
}

/// Trailing 12-month compounded totals.
pub fn accumulate12(values: &[f64]) -> Vec<f64> {
    accumulate_trailing(values, WINDOW_MONTHS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn short_inputs_yield_nothing() {
        assert!(accumulate12(&[]).is_empty());
        for n in 1..12 {
            let values = vec![0.5; n];
            assert!(accumulate12(&values).is_empty(), "len {n} should be empty");
        }
    }

    #[test]
    fn output_length_is_len_minus_eleven() {
        for n in 12..40 {
            let values: Vec<f64> = (0..n).map(|i| (i as f64) * 0.1 - 1.0).collect();
            assert_eq!(accumulate12(&values).len(), n - 11);
        }
    }

    #[test]
    fn constant_one_percent_compounds() {
        let values = vec![1.0; 20];
        let out = accumulate12(&values);
        let expected = (1.01_f64.powi(12) - 1.0) * 100.0;
        assert!(approx(expected, 12.682503, 1e-5));
        for v in out {
            assert!(approx(v, expected, 1e-9), "got {v}");
        }
    }

    #[test]
    fn zero_months_accumulate_to_zero() {
        let out = accumulate12(&[0.0; 12]);
        assert_eq!(out, vec![0.0]);
    }

    #[test]
    fn total_loss_window_is_exactly_minus_100() {
        let mut values = vec![0.0; 12];
        values[4] = -100.0;
        assert_eq!(accumulate12(&values), vec![-100.0]);
    }

    #[test]
    fn total_loss_only_affects_windows_containing_it() {
        let mut values = vec![0.0; 13];
        values[0] = -100.0;
        let out = accumulate12(&values);
        assert_eq!(out, vec![-100.0, 0.0]);
    }

    #[test]
    fn reordering_within_a_window_keeps_its_value() {
        let a = [0.3, -0.2, 1.1, 0.7, 0.0, 0.45, 0.9, -0.6, 0.25, 0.5, 0.12, 0.8];
        let mut b = a;
        b.reverse();
        b.swap(2, 7);
        let va = accumulate12(&a)[0];
        let vb = accumulate12(&b)[0];
        assert!(approx(va, vb, 1e-9), "{va} vs {vb}");
    }

    #[test]
    fn reordering_across_windows_changes_results() {
        let mut a = vec![0.0; 13];
        a[0] = 5.0;
        // Move the 5% month from the first window's exclusive slot into the
        // shared tail: the second window now sees it too.
        let mut b = a.clone();
        b.swap(0, 12);

        let out_a = accumulate12(&a);
        let out_b = accumulate12(&b);
        assert!(approx(out_a[0], 5.0, 1e-12));
        assert!(approx(out_a[1], 0.0, 1e-12));
        assert!(approx(out_b[0], 0.0, 1e-12));
        assert!(approx(out_b[1], 5.0, 1e-12));
    }

    #[test]
    fn compounding_differs_from_summing() {
        let values = vec![10.0; 12];
        let out = accumulate12(&values)[0];
        assert!(out > 120.0, "compounded 10%/month should exceed the sum, got {out}");
        assert!(approx(out, (1.1_f64.powi(12) - 1.0) * 100.0, 1e-9));
    }

    #[test]
    fn nan_and_infinity_propagate() {
        let mut values = vec![0.5; 13];
        values[12] = f64::NAN;
        let out = accumulate12(&values);
        assert!(out[0].is_finite());
        assert!(out[1].is_nan());

        let mut values = vec![0.5; 12];
        values[3] = f64::INFINITY;
        assert_eq!(accumulate12(&values)[0], f64::INFINITY);
    }

    #[test]
    fn trailing_window_is_general() {
        let out = accumulate_trailing(&[10.0, 10.0, 10.0], 2);
        assert_eq!(out.len(), 2);
        assert!(approx(out[0], 21.0, 1e-9));
        assert!(accumulate_trailing(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn is_deterministic() {
        let values: Vec<f64> = (0..30).map(|i| ((i * 7) % 11) as f64 * 0.13 - 0.4).collect();
        assert_eq!(accumulate12(&values), accumulate12(&values));
    }
}
