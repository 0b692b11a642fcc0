//! Statistical helpers for two-sample drift comparison.

/// Two-sample Kolmogorov-Smirnov statistic: the supremum distance between
/// the two empirical CDFs. Returns `0.0` if either sample is empty.
pub fn ks_statistic(reference: &[f64], observed: &[f64]) -> f64 {
    if reference.is_empty() || observed.is_empty() {
        return 0.0;
    }

    let mut xs: Vec<f64> = reference.to_vec();
    let mut ys: Vec<f64> = observed.to_vec();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    ys.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n1 = xs.len() as f64;
    let n2 = ys.len() as f64;
    let mut i = 0usize;
    let mut j = 0usize;
    let mut d_max = 0.0f64;

    // Walk both sorted samples; ties (within and across samples) advance
    // together so the CDF difference is only evaluated between distinct
    // values, never mid-step.
    while i < xs.len() && j < ys.len() {
        let x = xs[i].min(ys[j]);
        while i < xs.len() && xs[i] <= x {
            i += 1;
        }
        while j < ys.len() && ys[j] <= x {
            j += 1;
        }
        let diff = (i as f64 / n1 - j as f64 / n2).abs();
        if diff > d_max {
            d_max = diff;
        }
    }

    d_max
}

/// Approximate p-value for a KS statistic via the asymptotic Kolmogorov
/// distribution: P(D > d) ≈ 2 * sum_{k=1}^∞ (-1)^{k+1} * exp(-2 k² λ²)
pub fn ks_p_value(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }
    let mut p = 0.0;
    for k in 1..=100 {
        let sign = if k % 2 == 1 { 1.0 } else { -1.0 };
        let term = sign * (-2.0 * f64::from(k).powi(2) * lambda.powi(2)).exp();
        p += term;
        if term.abs() < 1e-10 {
            break;
        }
    }
    (2.0 * p).clamp(0.0, 1.0)
}

/// Run the two-sample KS test, returning `(statistic, p_value)`.
pub fn ks_two_sample(reference: &[f64], observed: &[f64]) -> (f64, f64) {
    let d = ks_statistic(reference, observed);
    let n1 = reference.len() as f64;
    let n2 = observed.len() as f64;
    let n_eff = (n1 * n2) / (n1 + n2);
    (d, ks_p_value(d * n_eff.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_samples_have_zero_statistic() {
        let sample = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(ks_statistic(&sample, &sample), 0.0);
        let (_, p) = ks_two_sample(&sample, &sample);
        assert_eq!(p, 1.0);
    }

    #[test]
    fn test_tied_values_with_unequal_multiplicity() {
        // Both CDFs reach 1.0 at the same single value, so D must be 0.
        assert_eq!(ks_statistic(&[1.0, 1.0], &[1.0, 1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_disjoint_samples_have_statistic_one() {
        let low = [1.0, 2.0, 3.0];
        let high = [10.0, 11.0, 12.0];
        assert_eq!(ks_statistic(&low, &high), 1.0);
    }

    #[test]
    fn test_known_statistic() {
        // Shared low values, diverging tails: D = 0.4 at x in [5, 50).
        let reference = [1.0, 2.0, 3.0, 50.0, 60.0];
        let observed = [1.0, 2.0, 3.0, 4.0, 5.0];
        let d = ks_statistic(&reference, &observed);
        assert!((d - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_statistic_is_symmetric() {
        let a = [1.0, 5.0, 9.0, 2.0];
        let b = [3.0, 3.0, 8.0];
        assert_eq!(ks_statistic(&a, &b), ks_statistic(&b, &a));
    }

    #[test]
    fn test_p_value_bounds() {
        assert_eq!(ks_p_value(0.0), 1.0);
        assert_eq!(ks_p_value(-1.0), 1.0);
        let p = ks_p_value(3.0);
        assert!(p > 0.0 && p < 1e-6);
    }

    #[test]
    fn test_p_value_decreases_with_lambda() {
        assert!(ks_p_value(0.5) > ks_p_value(1.0));
        assert!(ks_p_value(1.0) > ks_p_value(2.0));
    }

    #[test]
    fn test_large_separation_is_significant() {
        let reference: Vec<f64> = (0..50).map(f64::from).collect();
        let observed: Vec<f64> = (0..50).map(|i| f64::from(i) + 100.0).collect();
        let (d, p) = ks_two_sample(&reference, &observed);
        assert_eq!(d, 1.0);
        assert!(p < 0.001);
    }

    #[test]
    fn test_empty_sample_yields_zero() {
        assert_eq!(ks_statistic(&[], &[1.0]), 0.0);
        assert_eq!(ks_statistic(&[1.0], &[]), 0.0);
    }
}
