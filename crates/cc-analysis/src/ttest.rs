//! Two-sample t-test for a difference of means.

use cc_core::VarianceAssumption;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Outcome of a computed two-sample t-test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTest {
    pub statistic: f64,
    pub degrees_of_freedom: f64,
    /// Two-sided p-value
    pub p_value: f64,
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Unbiased sample variance (n - 1 denominator); `None` below two values.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(ss / (values.len() - 1) as f64)
}

/// Two-sided independent two-sample t-test of `a` against `b`.
///
/// Returns `None` when either side has fewer than two values or when the
/// statistic is undefined (both groups have zero variance).
pub fn two_sample(a: &[f64], b: &[f64], variance: VarianceAssumption) -> Option<TTest> {
    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let (m1, m2) = (mean(a)?, mean(b)?);
    let (v1, v2) = (sample_variance(a)?, sample_variance(b)?);

    let (std_err, df) = match variance {
        VarianceAssumption::Welch => {
            let (s1, s2) = (v1 / n1, v2 / n2);
            let se2 = s1 + s2;
            let df = se2.powi(2) / (s1.powi(2) / (n1 - 1.0) + s2.powi(2) / (n2 - 1.0));
            (se2.sqrt(), df)
        }
        VarianceAssumption::Pooled => {
            let df = n1 + n2 - 2.0;
            let pooled = ((n1 - 1.0) * v1 + (n2 - 1.0) * v2) / df;
            ((pooled * (1.0 / n1 + 1.0 / n2)).sqrt(), df)
        }
    };
    if std_err == 0.0 || !std_err.is_finite() || !df.is_finite() {
        return None;
    }

    let statistic = (m1 - m2) / std_err;
    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    let p_value = (2.0 * dist.sf(statistic.abs())).clamp(0.0, 1.0);
    Some(TTest {
        statistic,
        degrees_of_freedom: df,
        p_value,
    })
}
