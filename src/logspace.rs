//src/logspace.rs

/// `ln(sum(exp(x)))` over a slice, shifted by the maximum term.
/// An empty slice sums to zero probability; an infinite maximum is returned as is.
pub fn log_sum_exp(values: &[f64]) -> f64 {
    let max_exp = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max_exp.is_infinite() {
        return max_exp;
    }
    let s: f64 = values.iter().map(|v| (v - max_exp).exp()).sum();
    s.ln() + max_exp
}
