pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }

    /// Per-output error signal `predicted - expected`, the same signed error
    /// `Network::backpropagate` feeds into its output gradients.
    pub fn derivative(predicted: &[f64], expected: &[f64]) -> Vec<f64> {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| a - b)
            .collect()
    }

    /// Mean of the per-sample MSE over a set of (prediction, target) pairs.
    pub fn mean_over<'a, I>(pairs: I) -> f64
    where
        I: IntoIterator<Item = (&'a [f64], &'a [f64])>,
    {
        let (total, count) = pairs.into_iter()
            .fold((0.0, 0usize), |(sum, n), (p, e)| (sum + MseLoss::loss(p, e), n + 1));
        if count == 0 { 0.0 } else { total / count as f64 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn loss_is_mean_of_squares() {
        assert_relative_eq!(MseLoss::loss(&[0.5, 0.0], &[1.0, 0.5]), 0.25);
    }

    #[test]
    fn derivative_is_signed_error() {
        assert_eq!(MseLoss::derivative(&[0.75, 0.25], &[0.5, 0.5]), vec![0.25, -0.25]);
    }

    #[test]
    fn mean_over_pairs() {
        let a = vec![1.0];
        let b = vec![0.0];
        let c = vec![0.5];
        let pairs = vec![(a.as_slice(), b.as_slice()), (c.as_slice(), c.as_slice())];
        assert_relative_eq!(MseLoss::mean_over(pairs), 0.5);
        assert_eq!(MseLoss::mean_over(Vec::<(&[f64], &[f64])>::new()), 0.0);
    }
}
