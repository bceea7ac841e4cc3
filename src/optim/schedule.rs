use crate::error::{Error, Result};
use crate::network::network::Network;

/// Exponential learning-rate decay applied between training passes:
/// `lr ← lr · (1 − decay_rate)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningRateDecay {
    decay_rate: f64,
}

impl LearningRateDecay {
    /// `decay_rate` must lie in `[0, 1)`. Zero keeps the rate constant.
    pub fn new(decay_rate: f64) -> Result<LearningRateDecay> {
        if !(0.0..1.0).contains(&decay_rate) {
            return Err(Error::InvalidConfig(format!(
                "decay rate must be in [0, 1), got {}",
                decay_rate
            )));
        }
        Ok(LearningRateDecay { decay_rate })
    }

    pub fn decay_rate(&self) -> f64 {
        self.decay_rate
    }

    pub fn next_rate(&self, learning_rate: f64) -> f64 {
        learning_rate * (1.0 - self.decay_rate)
    }

    /// Decays the network's learning rate in place and returns the new value.
    pub fn step(&self, network: &mut Network) -> Result<f64> {
        let lr = self.next_rate(network.learning_rate());
        network.set_learning_rate(lr)?;
        Ok(lr)
    }
}

impl Default for LearningRateDecay {
    fn default() -> Self {
        LearningRateDecay { decay_rate: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Activation;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_rates_outside_unit_interval() {
        assert!(LearningRateDecay::new(-0.1).is_err());
        assert!(LearningRateDecay::new(1.0).is_err());
        assert!(LearningRateDecay::new(f64::NAN).is_err());
        assert!(LearningRateDecay::new(0.0).is_ok());
        assert!(LearningRateDecay::new(0.999).is_ok());
    }

    #[test]
    fn step_multiplies_network_rate() {
        let mut net = Network::new(2, 2, 2, 0.5, Activation::sigmoid()).unwrap();
        let decay = LearningRateDecay::new(0.1).unwrap();
        assert_relative_eq!(decay.step(&mut net).unwrap(), 0.45, epsilon = 1e-12);
        assert_relative_eq!(decay.step(&mut net).unwrap(), 0.405, epsilon = 1e-12);
        assert_relative_eq!(net.learning_rate(), 0.405, epsilon = 1e-12);
    }

    #[test]
    fn default_keeps_rate_constant() {
        assert_eq!(LearningRateDecay::default().next_rate(0.3), 0.3);
    }
}
