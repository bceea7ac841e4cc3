use serde::{Deserialize, Serialize};

use crate::error::{check_len, Error, Result};
use crate::network::network::Network;

/// One training example: an input vector and the desired output activations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Sample {
        Sample { input, target }
    }
}

/// Fixed, ordered set of samples. Iteration order never changes, so every
/// tick visits the samples in the same sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Rejects an empty set or samples whose lengths disagree with the first.
    pub fn new(samples: Vec<Sample>) -> Result<Dataset> {
        let first = samples
            .first()
            .ok_or_else(|| Error::InvalidConfig("dataset must contain at least one sample".into()))?;
        let (n_in, n_out) = (first.input.len(), first.target.len());
        for sample in &samples {
            check_len("input", &sample.input, n_in)?;
            check_len("target", &sample.target, n_out)?;
        }
        Ok(Dataset { samples })
    }

    /// Five (input → target) pairs for a 2-input, 2-output network.
    pub fn reference() -> Dataset {
        let pairs = [
            ([0.1, 0.2], [0.9, 0.1]),
            ([0.3, 0.4], [0.8, 0.2]),
            ([0.5, 0.6], [0.7, 0.3]),
            ([0.7, 0.8], [0.6, 0.4]),
            ([0.9, 1.0], [0.5, 0.5]),
        ];
        Dataset {
            samples: pairs
                .iter()
                .map(|(i, t)| Sample::new(i.to_vec(), t.to_vec()))
                .collect(),
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn input_size(&self) -> usize {
        self.samples[0].input.len()
    }

    pub fn output_size(&self) -> usize {
        self.samples[0].target.len()
    }

    /// Reports the first sample whose shape the network cannot accept.
    pub fn check_against(&self, network: &Network) -> Result<()> {
        for sample in &self.samples {
            check_len("input", &sample.input, network.input_size())?;
            check_len("target", &sample.target, network.output_size())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Activation;

    #[test]
    fn reference_set_is_two_to_two() {
        let ds = Dataset::reference();
        assert_eq!(ds.len(), 5);
        assert_eq!((ds.input_size(), ds.output_size()), (2, 2));
        assert_eq!(ds.samples()[4], Sample::new(vec![0.9, 1.0], vec![0.5, 0.5]));
    }

    #[test]
    fn empty_and_ragged_sets_are_rejected() {
        assert!(matches!(Dataset::new(vec![]), Err(Error::InvalidConfig(_))));
        let ragged = vec![
            Sample::new(vec![0.0, 1.0], vec![1.0]),
            Sample::new(vec![0.0], vec![1.0]),
        ];
        assert!(matches!(
            Dataset::new(ragged),
            Err(Error::ShapeMismatch { vector: "input", expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn check_against_reports_target_mismatch() {
        let net = Network::new(2, 3, 1, 0.1, Activation::sigmoid()).unwrap();
        let err = Dataset::reference().check_against(&net).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { vector: "target", expected: 1, actual: 2 }));
    }
}
