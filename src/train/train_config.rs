use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::train::dataset::{Dataset, Sample};

/// Settings for a training run, loadable from JSON.
///
/// # Fields
/// - `input_size` / `hidden_size` / `output_size`: layer sizes
/// - `learning_rate`: initial step size
/// - `decay_rate`: per-tick exponential decay, in `[0, 1)`
/// - `backpropagate`: when `false` a tick only runs `predict`
/// - `start_training`: initial state of the training toggle
/// - `activation`: built-in activation pair to use
/// - `dataset`: inline samples; the five-pair reference set if absent
///
/// Any field missing from the JSON takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub learning_rate: f64,
    pub decay_rate: f64,
    pub backpropagate: bool,
    pub start_training: bool,
    pub activation: ActivationFunction,
    pub dataset: Option<Vec<Sample>>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            input_size: 2,
            hidden_size: 3,
            output_size: 2,
            learning_rate: 0.5,
            decay_rate: 0.0,
            backpropagate: true,
            start_training: false,
            activation: ActivationFunction::Sigmoid,
            dataset: None,
        }
    }
}

impl TrainConfig {
    /// Deserializes a `TrainConfig` from a JSON file.
    pub fn load_json(path: &str) -> Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_size == 0 || self.hidden_size == 0 || self.output_size == 0 {
            return Err(Error::InvalidConfig(format!(
                "layer sizes must be positive, got {}-{}-{}",
                self.input_size, self.hidden_size, self.output_size
            )));
        }
        if !self.learning_rate.is_finite() {
            return Err(Error::InvalidConfig("learning rate must be finite".into()));
        }
        if !(0.0..1.0).contains(&self.decay_rate) {
            return Err(Error::InvalidConfig(format!(
                "decay rate must be in [0, 1), got {}",
                self.decay_rate
            )));
        }
        Ok(())
    }

    /// The configured samples, or the reference set.
    pub fn dataset(&self) -> Result<Dataset> {
        match &self.dataset {
            Some(samples) => Dataset::new(samples.clone()),
            None => Ok(Dataset::reference()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config: TrainConfig =
            serde_json::from_str(r#"{ "hidden_size": 5, "decay_rate": 0.01 }"#).unwrap();
        assert_eq!(config.hidden_size, 5);
        assert_eq!(config.decay_rate, 0.01);
        assert_eq!(config.input_size, 2);
        assert_eq!(config.learning_rate, 0.5);
        assert!(config.backpropagate);
        assert_eq!(config.activation, ActivationFunction::Sigmoid);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn inline_dataset_and_activation() {
        let json = r#"{
            "input_size": 1, "output_size": 1, "activation": "tanh",
            "dataset": [ { "input": [0.5], "target": [0.1] } ]
        }"#;
        let config: TrainConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.activation, ActivationFunction::Tanh);
        let ds = config.dataset().unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.input_size(), 1);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad = [
            TrainConfig { hidden_size: 0, ..TrainConfig::default() },
            TrainConfig { learning_rate: f64::INFINITY, ..TrainConfig::default() },
            TrainConfig { decay_rate: 1.0, ..TrainConfig::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn load_json_reports_missing_file() {
        let err = TrainConfig::load_json("/nonexistent/train.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
