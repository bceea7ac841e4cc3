use std::time::Instant;

use log::{debug, info};

use crate::{
    activation::Activation,
    loss::mse::MseLoss,
    network::network::Network,
    optim::schedule::LearningRateDecay,
    error::Result,
    train::{dataset::Dataset, epoch_stats::EpochStats, train_config::TrainConfig},
};

/// Drives a network over a fixed dataset, one tick at a time.
///
/// Training only happens while the toggle is on. Each tick predicts every
/// sample in order, backpropagates it when enabled, then decays the
/// learning rate once.
#[derive(Debug)]
pub struct Trainer {
    network: Network,
    dataset: Dataset,
    schedule: LearningRateDecay,
    backpropagate: bool,
    is_training: bool,
    ticks: usize,
}

impl Trainer {
    pub fn new(config: &TrainConfig) -> Result<Trainer> {
        config.validate()?;
        let network = Network::new(
            config.input_size,
            config.hidden_size,
            config.output_size,
            config.learning_rate,
            config.activation.pair(),
        )?;
        let trainer = Trainer::with_network(network, config.dataset()?, config.decay_rate)?;
        info!(
            "trainer ready: {}-{}-{} {:?} network, {} samples, lr {}, decay {}",
            config.input_size,
            config.hidden_size,
            config.output_size,
            config.activation,
            trainer.dataset.len(),
            config.learning_rate,
            config.decay_rate
        );
        Ok(Trainer {
            backpropagate: config.backpropagate,
            is_training: config.start_training,
            ..trainer
        })
    }

    /// Wraps an existing network. Training starts switched off.
    pub fn with_network(network: Network, dataset: Dataset, decay_rate: f64) -> Result<Trainer> {
        dataset.check_against(&network)?;
        Ok(Trainer {
            network,
            dataset,
            schedule: LearningRateDecay::new(decay_rate)?,
            backpropagate: true,
            is_training: false,
            ticks: 0,
        })
    }

    /// Flips the training flag and returns its new state.
    pub fn toggle(&mut self) -> bool {
        self.is_training = !self.is_training;
        info!("training {}", if self.is_training { "started" } else { "paused" });
        self.is_training
    }

    pub fn set_training(&mut self, on: bool) {
        self.is_training = on;
    }

    pub fn is_training(&self) -> bool {
        self.is_training
    }

    pub fn set_backpropagate(&mut self, on: bool) {
        self.backpropagate = on;
    }

    /// Runs one pass over the dataset. Returns `None` while training is off.
    pub fn tick(&mut self) -> Result<Option<EpochStats>> {
        if !self.is_training {
            return Ok(None);
        }
        let t_start = Instant::now();
        let mut total_loss = 0.0;

        for sample in self.dataset.samples() {
            let output = self.network.predict(&sample.input)?;
            total_loss += MseLoss::loss(&output, &sample.target);
            if self.backpropagate {
                self.network.backpropagate(&sample.input, &sample.target)?;
            }
        }

        let learning_rate = self.schedule.step(&mut self.network)?;
        self.ticks += 1;

        let stats = EpochStats {
            tick: self.ticks,
            learning_rate,
            mean_loss: total_loss / self.dataset.len() as f64,
            elapsed_us: t_start.elapsed().as_micros() as u64,
        };
        debug!("tick {}: loss {:.6}, lr {:.6}", stats.tick, stats.mean_loss, learning_rate);
        Ok(Some(stats))
    }

    /// Mean MSE over the dataset with the current parameters. Does not train.
    pub fn evaluate(&mut self) -> Result<f64> {
        let mut outputs = Vec::with_capacity(self.dataset.len());
        for sample in self.dataset.samples() {
            outputs.push(self.network.predict(&sample.input)?);
        }
        let pairs = outputs
            .iter()
            .zip(self.dataset.samples())
            .map(|(o, s)| (o.as_slice(), s.target.as_slice()));
        Ok(MseLoss::mean_over(pairs))
    }

    /// Replaces the network with a freshly initialized one of the same shape.
    pub fn reinitialize(&mut self, learning_rate: f64, activation: Activation) -> Result<()> {
        let (i, h, o) = (
            self.network.input_size(),
            self.network.hidden_size(),
            self.network.output_size(),
        );
        self.network.initialize(i, h, o, learning_rate, activation)?;
        self.ticks = 0;
        Ok(())
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }
}
