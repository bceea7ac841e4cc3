use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use hidden_layer_nn::{ActivationSnapshot, EpochStats, Result, TrainConfig, Trainer};

pub type SharedState = Arc<Mutex<VizState>>;

/// Everything the viewer shares between the ticker thread and HTTP handlers.
pub struct VizState {
    pub config: TrainConfig,
    pub trainer: Trainer,
    pub last_stats: Option<EpochStats>,
}

/// Body of `GET /snapshot` and of each `snapshot` SSE event.
#[derive(Serialize)]
pub struct SnapshotPayload {
    pub training: bool,
    pub stats: Option<EpochStats>,
    pub activations: ActivationSnapshot,
    /// RGB per neuron for the input, hidden and output layers.
    pub colors: [Vec<[u8; 3]>; 3],
}

impl VizState {
    pub fn new(config: TrainConfig) -> Result<VizState> {
        let trainer = Trainer::new(&config)?;
        Ok(VizState { config, trainer, last_stats: None })
    }

    pub fn payload(&self) -> SnapshotPayload {
        let activations = ActivationSnapshot::capture(self.trainer.network());
        let colors = activations.colors();
        SnapshotPayload {
            training: self.trainer.is_training(),
            stats: self.last_stats.clone(),
            activations,
            colors,
        }
    }

    /// Fresh random parameters with the configured learning rate.
    pub fn reset(&mut self) -> Result<()> {
        self.trainer
            .reinitialize(self.config.learning_rate, self.config.activation.pair())?;
        self.last_stats = None;
        Ok(())
    }
}

/// Locks the shared state, recovering the guard if a handler panicked.
pub fn lock(state: &SharedState) -> MutexGuard<'_, VizState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
