use serde::{Serialize, Deserialize};

/// Statistics for one training tick (one pass over the dataset).
///
/// `train_loop` sends one of these per tick on its optional progress channel;
/// the viewer serializes them straight to the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based tick number since the trainer was created.
    pub tick: usize,
    /// Learning rate after this tick's decay was applied.
    pub learning_rate: f64,
    /// Mean MSE of the predictions made during the tick, before each update.
    pub mean_loss: f64,
    /// Wall-clock duration of the tick in microseconds.
    pub elapsed_us: u64,
}
