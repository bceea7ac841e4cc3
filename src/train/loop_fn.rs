use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};

use log::info;

use crate::error::Result;
use crate::train::epoch_stats::EpochStats;
use crate::train::trainer::Trainer;

/// Options for a `train_loop` run.
///
/// # Fields
/// - `ticks`: maximum number of passes over the dataset
/// - `progress_tx`: optional channel, one `EpochStats` per tick. If the
///   receiver is dropped the loop ends early.
/// - `stop_flag`: optional flag; when set from another thread the loop ends
///   after the current tick.
pub struct LoopConfig {
    pub ticks: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl LoopConfig {
    /// A plain run of `ticks` ticks with no channel and no stop flag.
    pub fn new(ticks: usize) -> Self {
        LoopConfig { ticks, progress_tx: None, stop_flag: None }
    }
}

/// Switches training on and ticks `trainer` until `config.ticks` passes are
/// done or the loop is stopped. Returns the mean loss of the last completed
/// tick (0.0 if none ran).
pub fn train_loop(trainer: &mut Trainer, config: &LoopConfig) -> Result<f64> {
    trainer.set_training(true);
    let mut last_loss = 0.0;

    for _ in 0..config.ticks {
        if stop_requested(config) {
            info!("stop requested after {} ticks", trainer.ticks());
            break;
        }

        let Some(stats) = trainer.tick()? else {
            break;
        };
        last_loss = stats.mean_loss;

        if let Some(ref tx) = config.progress_tx {
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    Ok(last_loss)
}

fn stop_requested(config: &LoopConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map(|flag| flag.load(Ordering::Relaxed))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::train_config::TrainConfig;

    fn trainer() -> Trainer {
        Trainer::new(&TrainConfig::default()).unwrap()
    }

    #[test]
    fn runs_requested_ticks_and_reports_each() {
        let mut t = trainer();
        let (tx, rx) = mpsc::channel();
        let config = LoopConfig { ticks: 4, progress_tx: Some(tx), stop_flag: None };
        let last = train_loop(&mut t, &config).unwrap();
        drop(config);
        let stats: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(stats.len(), 4);
        assert_eq!(stats.iter().map(|s| s.tick).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(last, stats[3].mean_loss);
    }

    #[test]
    fn stop_flag_halts_before_first_tick() {
        let mut t = trainer();
        let flag = Arc::new(AtomicBool::new(true));
        let config = LoopConfig { ticks: 10, progress_tx: None, stop_flag: Some(flag) };
        assert_eq!(train_loop(&mut t, &config).unwrap(), 0.0);
        assert_eq!(t.ticks(), 0);
    }

    #[test]
    fn dropped_receiver_ends_loop() {
        let mut t = trainer();
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let config = LoopConfig { ticks: 10, progress_tx: Some(tx), stop_flag: None };
        train_loop(&mut t, &config).unwrap();
        assert_eq!(t.ticks(), 1);
    }
}
