pub mod math;
pub mod activation;
pub mod error;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod visual;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::{Activation, ActivationFunction};
pub use error::{Error, Result};
pub use network::network::Network;
pub use loss::mse::MseLoss;
pub use optim::schedule::LearningRateDecay;
pub use train::{train_loop, Dataset, EpochStats, LoopConfig, Sample, TrainConfig, Trainer};
pub use visual::snapshot::ActivationSnapshot;
