pub mod snapshot;

pub use snapshot::{neuron_color, normalize_by_max, ActivationSnapshot};
