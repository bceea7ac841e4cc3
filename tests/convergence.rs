use hidden_layer_nn::{
    train_loop, Activation, ActivationFunction, Dataset, LoopConfig, Network, Sample, Trainer,
};
use rand::{rngs::StdRng, SeedableRng};
use std::sync::mpsc;

fn reference_trainer(hidden: usize, seed: u64) -> Trainer {
    let mut rng = StdRng::seed_from_u64(seed);
    let network = Network::with_rng(2, hidden, 2, 0.5, Activation::sigmoid(), &mut rng).unwrap();
    Trainer::with_network(network, Dataset::reference(), 0.0).unwrap()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

#[test]
fn two_two_two_network_fits_reference_pairs() {
    let mut trainer = reference_trainer(2, 2024);
    let initial = trainer.evaluate().unwrap();

    let (tx, rx) = mpsc::channel();
    let config = LoopConfig { ticks: 5000, progress_tx: Some(tx), stop_flag: None };
    train_loop(&mut trainer, &config).unwrap();
    drop(config);
    let losses: Vec<f64> = rx.iter().map(|s| s.mean_loss).collect();
    assert_eq!(losses.len(), 5000);

    let fin = trainer.evaluate().unwrap();
    assert!(fin < 0.05, "final MSE {} not below 0.05", fin);
    assert!(fin < initial, "final MSE {} not below initial {}", fin, initial);
    assert!(mean(&losses[4900..]) < mean(&losses[..100]));
}

#[test]
fn convergence_holds_across_seeds() {
    for seed in [1, 2, 3] {
        let mut trainer = reference_trainer(3, seed);
        train_loop(&mut trainer, &LoopConfig::new(4000)).unwrap();
        let fin = trainer.evaluate().unwrap();
        assert!(fin < 0.05, "seed {}: final MSE {}", seed, fin);
    }
}

#[test]
fn tanh_pair_learns_signed_targets() {
    let samples = vec![
        Sample::new(vec![1.0, 0.0], vec![0.5]),
        Sample::new(vec![0.0, 1.0], vec![-0.5]),
    ];
    let mut rng = StdRng::seed_from_u64(99);
    let network =
        Network::with_rng(2, 3, 1, 0.1, ActivationFunction::Tanh.pair(), &mut rng).unwrap();
    let mut trainer = Trainer::with_network(network, Dataset::new(samples).unwrap(), 0.0).unwrap();
    let initial = trainer.evaluate().unwrap();
    train_loop(&mut trainer, &LoopConfig::new(2000)).unwrap();
    let fin = trainer.evaluate().unwrap();
    assert!(fin < initial);
    assert!(fin < 0.01, "final MSE {}", fin);
}
