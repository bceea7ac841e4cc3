// Headless training driver: builds a network from a JSON config (or the
// defaults), trains it on the configured dataset and prints the result.
//   cargo run -- --ticks 5000 --report-every 500
//   cargo run -- --config train.json
use clap::Parser;
use log::info;

use hidden_layer_nn::{Trainer, TrainConfig};

#[derive(Parser)]
#[command(name = "hidden-layer-nn")]
#[command(about = "Train a one-hidden-layer network with online backpropagation")]
#[command(version)]
struct Cli {
    #[arg(long, help = "JSON training config; defaults are used when omitted")]
    config: Option<String>,
    #[arg(long, default_value = "5000", help = "Number of passes over the dataset")]
    ticks: usize,
    #[arg(long, default_value = "500", help = "Log progress every N ticks (0 = never)")]
    report_every: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => {
            info!("loading config from {}", path);
            TrainConfig::load_json(path)?
        }
        None => TrainConfig::default(),
    };

    let mut trainer = Trainer::new(&config)?;
    info!("initial loss: {:.6}", trainer.evaluate()?);

    trainer.set_training(true);
    for _ in 0..cli.ticks {
        if let Some(stats) = trainer.tick()? {
            if cli.report_every > 0 && stats.tick % cli.report_every == 0 {
                info!(
                    "tick {}: loss = {:.6}, lr = {:.6}",
                    stats.tick, stats.mean_loss, stats.learning_rate
                );
            }
        }
    }

    info!("final loss: {:.6}", trainer.evaluate()?);
    let samples = trainer.dataset().samples().to_vec();
    for sample in &samples {
        let output = trainer.network_mut().predict(&sample.input)?;
        println!(
            "Input: {:?} -> Output: {:.4?} (target {:?})",
            sample.input, output, sample.target
        );
    }
    Ok(())
}
