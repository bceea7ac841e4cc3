// Trains a 2-3-2 network on the five reference pairs with a hand-written
// activation pair, showing that any (function, derivative-of-output) pair
// plugs in.
//   cargo run --example reference
use hidden_layer_nn::{Activation, Dataset, LearningRateDecay, MseLoss, Network};

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

// Takes the output y = logistic(x), not x.
fn logistic_slope(y: f64) -> f64 {
    y * (1.0 - y)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut network = Network::new(2, 3, 2, 0.5, Activation::new(logistic, logistic_slope))?;
    let dataset = Dataset::reference();
    let decay = LearningRateDecay::new(0.0005)?;

    for epoch in 0..5000 {
        let mut loss = 0.0;
        for sample in dataset.samples() {
            let output = network.predict(&sample.input)?;
            loss += MseLoss::loss(&output, &sample.target);
            network.backpropagate(&sample.input, &sample.target)?;
        }
        decay.step(&mut network)?;
        if epoch % 500 == 0 {
            println!(
                "Epoch {epoch}: loss = {:.6}, lr = {:.4}",
                loss / dataset.len() as f64,
                network.learning_rate()
            );
        }
    }

    for sample in dataset.samples() {
        let output = network.predict(&sample.input)?;
        println!("Input: {:?} -> Output: {:.4?}", sample.input, output);
    }
    Ok(())
}
