//! hidden-layer-nn viewer
//!
//! Trains the network in a background thread and shows every neuron's
//! activation in the browser, coloured red (low) to blue (high).
//! Served by a synchronous tiny_http server.
//!
//! Run with:
//!   cargo run --bin viz --release
//! Then open http://127.0.0.1:7878 and press "Start" (or the S key).

mod routes;
mod sse;
mod state;

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::{error, info};
use tiny_http::Server;

use hidden_layer_nn::TrainConfig;
use state::{lock, SharedState, VizState};

#[derive(Parser)]
#[command(name = "viz")]
#[command(about = "Live activation viewer for a one-hidden-layer network")]
struct Cli {
    #[arg(long, help = "JSON training config; defaults are used when omitted")]
    config: Option<String>,
    #[arg(long, default_value = "127.0.0.1:7878", help = "Address to listen on")]
    addr: String,
    #[arg(long, default_value = "50", help = "Milliseconds between training ticks")]
    tick_ms: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => TrainConfig::load_json(path)?,
        None => TrainConfig::default(),
    };

    let server = match Server::http(cli.addr.as_str()) {
        Ok(server) => server,
        Err(e) => return Err(format!("failed to bind {}: {}", cli.addr, e).into()),
    };
    let shared_state: SharedState = Arc::new(Mutex::new(VizState::new(config)?));

    let ticker_state = shared_state.clone();
    let interval = Duration::from_millis(cli.tick_ms);
    thread::spawn(move || run_ticker(ticker_state, interval));

    info!("viewer listening on http://{}", cli.addr);

    // One thread per request so the long-lived SSE stream does not block
    // page loads and toggles.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        thread::spawn(move || routes::dispatch(request, state_clone));
    }
    Ok(())
}

/// Ticks the trainer at a fixed interval. A tick is a no-op while the
/// training toggle is off.
fn run_ticker(state: SharedState, interval: Duration) {
    loop {
        {
            let mut st = lock(&state);
            match st.trainer.tick() {
                Ok(Some(stats)) => st.last_stats = Some(stats),
                Ok(None) => {}
                Err(e) => {
                    error!("training tick failed: {}", e);
                    st.trainer.set_training(false);
                }
            }
        }
        thread::sleep(interval);
    }
}
