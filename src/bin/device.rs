//! pinwire demo device
//!
//! Logs in with a token and reports a slowly drifting temperature on
//! virtual pin 2.

use std::sync::atomic::{AtomicI64, Ordering};

use clap::Parser;
use pinwire::{Client, Config};
use tracing_subscriber::{fmt, EnvFilter};

/// pinwire demo device
#[derive(Parser, Debug)]
#[command(name = "pinwire-device")]
#[command(about = "Demo device reporting a value on a virtual pin")]
#[command(version)]
struct Args {
    /// Server address (host:port)
    #[arg(short, long, default_value = pinwire::config::DEFAULT_ADDRESS)]
    server: String,

    /// Device auth token
    #[arg(short, long, env = "PINWIRE_TOKEN")]
    token: String,

    /// Virtual pin reporting the temperature
    #[arg(short, long, default_value = "2")]
    pin: u32,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pinwire=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("pinwire device v{}", pinwire::VERSION);
    tracing::info!("Server address: {}", args.server);

    let config = Config::builder()
        .address(&args.server)
        .auth_token(&args.token)
        .build();
    let client = Client::with_config(config);

    let temperature = AtomicI64::new(25);
    let step = AtomicI64::new(0);
    client.register_reader_fn(args.pin, move |_pin, out| {
        // Walk -1, 0, +1, 0, ... around the starting value
        let delta = [-1, 0, 1, 0][(step.fetch_add(1, Ordering::Relaxed) % 4) as usize];
        let value = temperature.fetch_add(delta, Ordering::Relaxed) + delta;
        out.push_int(value);
    });

    client.on_connect(|cycle| {
        tracing::info!("Online (connection cycle {})", cycle);
        Ok(())
    });

    if let Err(e) = client.run() {
        tracing::error!("Client stopped: {}", e);
        std::process::exit(1);
    }
}
