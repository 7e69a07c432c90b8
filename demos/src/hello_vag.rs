//! Load a VAG sample into the emulated sound processor and replay it every
//! 180 frames while the overlay shows the upload diagnostics.
//!
//! ```text
//! cargo run -p spu-audio-demos --bin hello_vag
//! RUST_LOG=debug cargo run -p spu-audio-demos --bin hello_vag
//! ```
//!
//! The emulated console is switched off after [`RUN_TIME`]; there are no
//! command-line options.

mod host;

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use spu_audio::demo::{Demo, DemoConfig};

use host::{HostGpu, HostSpu, StdDelay};

static ASSET: &[u8] = include_bytes!("../assets/hello_poly.vag");
static STOP: AtomicBool = AtomicBool::new(false);

/// How long the emulated console stays powered.
const RUN_TIME: Duration = Duration::from_secs(10);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = DemoConfig::default();
    let mut demo = Demo::setup(
        HostSpu::new(),
        HostGpu::new(u64::from(config.replay_interval)),
        StdDelay,
        ASSET,
        config,
    )
    .context("demo setup failed")?;

    thread::spawn(move || {
        thread::sleep(RUN_TIME);
        STOP.store(true, Ordering::Relaxed);
    });

    let frames = demo.run(&STOP);
    tracing::info!("{} frames, {} key-ons", frames, demo.triggers());
    Ok(())
}
