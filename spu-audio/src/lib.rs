//! # spu-audio
//!
//! A `no_std`, allocation-free driver layer for a fixed game console's sound
//! processing unit (SPU) and display. It loads a pre-encoded VAG sample, moves
//! it into SPU memory, configures a playback voice and retriggers it on a fixed
//! frame period while a double-buffered display shows a text overlay.
//!
//! ## Architecture
//!
//! | Layer | Module | Purpose |
//! |-------|--------|---------|
//! | Asset | [`vag`] | 48-byte big-endian VAG header parsing and validation |
//! | Memory | [`spu::SpuAllocator`] | Bounded sound-memory arena with checked exhaustion |
//! | Trait | [`spu::SoundDevice`] / [`display::GraphicsDevice`] / [`control`] | Hardware access seams |
//! | Driver | [`spu::Spu`] | Upload, voice configuration, key on/off |
//! | Video | [`display`] | Double-buffered presenter and text console |
//! | Loop | [`demo`] | Countdown retrigger loop with cancellation |
//!
//! ## Quick start
//!
//! ```ignore
//! use core::sync::atomic::AtomicBool;
//! use spu_audio::demo::{Demo, DemoConfig};
//!
//! static STOP: AtomicBool = AtomicBool::new(false);
//! static ASSET: &[u8] = include_bytes!("hello_poly.vag");
//!
//! let mut demo = Demo::setup(sound, graphics, delay, ASSET, DemoConfig::default())?;
//! demo.run(&STOP);
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `pal` | no | PAL video timing as the default [`display::VideoMode`] |
//!
//! ## Hardware parameters
//!
//! - **Sound RAM:** 512 KiB, first 0x1010 bytes reserved ([`constants::SPU_RAM_SIZE`])
//! - **Allocation table:** 3 live blocks ([`constants::MALLOC_MAX`])
//! - **Pitch:** 4.12 fixed point, 0x1000 = 44.1 kHz ([`constants::REFERENCE_SAMPLE_RATE`])
//! - **Screen:** 320×240, two buffers stacked in VRAM

#![no_std]

#[cfg(test)]
extern crate std;

pub mod constants;
pub mod error;
pub mod vag;
pub mod spu;
pub mod control;
pub mod display;
pub mod demo;

pub use error::{AssetError, Error, Result};

#[cfg(test)]
mod testing;

#[cfg(test)]
mod integration_tests;
