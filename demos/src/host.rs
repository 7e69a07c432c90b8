//! Host-side stand-ins for the console hardware.
//!
//! ```text
//!   HostSpu  ── 512 KiB Vec as sound RAM, DMA completes after a few polls
//!   HostGpu  ── paces present() to the video refresh, logs the overlay
//!   StdDelay ── thread::sleep behind embedded-hal's DelayNs
//! ```

use std::thread;
use std::time::{Duration, Instant};

use spu_audio::constants::SPU_RAM_SIZE;
use spu_audio::display::{DispEnv, DrawEnv, GraphicsDevice, Rect, VideoMode};
use spu_audio::spu::{CommonAttr, Key, SoundDevice, SpuAddr, TransferMode, VoiceConfig, VoiceMask};

/// Polls a DMA transfer takes before the completion flag is set.
const DMA_POLLS: u32 = 3;

// ── Delay ──────────────────────────────────────────────────────────────────

pub struct StdDelay;

impl embedded_hal::delay::DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(ns as u64));
    }
}

// ── Sound processor ────────────────────────────────────────────────────────

pub struct HostSpu {
    ram: Vec<u8>,
    cursor: SpuAddr,
    mode: TransferMode,
    pending: u32,
    voices: [Option<VoiceConfig>; 24],
}

impl HostSpu {
    pub fn new() -> Self {
        HostSpu {
            ram: vec![0; SPU_RAM_SIZE as usize],
            cursor: SpuAddr::NULL,
            mode: TransferMode::default(),
            pending: 0,
            voices: [None; 24],
        }
    }
}

impl SoundDevice for HostSpu {
    fn reset(&mut self) {
        self.ram.fill(0);
        self.cursor = SpuAddr::NULL;
        self.pending = 0;
        self.voices = [None; 24];
        tracing::debug!("spu: reset");
    }

    fn set_common_attr(&mut self, attr: &CommonAttr) {
        tracing::debug!(
            "spu: master volume {:#06x}/{:#06x}",
            attr.master_volume.left,
            attr.master_volume.right
        );
    }

    fn set_irq(&mut self, enabled: bool) {
        tracing::debug!("spu: irq {}", if enabled { "on" } else { "off" });
    }

    fn set_transfer_mode(&mut self, mode: TransferMode) {
        self.mode = mode;
    }

    fn set_transfer_start_addr(&mut self, addr: SpuAddr) -> SpuAddr {
        if addr.get() >= SPU_RAM_SIZE {
            tracing::warn!("spu: transfer address {} out of range", addr);
            return SpuAddr::NULL;
        }
        self.cursor = addr;
        addr
    }

    fn transfer_start_addr(&self) -> SpuAddr {
        self.cursor
    }

    fn write(&mut self, data: &[u8]) -> usize {
        let start = self.cursor.get() as usize;
        let len = data.len().min(self.ram.len() - start);
        self.ram[start..start + len].copy_from_slice(&data[..len]);
        self.pending = match self.mode {
            TransferMode::Dma => DMA_POLLS,
            TransferMode::Io => 0,
        };
        tracing::debug!("spu: {:?} write {} bytes at {}", self.mode, len, self.cursor);
        len
    }

    fn is_transfer_completed(&mut self) -> bool {
        if self.pending == 0 {
            return true;
        }
        self.pending -= 1;
        false
    }

    fn set_voice_attr(&mut self, config: &VoiceConfig) {
        for n in config.voices.iter() {
            self.voices[n as usize] = Some(*config);
        }
    }

    fn set_key(&mut self, key: Key, voices: VoiceMask) {
        for n in voices.iter() {
            match (key, &self.voices[n as usize]) {
                (Key::On, Some(cfg)) => tracing::info!(
                    "spu: voice {} key on, pitch {:#06x} from {}",
                    n,
                    cfg.pitch.get(),
                    cfg.start
                ),
                (Key::On, None) => tracing::warn!("spu: voice {} keyed on without attributes", n),
                (Key::Off, _) => tracing::debug!("spu: voice {} key off", n),
            }
        }
    }
}

// ── Graphics processor ─────────────────────────────────────────────────────

pub struct HostGpu {
    frame_time: Duration,
    last_vsync: Instant,
    frames: u64,
    /// Log the overlay every this many frames.
    log_every: u64,
}

impl HostGpu {
    pub fn new(log_every: u64) -> Self {
        HostGpu {
            frame_time: Duration::from_secs(1) / VideoMode::default().refresh_hz(),
            last_vsync: Instant::now(),
            frames: 0,
            log_every: log_every.max(1),
        }
    }
}

impl GraphicsDevice for HostGpu {
    fn reset(&mut self) {
        self.frames = 0;
        self.last_vsync = Instant::now();
    }

    fn set_video_mode(&mut self, mode: VideoMode) {
        self.frame_time = Duration::from_secs(1) / mode.refresh_hz();
        tracing::info!("gpu: {:?}, {:?} per frame", mode, self.frame_time);
    }

    fn put_disp_env(&mut self, env: &DispEnv) {
        tracing::trace!("gpu: display {:?}", env.display);
    }

    fn put_draw_env(&mut self, env: &DrawEnv) {
        tracing::trace!("gpu: draw {:?}", env.clip);
    }

    fn draw_sync(&mut self) {}

    fn vsync(&mut self) {
        let next = self.last_vsync + self.frame_time;
        let now = Instant::now();
        if next > now {
            thread::sleep(next - now);
        }
        self.last_vsync = Instant::now();
        self.frames += 1;
    }

    fn set_display_mask(&mut self, _enabled: bool) {}

    fn load_font(&mut self, x: u16, y: u16) {
        tracing::debug!("gpu: font at ({}, {})", x, y);
    }

    fn draw_text(&mut self, _window: &Rect, text: &str) {
        if self.frames % self.log_every == 0 {
            for line in text.lines() {
                tracing::info!("| {}", line);
            }
        }
    }
}
