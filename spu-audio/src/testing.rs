//! Recording test doubles for the hardware traits.

use std::string::String;
use std::vec;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::constants::SPU_RAM_SIZE;
use crate::display::{DispEnv, DrawEnv, GraphicsDevice, Rect, VideoMode};
use crate::spu::{
    CommonAttr, Key, SoundDevice, SpuAddr, TransferMode, VoiceConfig, VoiceMask, Volume,
};

// ── Delay ──────────────────────────────────────────────────────────────────

/// Delay that returns immediately and adds up what was asked for.
#[derive(Default)]
pub struct NoDelay {
    pub total_ns: u64,
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}

// ── Sound device ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpuCall {
    Reset,
    CommonAttr(CommonAttr),
    Irq(bool),
    TransferMode(TransferMode),
    SetStart(SpuAddr),
    Write { addr: SpuAddr, len: usize },
    VoiceAttr(VoiceConfig),
    Key(Key, VoiceMask),
}

/// Sound device backed by a byte vector.
///
/// A write completes after `polls_until_complete` negative polls, or never if
/// `never_complete` is set. `reject_start` makes the device refuse every
/// transfer address; `write_limit` caps how many bytes one write queues.
pub struct MockSpu {
    pub ram: Vec<u8>,
    pub calls: Vec<SpuCall>,
    pub cursor: SpuAddr,
    pub master_volume: Volume,
    pub polls_until_complete: u32,
    pub never_complete: bool,
    pub reject_start: bool,
    pub write_limit: Option<usize>,
    /// Completion polls seen so far.
    pub polls: u32,
    pending: u32,
}

impl MockSpu {
    pub fn new() -> Self {
        Self::completing_after(0)
    }

    pub fn completing_after(polls: u32) -> Self {
        MockSpu {
            ram: vec![0; SPU_RAM_SIZE as usize],
            calls: Vec::new(),
            cursor: SpuAddr::NULL,
            master_volume: Volume::default(),
            polls_until_complete: polls,
            never_complete: false,
            reject_start: false,
            write_limit: None,
            polls: 0,
            pending: 0,
        }
    }

    pub fn voice_attrs(&self) -> Vec<VoiceConfig> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SpuCall::VoiceAttr(cfg) => Some(*cfg),
                _ => None,
            })
            .collect()
    }

    /// Number of key-on calls.
    pub fn key_ons(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SpuCall::Key(Key::On, _)))
            .count()
    }
}

impl SoundDevice for MockSpu {
    fn reset(&mut self) {
        self.cursor = SpuAddr::NULL;
        self.calls.push(SpuCall::Reset);
    }

    fn set_common_attr(&mut self, attr: &CommonAttr) {
        self.master_volume = attr.master_volume;
        self.calls.push(SpuCall::CommonAttr(*attr));
    }

    fn set_irq(&mut self, enabled: bool) {
        self.calls.push(SpuCall::Irq(enabled));
    }

    fn set_transfer_mode(&mut self, mode: TransferMode) {
        self.calls.push(SpuCall::TransferMode(mode));
    }

    fn set_transfer_start_addr(&mut self, addr: SpuAddr) -> SpuAddr {
        self.calls.push(SpuCall::SetStart(addr));
        if self.reject_start || addr.get() >= SPU_RAM_SIZE {
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
        let len = data
            .len()
            .min(self.ram.len() - start)
            .min(self.write_limit.unwrap_or(usize::MAX));
        self.ram[start..start + len].copy_from_slice(&data[..len]);
        self.calls.push(SpuCall::Write {
            addr: self.cursor,
            len,
        });
        self.pending = self.polls_until_complete;
        len
    }

    fn is_transfer_completed(&mut self) -> bool {
        self.polls += 1;
        if self.never_complete {
            return false;
        }
        if self.pending == 0 {
            return true;
        }
        self.pending -= 1;
        false
    }

    fn set_voice_attr(&mut self, config: &VoiceConfig) {
        self.calls.push(SpuCall::VoiceAttr(*config));
    }

    fn set_key(&mut self, key: Key, voices: VoiceMask) {
        self.calls.push(SpuCall::Key(key, voices));
    }
}

// ── Graphics device ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpuCall {
    Reset,
    VideoMode(VideoMode),
    DispEnv(DispEnv),
    DrawEnv(DrawEnv),
    DrawSync,
    VSync,
    DisplayMask(bool),
    LoadFont(u16, u16),
    Text(Rect, String),
}

#[derive(Default)]
pub struct MockGpu {
    pub calls: Vec<GpuCall>,
}

impl MockGpu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every text block drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                GpuCall::Text(_, s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn vsyncs(&self) -> usize {
        self.calls.iter().filter(|c| **c == GpuCall::VSync).count()
    }
}

impl GraphicsDevice for MockGpu {
    fn reset(&mut self) {
        self.calls.push(GpuCall::Reset);
    }

    fn set_video_mode(&mut self, mode: VideoMode) {
        self.calls.push(GpuCall::VideoMode(mode));
    }

    fn put_disp_env(&mut self, env: &DispEnv) {
        self.calls.push(GpuCall::DispEnv(*env));
    }

    fn put_draw_env(&mut self, env: &DrawEnv) {
        self.calls.push(GpuCall::DrawEnv(*env));
    }

    fn draw_sync(&mut self) {
        self.calls.push(GpuCall::DrawSync);
    }

    fn vsync(&mut self) {
        self.calls.push(GpuCall::VSync);
    }

    fn set_display_mask(&mut self, enabled: bool) {
        self.calls.push(GpuCall::DisplayMask(enabled));
    }

    fn load_font(&mut self, x: u16, y: u16) {
        self.calls.push(GpuCall::LoadFont(x, y));
    }

    fn draw_text(&mut self, window: &Rect, text: &str) {
        self.calls.push(GpuCall::Text(*window, String::from(text)));
    }
}
