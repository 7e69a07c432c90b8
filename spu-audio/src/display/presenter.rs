//! Double-buffered presenter.
//!
//! Two 320x240 buffers are stacked in VRAM. Buffer 0 shows (0,0) while
//! drawing into (0,240); buffer 1 is the mirror image. Each
//! [`present`](Display::present) applies the active pair and flips, so the
//! area being shown is never the one being drawn.

use core::fmt;

use log::{info, trace};

use super::{DispEnv, DrawEnv, GraphicsDevice, TextConsole, VideoMode};
use crate::constants::{FONT_VRAM_X, FONT_VRAM_Y, SCREEN_HEIGHT, SCREEN_WIDTH};

pub struct Display<G> {
    device: G,
    mode: VideoMode,
    disp: [DispEnv; 2],
    draw: [DrawEnv; 2],
    active: usize,
    console: TextConsole,
    frames: u64,
}

impl<G: GraphicsDevice> Display<G> {
    /// Build both buffer pairs for `mode`. Nothing is sent to the device
    /// until [`init`](Self::init).
    pub fn new(device: G, mode: VideoMode) -> Self {
        let (w, h) = (SCREEN_WIDTH, SCREEN_HEIGHT);
        Self {
            device,
            mode,
            disp: [
                DispEnv::new(0, 0, w, h).for_mode(mode),
                DispEnv::new(0, h, w, h).for_mode(mode),
            ],
            draw: [DrawEnv::new(0, h, w, h), DrawEnv::new(0, 0, w, h)],
            active: 0,
            console: TextConsole::default(),
            frames: 0,
        }
    }

    /// Reset the GPU, select the video mode, apply buffer 0 and load the
    /// debug font.
    pub fn init(&mut self) {
        self.device.reset();
        self.device.set_video_mode(self.mode);
        self.active = 0;
        self.device.put_disp_env(&self.disp[0]);
        self.device.put_draw_env(&self.draw[0]);
        self.device.load_font(FONT_VRAM_X, FONT_VRAM_Y);
        self.console.clear();
        info!(
            "display init: {:?} {}x{} @ {} Hz",
            self.mode,
            SCREEN_WIDTH,
            SCREEN_HEIGHT,
            self.mode.refresh_hz()
        );
    }

    /// Wait for drawing and vertical blank, show the active buffer, then
    /// flip.
    pub fn present(&mut self) {
        self.device.draw_sync();
        self.device.vsync();
        self.device.put_disp_env(&self.disp[self.active]);
        self.device.put_draw_env(&self.draw[self.active]);
        self.device.set_display_mask(true);
        self.active ^= 1;
        self.frames += 1;
        trace!("present #{} -> buffer {}", self.frames, self.active);
    }

    /// Append a line to the text overlay.
    pub fn write_line(&mut self, args: fmt::Arguments<'_>) {
        self.console.write_line(args);
    }

    /// Render the pending overlay text into the current draw buffer.
    pub fn flush_text(&mut self) {
        self.console.flush(&mut self.device);
    }

    /// Buffer applied by the next [`present`](Self::present).
    pub fn active(&self) -> usize {
        self.active
    }

    pub fn mode(&self) -> VideoMode {
        self.mode
    }

    pub fn disp_env(&self, index: usize) -> &DispEnv {
        &self.disp[index & 1]
    }

    pub fn draw_env(&self, index: usize) -> &DrawEnv {
        &self.draw[index & 1]
    }

    /// Frames presented since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn console(&self) -> &TextConsole {
        &self.console
    }

    pub fn device(&self) -> &G {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut G {
        &mut self.device
    }

    pub fn release(self) -> G {
        self.device
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
