//! Fixed-capacity text console.

use core::fmt::{self, Write};

use heapless::String;
use log::warn;

use super::{GraphicsDevice, Rect};
use crate::constants::{
    TEXT_MAX_CHARS, TEXT_WINDOW_HEIGHT, TEXT_WINDOW_WIDTH, TEXT_WINDOW_X, TEXT_WINDOW_Y,
};

/// Text accumulated between flushes and drawn into a fixed window.
///
/// Holds at most `N` bytes. Text past that is dropped and reported once per
/// flush.
pub struct TextConsole<const N: usize = TEXT_MAX_CHARS> {
    window: Rect,
    text: String<N>,
    overflowed: bool,
}

impl<const N: usize> TextConsole<N> {
    pub const fn new(window: Rect) -> Self {
        TextConsole {
            window,
            text: String::new(),
            overflowed: false,
        }
    }

    pub fn window(&self) -> Rect {
        self.window
    }

    /// Text pending for the next flush.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether anything was dropped since the last flush.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Append one formatted line.
    pub fn write_line(&mut self, args: fmt::Arguments<'_>) {
        // Overflow is recorded by `write_str`.
        let _ = self.write_fmt(args).and_then(|_| self.write_char('\n'));
    }

    /// Draw the pending text and start over.
    pub fn flush<G: GraphicsDevice>(&mut self, gpu: &mut G) {
        if self.overflowed {
            warn!("text console full, output truncated to {} bytes", N);
        }
        gpu.draw_text(&self.window, &self.text);
        self.clear();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.overflowed = false;
    }
}

impl<const N: usize> Default for TextConsole<N> {
    fn default() -> Self {
        Self::new(Rect::new(
            TEXT_WINDOW_X,
            TEXT_WINDOW_Y,
            TEXT_WINDOW_WIDTH,
            TEXT_WINDOW_HEIGHT,
        ))
    }
}

impl<const N: usize> Write for TextConsole<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.overflowed {
            return Err(fmt::Error);
        }
        if self.text.push_str(s).is_err() {
            // Keep whatever fits so the tail of the frame is visibly cut.
            for c in s.chars() {
                if self.text.push(c).is_err() {
                    break;
                }
            }
            self.overflowed = true;
            return Err(fmt::Error);
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
