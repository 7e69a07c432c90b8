//! Display and drawing environments.

use crate::constants::{BACKGROUND_RGB, PAL_Y_OFFSET};

/// Rectangle in VRAM or screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Rect { x, y, w, h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

/// Video timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoMode {
    /// 60 Hz.
    Ntsc,
    /// 50 Hz; the visible picture starts [`PAL_Y_OFFSET`] lines lower.
    Pal,
}

impl VideoMode {
    pub const fn refresh_hz(self) -> u32 {
        match self {
            VideoMode::Ntsc => 60,
            VideoMode::Pal => 50,
        }
    }

    /// Vertical screen offset applied to display environments.
    pub const fn screen_y_offset(self) -> u16 {
        match self {
            VideoMode::Ntsc => 0,
            VideoMode::Pal => PAL_Y_OFFSET,
        }
    }
}

impl Default for VideoMode {
    fn default() -> Self {
        if cfg!(feature = "pal") {
            VideoMode::Pal
        } else {
            VideoMode::Ntsc
        }
    }
}

/// Which VRAM area is scanned out, and where on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispEnv {
    /// VRAM area shown.
    pub display: Rect,
    /// Screen-space placement of the picture.
    pub screen: Rect,
}

impl DispEnv {
    /// Show the `w`x`h` area at (`x`, `y`) at the screen origin.
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        DispEnv {
            display: Rect::new(x, y, w, h),
            screen: Rect::new(0, 0, w, h),
        }
    }

    pub const fn for_mode(mut self, mode: VideoMode) -> Self {
        self.screen.y += mode.screen_y_offset();
        self
    }
}

/// Where drawing commands land and how the area is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawEnv {
    /// Drawing is clipped to this VRAM area.
    pub clip: Rect,
    /// Added to every primitive's coordinates.
    pub offset: (u16, u16),
    /// Clear the clip area to `background` when the environment is applied.
    pub clear_background: bool,
    pub background: Rgb,
}

impl DrawEnv {
    /// Draw into the `w`x`h` area at (`x`, `y`), cleared to the standard
    /// background.
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        let (r, g, b) = BACKGROUND_RGB;
        DrawEnv {
            clip: Rect::new(x, y, w, h),
            offset: (x, y),
            clear_background: true,
            background: Rgb::new(r, g, b),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
