// ── Sound RAM ──────────────────────────────────────────────────────────────

/// Size of the SPU's sound buffer address space in bytes.
pub const SPU_RAM_SIZE: u32 = 0x8_0000;

/// First address available to sample data. Everything below holds the CD and
/// voice capture buffers and the hardware's dummy loop block.
pub const SPU_RAM_USER_START: u32 = 0x1010;

/// Allocation granularity. SPU address registers count in 8-byte units.
pub const SPU_ALLOC_ALIGN: u32 = 8;

/// Number of live blocks the sound memory allocation table can track.
pub const MALLOC_MAX: usize = 3;

/// Number of hardware playback voices.
pub const NUM_VOICES: u8 = 24;

// ── Pitch ──────────────────────────────────────────────────────────────────

/// Sample rate that plays back at unit pitch.
pub const REFERENCE_SAMPLE_RATE: u32 = 44_100;

/// Fractional bits of the pitch register.
pub const PITCH_SHIFT: u32 = 12;

/// Unit pitch: a sample recorded at [`REFERENCE_SAMPLE_RATE`] plays at its native speed.
pub const PITCH_UNIT: u16 = 1 << PITCH_SHIFT;

/// Highest pitch the voice hardware honours (four times native speed, minus one step).
pub const PITCH_MAX: u16 = 0x3FFF;

// ── Volumes ────────────────────────────────────────────────────────────────

/// Master output volume written on both channels at init.
pub const MASTER_VOLUME: i16 = 0x3FFF;

/// Per-voice volume used for sample playback.
pub const VOICE_VOLUME: i16 = 0x1000;

/// Maximum ADSR sustain level.
pub const SUSTAIN_LEVEL_MAX: u8 = 0xF;

// ── Transfers ──────────────────────────────────────────────────────────────

/// Upper bound on how long an upload waits for the DMA completion flag.
pub const TRANSFER_TIMEOUT_US: u32 = 1_000_000;

/// Delay between two polls of the transfer completion flag.
pub const TRANSFER_POLL_US: u32 = 100;

// ── Display ────────────────────────────────────────────────────────────────

/// Horizontal resolution of each buffer.
pub const SCREEN_WIDTH: u16 = 320;

/// Vertical resolution of each buffer.
pub const SCREEN_HEIGHT: u16 = 240;

/// Vertical offset applied to both display regions in PAL timing.
pub const PAL_Y_OFFSET: u16 = 8;

/// Background fill colour for both draw regions.
pub const BACKGROUND_RGB: (u8, u8, u8) = (50, 50, 50);

/// VRAM position the debug font texture is loaded to.
pub const FONT_VRAM_X: u16 = 960;
pub const FONT_VRAM_Y: u16 = 0;

/// Text console window.
pub const TEXT_WINDOW_X: u16 = 8;
pub const TEXT_WINDOW_Y: u16 = 60;
pub const TEXT_WINDOW_WIDTH: u16 = 304;
pub const TEXT_WINDOW_HEIGHT: u16 = 200;

/// Maximum characters the text console accepts between flushes.
pub const TEXT_MAX_CHARS: usize = 500;

// ── Main loop ──────────────────────────────────────────────────────────────

/// Frames between two key-on events of the demo voice.
pub const REPLAY_INTERVAL_FRAMES: u16 = 180;
