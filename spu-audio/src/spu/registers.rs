//! Attribute mask bits and ADSR curve codes.
//!
//! Mask bits select which fields of a voice or common attribute record the
//! hardware applies. Values follow the console's sound library headers.

// Several bits are listed for completeness (volume modes, notes, loop
// address) but the driver always writes full records.
#![allow(dead_code)]

// ── Voice attribute mask ───────────────────────────────────────────────────

/// Left volume.
pub const VOICE_VOLL: u32 = 1 << 0;
/// Right volume.
pub const VOICE_VOLR: u32 = 1 << 1;
/// Left volume mode.
pub const VOICE_VOLMODEL: u32 = 1 << 2;
/// Right volume mode.
pub const VOICE_VOLMODER: u32 = 1 << 3;
/// Pitch (4.12 fixed point).
pub const VOICE_PITCH: u32 = 1 << 4;
/// Note, as an alternative to raw pitch.
pub const VOICE_NOTE: u32 = 1 << 5;
/// Sample base note.
pub const VOICE_SAMPLE_NOTE: u32 = 1 << 6;
/// Waveform data start address.
pub const VOICE_WDSA: u32 = 1 << 7;
/// Attack curve.
pub const VOICE_ADSR_AMODE: u32 = 1 << 8;
/// Sustain curve.
pub const VOICE_ADSR_SMODE: u32 = 1 << 9;
/// Release curve.
pub const VOICE_ADSR_RMODE: u32 = 1 << 10;
/// Attack rate.
pub const VOICE_ADSR_AR: u32 = 1 << 11;
/// Decay rate.
pub const VOICE_ADSR_DR: u32 = 1 << 12;
/// Sustain rate.
pub const VOICE_ADSR_SR: u32 = 1 << 13;
/// Release rate.
pub const VOICE_ADSR_RR: u32 = 1 << 14;
/// Sustain level.
pub const VOICE_ADSR_SL: u32 = 1 << 15;
/// Loop start address.
pub const VOICE_LSAX: u32 = 1 << 16;

/// Every field a one-shot [`VoiceConfig`](super::VoiceConfig) carries.
pub const VOICE_FULL: u32 = VOICE_VOLL
    | VOICE_VOLR
    | VOICE_PITCH
    | VOICE_WDSA
    | VOICE_ADSR_AMODE
    | VOICE_ADSR_SMODE
    | VOICE_ADSR_RMODE
    | VOICE_ADSR_AR
    | VOICE_ADSR_DR
    | VOICE_ADSR_SR
    | VOICE_ADSR_RR
    | VOICE_ADSR_SL;

// ── Common attribute mask ──────────────────────────────────────────────────

/// Master volume, left.
pub const COMMON_MVOLL: u32 = 1 << 0;
/// Master volume, right.
pub const COMMON_MVOLR: u32 = 1 << 1;
/// Master volume mode, left.
pub const COMMON_MVOLMODEL: u32 = 1 << 2;
/// Master volume mode, right.
pub const COMMON_MVOLMODER: u32 = 1 << 3;

// ── ADSR curve codes ───────────────────────────────────────────────────────

pub const ADSR_DIRECT: u8 = 0;
pub const ADSR_LINEAR_INC_N: u8 = 1;
pub const ADSR_LINEAR_INC_R: u8 = 2;
pub const ADSR_LINEAR_DEC_N: u8 = 3;
pub const ADSR_LINEAR_DEC_R: u8 = 4;
pub const ADSR_EXP_INC_N: u8 = 5;
pub const ADSR_EXP_INC_R: u8 = 6;
pub const ADSR_EXP_DEC: u8 = 7;

// ── Voice bits ─────────────────────────────────────────────────────────────

/// Valid bits of a voice mask (24 voices).
pub const VOICE_BITS: u32 = 0x00FF_FFFF;
