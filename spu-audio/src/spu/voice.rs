//! Voice selection, pitch, envelope and the full voice attribute record.

use core::ops::{BitOr, BitOrAssign};

use log::warn;

use super::registers as reg;
use super::SpuAddr;
use crate::constants::{
    NUM_VOICES, PITCH_MAX, PITCH_SHIFT, PITCH_UNIT, REFERENCE_SAMPLE_RATE, SUSTAIN_LEVEL_MAX,
    VOICE_VOLUME,
};

// ── Voice mask ─────────────────────────────────────────────────────────────

/// Set of hardware voices, one bit per voice (low 24 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VoiceMask(u32);

impl VoiceMask {
    pub const NONE: VoiceMask = VoiceMask(0);
    pub const CH0: VoiceMask = VoiceMask(1);
    pub const ALL: VoiceMask = VoiceMask(reg::VOICE_BITS);

    /// Mask holding voice `n`, or an empty mask if `n` is out of range.
    pub const fn voice(n: u8) -> Self {
        if n < NUM_VOICES {
            VoiceMask(1 << n)
        } else {
            VoiceMask(0)
        }
    }

    /// Mask from raw bits; bits above voice 23 are dropped.
    pub const fn from_bits(bits: u32) -> Self {
        VoiceMask(bits & reg::VOICE_BITS)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, other: VoiceMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Voice numbers in the mask, lowest first.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (0..NUM_VOICES).filter(move |&n| self.0 & (1 << n) != 0)
    }
}

impl BitOr for VoiceMask {
    type Output = VoiceMask;

    fn bitor(self, rhs: VoiceMask) -> VoiceMask {
        VoiceMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for VoiceMask {
    fn bitor_assign(&mut self, rhs: VoiceMask) {
        self.0 |= rhs.0;
    }
}

// ── Volume ─────────────────────────────────────────────────────────────────

/// Left/right gain, 0x3FFF = full scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Volume {
    pub left: i16,
    pub right: i16,
}

impl Volume {
    pub const fn both(level: i16) -> Self {
        Volume {
            left: level,
            right: level,
        }
    }
}

// ── Pitch ──────────────────────────────────────────────────────────────────

/// `(sample_rate << 12) / 44100`, truncated.
///
/// 4096 means native speed; 22.05 kHz gives 2048.
pub const fn compute_pitch(sample_rate: u32) -> u32 {
    (((sample_rate as u64) << PITCH_SHIFT) / REFERENCE_SAMPLE_RATE as u64) as u32
}

/// Voice pitch register value (4.12 fixed point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pitch(u16);

impl Pitch {
    pub const UNIT: Pitch = Pitch(PITCH_UNIT);

    /// Pitch that plays a sample recorded at `sample_rate` at its native speed.
    ///
    /// Rates above four times the reference saturate at [`PITCH_MAX`].
    pub fn from_sample_rate(sample_rate: u32) -> Self {
        let raw = compute_pitch(sample_rate);
        if raw > PITCH_MAX as u32 {
            warn!("pitch {:#x} for {} Hz clamped to {:#x}", raw, sample_rate, PITCH_MAX);
            return Pitch(PITCH_MAX);
        }
        Pitch(raw as u16)
    }

    pub const fn from_raw(raw: u16) -> Self {
        Pitch(raw)
    }

    pub const fn get(self) -> u16 {
        self.0
    }
}

// ── Envelope ───────────────────────────────────────────────────────────────

/// ADSR curve shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AdsrMode {
    Direct = reg::ADSR_DIRECT,
    LinearIncN = reg::ADSR_LINEAR_INC_N,
    LinearIncR = reg::ADSR_LINEAR_INC_R,
    LinearDecN = reg::ADSR_LINEAR_DEC_N,
    LinearDecR = reg::ADSR_LINEAR_DEC_R,
    ExpIncN = reg::ADSR_EXP_INC_N,
    ExpIncR = reg::ADSR_EXP_INC_R,
    ExpDec = reg::ADSR_EXP_DEC,
}

impl AdsrMode {
    pub const fn code(self) -> u8 {
        self as u8
    }

    const fn is_exponential(self) -> bool {
        matches!(self, AdsrMode::ExpIncN | AdsrMode::ExpIncR | AdsrMode::ExpDec)
    }

    const fn is_decreasing(self) -> bool {
        matches!(
            self,
            AdsrMode::LinearDecN | AdsrMode::LinearDecR | AdsrMode::ExpDec
        )
    }
}

/// Hardware envelope. Rates count down: 0 is the fastest slope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Envelope {
    pub attack_mode: AdsrMode,
    pub sustain_mode: AdsrMode,
    pub release_mode: AdsrMode,
    /// 0..=0x7F
    pub attack_rate: u8,
    /// 0..=0x0F
    pub decay_rate: u8,
    /// 0..=0x7F
    pub sustain_rate: u8,
    /// 0..=0x1F
    pub release_rate: u8,
    /// 0..=0x0F
    pub sustain_level: u8,
}

impl Envelope {
    /// Instant attack, decay and release at full sustain: the sample plays
    /// through once at constant gain.
    pub const fn one_shot() -> Self {
        Envelope {
            attack_mode: AdsrMode::LinearIncN,
            sustain_mode: AdsrMode::LinearIncN,
            release_mode: AdsrMode::LinearDecN,
            attack_rate: 0,
            decay_rate: 0,
            sustain_rate: 0,
            release_rate: 0,
            sustain_level: SUSTAIN_LEVEL_MAX,
        }
    }

    /// Pack into the voice's two ADSR registers `(adsr1, adsr2)`.
    ///
    /// - ADSR1: bit 15 attack exp, 14:8 attack rate, 7:4 decay rate, 3:0 sustain level
    /// - ADSR2: bit 15 sustain exp, 14 sustain decrease, 12:6 sustain rate,
    ///   5 release exp, 4:0 release rate
    pub fn to_registers(&self) -> (u16, u16) {
        let adsr1 = ((self.attack_mode.is_exponential() as u16) << 15)
            | (((self.attack_rate & 0x7F) as u16) << 8)
            | (((self.decay_rate & 0x0F) as u16) << 4)
            | (self.sustain_level & 0x0F) as u16;
        let adsr2 = ((self.sustain_mode.is_exponential() as u16) << 15)
            | ((self.sustain_mode.is_decreasing() as u16) << 14)
            | (((self.sustain_rate & 0x7F) as u16) << 6)
            | ((self.release_mode.is_exponential() as u16) << 5)
            | (self.release_rate & 0x1F) as u16;
        (adsr1, adsr2)
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::one_shot()
    }
}

// ── Voice attributes ───────────────────────────────────────────────────────

/// Complete playback parameters for one or more voices.
///
/// Committing a `VoiceConfig` overwrites every field it carries on each voice
/// in `voices`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceConfig {
    pub voices: VoiceMask,
    pub volume: Volume,
    pub pitch: Pitch,
    /// Waveform data start address.
    pub start: SpuAddr,
    pub envelope: Envelope,
}

impl VoiceConfig {
    /// Constant-gain, one-shot playback of the sample at `start`.
    pub const fn one_shot(voices: VoiceMask, pitch: Pitch, start: SpuAddr) -> Self {
        VoiceConfig {
            voices,
            volume: Volume::both(VOICE_VOLUME),
            pitch,
            start,
            envelope: Envelope::one_shot(),
        }
    }

    pub fn with_volume(mut self, volume: Volume) -> Self {
        self.volume = volume;
        self
    }

    /// Attribute mask naming every field of the record.
    pub const fn attr_mask(&self) -> u32 {
        reg::VOICE_FULL
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
