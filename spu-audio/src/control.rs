//! Coarse on/off and gain control of the sound processor's output.
//!
//! [`Spu`](crate::spu::Spu) implements this on top of its own driver calls:
//!
//! | Call | SPU effect |
//! |------|------------|
//! | `enable` | full [`Spu::init`](crate::spu::Spu::init): device reset, allocation table cleared, master volume written, transfer IRQ off |
//! | `disable` | key off on all 24 voices, master volume 0 on both channels |
//! | `volume` | master volume `round(level * 0x3FFF)` on both channels |

/// Master-section control of a sound output.
pub trait AudioControl {
    type Error;

    /// Re-initialize the output. Sample memory handed out earlier is no
    /// longer tracked afterwards and must be uploaded again.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Send every voice into its release phase and mute the master output.
    /// Voice attributes and sample memory are left as they were.
    fn disable(&mut self) -> Result<(), Self::Error>;

    /// Set the master volume on both channels. `level` is clamped to
    /// `0.0..=1.0`; 1.0 is the register maximum.
    fn volume(&mut self, level: f32) -> Result<(), Self::Error>;
}
