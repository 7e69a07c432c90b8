use super::{SpuAddr, VoiceConfig, VoiceMask, Volume};

/// How the device moves bytes from main RAM into sound RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferMode {
    /// DMA; the CPU is free while the transfer runs.
    #[default]
    Dma,
    /// Programmed I/O through the transfer FIFO.
    Io,
}

/// Key state for [`SoundDevice::set_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Start the voice from its waveform start address.
    On,
    /// Enter the release phase.
    Off,
}

/// Attributes shared by all voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommonAttr {
    /// Which fields to apply (`COMMON_*` bits).
    pub mask: u32,
    pub master_volume: Volume,
}

/// Access to the sound processing unit.
///
/// Mirrors the operations the console's sound library exposes. Calls are
/// infallible at this level; the [`Spu`](super::Spu) driver adds allocation
/// bookkeeping and the bounded transfer wait on top.
pub trait SoundDevice {
    /// Reset the sound processor: all voices off, transfer cursor cleared.
    fn reset(&mut self);

    fn set_common_attr(&mut self, attr: &CommonAttr);

    /// Enable or disable the sound RAM address-match interrupt.
    fn set_irq(&mut self, enabled: bool);

    fn set_transfer_mode(&mut self, mode: TransferMode);

    /// Move the transfer cursor. Returns the address the device accepted, or
    /// [`SpuAddr::NULL`] if it rejected it.
    fn set_transfer_start_addr(&mut self, addr: SpuAddr) -> SpuAddr;

    /// Current transfer cursor.
    fn transfer_start_addr(&self) -> SpuAddr;

    /// Start copying `data` to the transfer cursor. Returns the number of
    /// bytes the device queued. Completion is signalled through
    /// [`is_transfer_completed`](Self::is_transfer_completed).
    fn write(&mut self, data: &[u8]) -> usize;

    /// Poll the transfer completion flag.
    fn is_transfer_completed(&mut self) -> bool;

    /// Apply `config` to every voice in `config.voices`.
    fn set_voice_attr(&mut self, config: &VoiceConfig);

    fn set_key(&mut self, key: Key, voices: VoiceMask);
}
