//! SPU driver.
//!
//! Wraps a [`SoundDevice`] with the sound-memory allocation table, the
//! upload-and-wait sequence and voice/key helpers.
//!
//! # Example
//!
//! ```ignore
//! let mut spu = Spu::new(device, delay);
//! spu.init();                                  // reset, master volume, IRQ off
//! let upload = spu.upload_sample(payload)?;    // alloc + DMA + wait
//! spu.configure_voice(VoiceMask::CH0, Pitch::from_sample_rate(22_050), upload.address());
//! spu.trigger(VoiceMask::CH0);
//! ```

use embedded_hal::delay::DelayNs;
use log::{debug, error, info};

use super::registers as reg;
use super::{
    CommonAttr, Key, Pitch, SoundDevice, SpuAddr, SpuAllocator, SpuBlock, TransferMode,
    VoiceConfig, VoiceMask, Volume,
};
use crate::constants::{MALLOC_MAX, MASTER_VOLUME, TRANSFER_POLL_US, TRANSFER_TIMEOUT_US};
use crate::control::AudioControl;
use crate::error::{Error, Result};

/// Outcome of [`Spu::upload_sample`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upload {
    /// Block holding the sample.
    pub block: SpuBlock,
    /// Address the device reported when the transfer cursor was set.
    pub returned_start: SpuAddr,
    /// Transfer cursor read back from the device before the write.
    pub queried_start: SpuAddr,
    /// Bytes asked to transfer.
    pub requested: u32,
    /// Bytes the device queued.
    pub transferred: usize,
}

impl Upload {
    /// Start address of the uploaded sample in sound RAM.
    pub const fn address(&self) -> SpuAddr {
        self.block.addr()
    }
}

// ── Driver struct ──────────────────────────────────────────────────────────

/// Sound processing unit driver.
///
/// Generic over the device and a delay provider. The delay only paces the
/// poll loop that waits for DMA completion.
pub struct Spu<S, D, const N: usize = MALLOC_MAX> {
    device: S,
    delay: D,
    allocator: SpuAllocator<N>,
    master_volume: Volume,
    transfer_timeout_us: u32,
    transfer_poll_us: u32,
    initialized: bool,
}

impl<S, D, const N: usize> Spu<S, D, N>
where
    S: SoundDevice,
    D: DelayNs,
{
    pub fn new(device: S, delay: D) -> Self {
        Self {
            device,
            delay,
            allocator: SpuAllocator::new(),
            master_volume: Volume::both(MASTER_VOLUME),
            transfer_timeout_us: TRANSFER_TIMEOUT_US,
            transfer_poll_us: TRANSFER_POLL_US,
            initialized: false,
        }
    }

    /// Master volume written by [`init`](Self::init).
    pub fn with_master_volume(mut self, volume: Volume) -> Self {
        self.master_volume = volume;
        self
    }

    /// Bound on the DMA completion wait and the delay between polls.
    pub fn with_transfer_timeout(mut self, timeout_us: u32, poll_us: u32) -> Self {
        self.transfer_timeout_us = timeout_us;
        self.transfer_poll_us = poll_us.max(1);
        self
    }

    /// Give back the device and delay.
    pub fn release(self) -> (S, D) {
        (self.device, self.delay)
    }

    pub fn device(&self) -> &S {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut S {
        &mut self.device
    }

    pub fn allocator(&self) -> &SpuAllocator<N> {
        &self.allocator
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // ── Init ───────────────────────────────────────────────────────────

    /// Reset the sound processor and the allocation table, set master
    /// volume on both channels and disable the transfer interrupt.
    ///
    /// Every block handed out before is forgotten.
    pub fn init(&mut self) {
        self.device.reset();
        self.allocator.reset();
        self.write_master_volume(self.master_volume);
        self.device.set_irq(false);
        self.initialized = true;
        info!(
            "SPU init: {} block table, master volume {:#06x}/{:#06x}",
            N, self.master_volume.left, self.master_volume.right
        );
    }

    /// Set master volume immediately.
    pub fn set_master_volume(&mut self, volume: Volume) {
        self.master_volume = volume;
        self.write_master_volume(volume);
    }

    fn write_master_volume(&mut self, volume: Volume) {
        self.device.set_common_attr(&CommonAttr {
            mask: reg::COMMON_MVOLL | reg::COMMON_MVOLR,
            master_volume: volume,
        });
    }

    // ── Sound memory ───────────────────────────────────────────────────

    /// Allocate sound RAM for `payload`, DMA it there and block until the
    /// device reports completion.
    ///
    /// The device must accept the block's address as the transfer cursor and
    /// queue the whole payload. On any failure the block is freed again
    /// before the error is returned.
    pub fn upload_sample(&mut self, payload: &[u8]) -> Result<Upload> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }

        let requested = u32::try_from(payload.len()).map_err(|_| Error::DeviceMemoryExhausted {
            requested: u32::MAX,
            live: self.allocator.live(),
            capacity: N,
        })?;

        let block = self.allocator.alloc(requested).map_err(|e| {
            error!("SPU alloc of {} bytes failed: {}", requested, e);
            e
        })?;

        let returned_start = self.device.set_transfer_start_addr(block.addr());
        if returned_start != block.addr() {
            return Err(self.abort_upload(
                block,
                Error::TransferRejected {
                    addr: block.addr(),
                    returned: returned_start,
                },
            ));
        }
        let queried_start = self.device.transfer_start_addr();

        self.device.set_transfer_mode(TransferMode::Dma);
        let transferred = self.device.write(payload);
        if transferred != payload.len() {
            return Err(self.abort_upload(
                block,
                Error::ShortTransfer {
                    requested,
                    transferred,
                },
            ));
        }

        if let Err(e) = self.wait_for_transfer() {
            return Err(self.abort_upload(block, e));
        }

        debug!(
            "uploaded {}/{} bytes to {} (cursor {} / {})",
            transferred,
            requested,
            block.addr(),
            returned_start,
            queried_start
        );

        Ok(Upload {
            block,
            returned_start,
            queried_start,
            requested,
            transferred,
        })
    }

    fn abort_upload(&mut self, block: SpuBlock, e: Error) -> Error {
        error!("upload to {} failed: {}", block.addr(), e);
        // The block was allocated by the caller, so it is still live.
        let _ = self.allocator.free(block.addr());
        e
    }

    /// Poll the completion flag until it is set or the timeout elapses.
    pub fn wait_for_transfer(&mut self) -> Result<()> {
        let mut waited_us: u32 = 0;
        loop {
            if self.device.is_transfer_completed() {
                return Ok(());
            }
            if waited_us >= self.transfer_timeout_us {
                return Err(Error::TransferTimeout { waited_us });
            }
            self.delay.delay_us(self.transfer_poll_us);
            waited_us = waited_us.saturating_add(self.transfer_poll_us);
        }
    }

    /// Return a block to the allocation table.
    pub fn free(&mut self, block: SpuBlock) -> Result<()> {
        self.allocator.free(block.addr())
    }

    // ── Voices ─────────────────────────────────────────────────────────

    /// Commit one-shot playback of the sample at `start` to `voices` and
    /// return the record that was written.
    pub fn configure_voice(&mut self, voices: VoiceMask, pitch: Pitch, start: SpuAddr) -> VoiceConfig {
        let config = VoiceConfig::one_shot(voices, pitch, start);
        self.commit_voice(&config);
        config
    }

    /// Overwrite the playback parameters of every voice in `config.voices`.
    pub fn commit_voice(&mut self, config: &VoiceConfig) {
        self.device.set_voice_attr(config);
        debug!(
            "voice attr {:#08x}: pitch {:#06x}, start {}",
            config.voices.bits(),
            config.pitch.get(),
            config.start
        );
    }

    /// Key on: restart every voice in `voices` from its start address.
    pub fn trigger(&mut self, voices: VoiceMask) {
        self.device.set_key(Key::On, voices);
        debug!("key on {:#08x}", voices.bits());
    }

    /// Key off: move every voice in `voices` to its release phase.
    pub fn stop(&mut self, voices: VoiceMask) {
        self.device.set_key(Key::Off, voices);
        debug!("key off {:#08x}", voices.bits());
    }
}

// ── AudioControl trait implementation ──────────────────────────────────────

impl<S, D, const N: usize> AudioControl for Spu<S, D, N>
where
    S: SoundDevice,
    D: DelayNs,
{
    type Error = Error;

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.init();
        Ok(())
    }

    /// Key off every voice and silence the master output.
    fn disable(&mut self) -> Result<(), Self::Error> {
        self.stop(VoiceMask::ALL);
        self.set_master_volume(Volume::both(0));
        Ok(())
    }

    /// `0.0..=1.0` maps onto `0..=0x3FFF` on both channels.
    fn volume(&mut self, level: f32) -> Result<(), Self::Error> {
        let level = level.clamp(0.0, 1.0);
        let raw = libm::roundf(level * MASTER_VOLUME as f32) as i16;
        self.set_master_volume(Volume::both(raw));
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
