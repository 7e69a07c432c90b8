//! Sound processing unit driver.
//!
//! The driver is generic over any [`SoundDevice`] (real registers, an
//! emulator, or a test double) and an [`embedded_hal::delay::DelayNs`] used to
//! pace the bounded wait for DMA completion.
//!
//! ```ignore
//! let mut spu = Spu::new(device, delay);
//! spu.init();
//! let upload = spu.upload_sample(asset.payload)?;
//! let pitch = Pitch::from_sample_rate(asset.sample_rate());
//! spu.configure_voice(VoiceMask::CH0, pitch, upload.address());
//! spu.trigger(VoiceMask::CH0);
//! ```

mod memory;
mod device;
mod driver;
pub(crate) mod registers;
mod voice;

pub use memory::{SpuAddr, SpuAllocator, SpuBlock};
pub use device::{CommonAttr, Key, SoundDevice, TransferMode};
pub use driver::{Spu, Upload};
pub use voice::{compute_pitch, AdsrMode, Envelope, Pitch, VoiceConfig, VoiceMask, Volume};
