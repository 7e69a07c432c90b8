//! VAG sample assets.
//!
//! A VAG file is a 48-byte big-endian header followed by `data_size` bytes of
//! SPU ADPCM. The payload is never decoded here; the sound hardware does that.

mod header;

pub use header::{VagAsset, VagHeader, Validation, VAG_HEADER_LEN, VAG_MAGIC};
