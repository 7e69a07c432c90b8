//! Error types.
//!
//! Every error here is fatal for the demo: once the sample cannot be parsed,
//! stored or transferred there is no way to play it, so setup aborts before
//! the frame loop starts.

use thiserror::Error;

use crate::spu::SpuAddr;

/// Why a VAG asset was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetError {
    #[error("asset is {len} bytes, shorter than the 48-byte header")]
    Truncated { len: usize },
    #[error("header tag {found:?} is not \"VAGp\"")]
    BadTag { found: [u8; 4] },
    #[error("header declares {declared} payload bytes but only {available} follow it")]
    PayloadOutOfBounds { declared: u32, available: usize },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("malformed asset: {0}")]
    MalformedAsset(#[from] AssetError),
    #[error("sound memory exhausted: cannot allocate {requested} bytes ({live}/{capacity} blocks live)")]
    DeviceMemoryExhausted {
        requested: u32,
        live: usize,
        capacity: usize,
    },
    #[error("device rejected transfer address {addr} (reported {returned})")]
    TransferRejected { addr: SpuAddr, returned: SpuAddr },
    #[error("device queued {transferred} of {requested} bytes")]
    ShortTransfer { requested: u32, transferred: usize },
    #[error("sound memory transfer did not complete within {waited_us} us")]
    TransferTimeout { waited_us: u32 },
    #[error("zero-byte sound memory allocation")]
    EmptyAllocation,
    #[error("no live sound memory block at {0}")]
    UnknownBlock(SpuAddr),
    #[error("sound processor used before init")]
    NotInitialized,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
