use log::{debug, warn};

use crate::error::AssetError;

/// Size of the header that precedes the ADPCM payload.
pub const VAG_HEADER_LEN: usize = 48;

/// Tag identifying the VAG format.
pub const VAG_MAGIC: [u8; 4] = *b"VAGp";

/// How strictly [`VagAsset::parse`] treats the header tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Reject anything not tagged `VAGp`.
    #[default]
    Strict,
    /// Log a mismatched tag and carry on.
    Lenient,
}

/// Decoded VAG header. Numeric fields are host-endian.
///
/// On disk:
///
/// | Offset | Size | Field |
/// |--------|------|-------|
/// | 0 | 4 | `id` (`VAGp`) |
/// | 4 | 4 | `version` (BE) |
/// | 8 | 4 | reserved |
/// | 12 | 4 | `data_size` (BE, payload bytes) |
/// | 16 | 4 | `sample_rate` (BE, Hz) |
/// | 20 | 12 | reserved |
/// | 32 | 16 | `name` (NUL padded) |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VagHeader {
    pub id: [u8; 4],
    pub version: u32,
    pub reserved: u32,
    pub data_size: u32,
    pub sample_rate: u32,
    pub reserved2: [u8; 12],
    pub name: [u8; 16],
}

fn be_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

impl VagHeader {
    /// Build a header for a payload of `data_size` bytes.
    pub fn new(data_size: u32, sample_rate: u32, name: &str) -> Self {
        let mut label = [0u8; 16];
        let n = name.len().min(label.len());
        label[..n].copy_from_slice(&name.as_bytes()[..n]);
        Self {
            id: VAG_MAGIC,
            version: 0x20,
            reserved: 0,
            data_size,
            sample_rate,
            reserved2: [0; 12],
            name: label,
        }
    }

    /// Decode the first [`VAG_HEADER_LEN`] bytes of `bytes`.
    ///
    /// Only the length is checked; see [`VagAsset::parse`] for tag and payload checks.
    pub fn parse(bytes: &[u8]) -> Result<Self, AssetError> {
        if bytes.len() < VAG_HEADER_LEN {
            return Err(AssetError::Truncated { len: bytes.len() });
        }

        let mut id = [0u8; 4];
        id.copy_from_slice(&bytes[0..4]);
        let mut reserved2 = [0u8; 12];
        reserved2.copy_from_slice(&bytes[20..32]);
        let mut name = [0u8; 16];
        name.copy_from_slice(&bytes[32..48]);

        Ok(Self {
            id,
            version: be_u32(bytes, 4),
            reserved: be_u32(bytes, 8),
            data_size: be_u32(bytes, 12),
            sample_rate: be_u32(bytes, 16),
            reserved2,
            name,
        })
    }

    /// Encode back to the on-disk big-endian layout.
    pub fn to_bytes(&self) -> [u8; VAG_HEADER_LEN] {
        let mut out = [0u8; VAG_HEADER_LEN];
        out[0..4].copy_from_slice(&self.id);
        out[4..8].copy_from_slice(&self.version.to_be_bytes());
        out[8..12].copy_from_slice(&self.reserved.to_be_bytes());
        out[12..16].copy_from_slice(&self.data_size.to_be_bytes());
        out[16..20].copy_from_slice(&self.sample_rate.to_be_bytes());
        out[20..32].copy_from_slice(&self.reserved2);
        out[32..48].copy_from_slice(&self.name);
        out
    }

    /// Whether the tag is `VAGp`.
    pub fn is_vag(&self) -> bool {
        self.id == VAG_MAGIC
    }

    /// Sample label up to the first NUL. Empty if it is not valid UTF-8.
    pub fn name(&self) -> &str {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.name.len());
        core::str::from_utf8(&self.name[..end]).unwrap_or("")
    }
}

/// A parsed asset: header plus a borrow of exactly `data_size` payload bytes.
#[derive(Debug, Clone, Copy)]
pub struct VagAsset<'a> {
    pub header: VagHeader,
    pub payload: &'a [u8],
}

impl<'a> VagAsset<'a> {
    /// Parse and bounds-check an embedded asset.
    ///
    /// A declared payload longer than the bytes after the header is always an
    /// error. The tag is enforced according to `validation`.
    pub fn parse(bytes: &'a [u8], validation: Validation) -> Result<Self, AssetError> {
        let header = VagHeader::parse(bytes)?;

        if !header.is_vag() {
            match validation {
                Validation::Strict => return Err(AssetError::BadTag { found: header.id }),
                Validation::Lenient => {
                    warn!("VAG tag mismatch: {:?}, continuing", header.id);
                }
            }
        }

        let available = bytes.len() - VAG_HEADER_LEN;
        if header.data_size as usize > available {
            return Err(AssetError::PayloadOutOfBounds {
                declared: header.data_size,
                available,
            });
        }

        let payload = &bytes[VAG_HEADER_LEN..VAG_HEADER_LEN + header.data_size as usize];
        debug!(
            "VAG '{}': v{:#x}, {} bytes @ {} Hz",
            header.name(),
            header.version,
            header.data_size,
            header.sample_rate
        );

        Ok(Self { header, payload })
    }

    pub fn sample_rate(&self) -> u32 {
        self.header.sample_rate
    }

    pub fn data_size(&self) -> u32 {
        self.header.data_size
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
