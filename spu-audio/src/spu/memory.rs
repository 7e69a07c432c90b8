use core::fmt;

use heapless::Vec;
use log::{debug, warn};

use crate::constants::{MALLOC_MAX, SPU_ALLOC_ALIGN, SPU_RAM_SIZE, SPU_RAM_USER_START};
use crate::error::{Error, Result};

/// Byte address in sound RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SpuAddr(pub u32);

impl SpuAddr {
    /// Returned by the hardware when it rejects an address.
    pub const NULL: SpuAddr = SpuAddr(0);

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for SpuAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#08x}", self.0)
    }
}

/// A live allocation: start address and size rounded up to [`SPU_ALLOC_ALIGN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpuBlock {
    addr: SpuAddr,
    size: u32,
}

impl SpuBlock {
    pub const fn addr(&self) -> SpuAddr {
        self.addr
    }

    pub const fn size(&self) -> u32 {
        self.size
    }

    /// First address past the block.
    pub const fn end(&self) -> u32 {
        self.addr.0 + self.size
    }
}

/// Bounded first-fit allocator over the SPU's address space.
///
/// At most `N` blocks can be live at once. The table is kept sorted by address
/// so a free gap can be found in one pass. Nothing here touches sound RAM; the
/// allocator only hands out address ranges.
pub struct SpuAllocator<const N: usize = MALLOC_MAX> {
    base: u32,
    end: u32,
    blocks: Vec<SpuBlock, N>,
}

impl<const N: usize> SpuAllocator<N> {
    /// Allocator over the whole user area of sound RAM.
    pub const fn new() -> Self {
        Self::with_region(SPU_RAM_USER_START, SPU_RAM_SIZE)
    }

    /// Allocator over `[base, end)`. `base` must be aligned to [`SPU_ALLOC_ALIGN`].
    pub const fn with_region(base: u32, end: u32) -> Self {
        SpuAllocator {
            base,
            end,
            blocks: Vec::new(),
        }
    }

    /// Drop every allocation.
    pub fn reset(&mut self) {
        self.blocks.clear();
    }

    /// Reserve `size` bytes.
    ///
    /// Fails with [`Error::DeviceMemoryExhausted`] when `N` blocks are already
    /// live or no gap is large enough. Existing blocks are never disturbed.
    pub fn alloc(&mut self, size: u32) -> Result<SpuBlock> {
        if size == 0 {
            return Err(Error::EmptyAllocation);
        }

        let exhausted = Error::DeviceMemoryExhausted {
            requested: size,
            live: self.blocks.len(),
            capacity: N,
        };

        if self.blocks.is_full() {
            warn!("SPU allocation table full ({} blocks)", N);
            return Err(exhausted);
        }

        let rounded = size
            .checked_add(SPU_ALLOC_ALIGN - 1)
            .map(|s| s & !(SPU_ALLOC_ALIGN - 1))
            .ok_or(exhausted)?;

        // Walk the gaps between live blocks, lowest address first.
        let mut cursor = self.base;
        let mut index = self.blocks.len();
        for (i, block) in self.blocks.iter().enumerate() {
            if block.addr.0 - cursor >= rounded {
                index = i;
                break;
            }
            cursor = block.end();
        }
        if index == self.blocks.len() && self.end.saturating_sub(cursor) < rounded {
            warn!("SPU RAM has no {} byte gap", rounded);
            return Err(exhausted);
        }

        let block = SpuBlock {
            addr: SpuAddr(cursor),
            size: rounded,
        };
        self.blocks.insert(index, block).map_err(|_| exhausted)?;
        debug!("spu alloc {} bytes at {}", rounded, block.addr);
        Ok(block)
    }

    /// Release the block starting at `addr`.
    pub fn free(&mut self, addr: SpuAddr) -> Result<()> {
        let index = self
            .blocks
            .iter()
            .position(|b| b.addr == addr)
            .ok_or(Error::UnknownBlock(addr))?;
        self.blocks.remove(index);
        debug!("spu free {}", addr);
        Ok(())
    }

    /// Live blocks, sorted by address.
    pub fn blocks(&self) -> &[SpuBlock] {
        &self.blocks
    }

    pub fn live(&self) -> usize {
        self.blocks.len()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Bytes not covered by any live block.
    pub fn bytes_free(&self) -> u32 {
        let used: u32 = self.blocks.iter().map(|b| b.size).sum();
        (self.end - self.base) - used
    }
}

impl<const N: usize> Default for SpuAllocator<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
