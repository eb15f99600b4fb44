//! Fixed-block kernel heap.
//!
//! Sixteen 256-byte blocks handed out first-fit. Nothing in the shell
//! core allocates; the heap exists as a kernel resource whose accounting
//! feeds the `sysinfo` report. There is no global allocator: the heap is
//! owned by the boot [`Context`](crate::Context) like every other piece
//! of mutable state.

/// Number of fixed blocks.
pub const BLOCK_COUNT: usize = 16;

/// Bytes per block.
pub const BLOCK_SIZE: usize = 256;

/// Total heap size in bytes.
pub const HEAP_SIZE: usize = BLOCK_COUNT * BLOCK_SIZE;

/// Heap accounting snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemStats {
    pub total: usize,
    pub used: usize,
    pub free: usize,
}

struct Block {
    used: bool,
    size: usize,
    data: [u8; BLOCK_SIZE],
}

const FREE_BLOCK: Block = Block {
    used: false,
    size: 0,
    data: [0; BLOCK_SIZE],
};

/// Opaque handle to an allocated block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHandle(usize);

pub struct FixedHeap {
    blocks: [Block; BLOCK_COUNT],
}

impl FixedHeap {
    pub const fn new() -> Self {
        Self {
            blocks: [FREE_BLOCK; BLOCK_COUNT],
        }
    }

    /// Claim the first free block, or `None` when the request exceeds the
    /// block size or every block is taken.
    pub fn alloc(&mut self, size: usize) -> Option<BlockHandle> {
        if size > BLOCK_SIZE {
            return None;
        }
        let idx = self.blocks.iter().position(|b| !b.used)?;
        self.blocks[idx].used = true;
        self.blocks[idx].size = size;
        Some(BlockHandle(idx))
    }

    /// Release a block. Freeing an already-free handle is a no-op.
    pub fn free(&mut self, handle: BlockHandle) {
        self.blocks[handle.0] = FREE_BLOCK;
    }

    /// Byte view of an allocated block.
    pub fn block_mut(&mut self, handle: BlockHandle) -> &mut [u8] {
        let size = self.blocks[handle.0].size;
        &mut self.blocks[handle.0].data[..size]
    }

    pub fn stats(&self) -> MemStats {
        let used: usize = self
            .blocks
            .iter()
            .filter(|b| b.used)
            .map(|b| b.size)
            .sum();
        MemStats {
            total: HEAP_SIZE,
            used,
            free: HEAP_SIZE - used,
        }
    }
}

impl Default for FixedHeap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_heap_is_fully_free() {
        let heap = FixedHeap::new();
        let stats = heap.stats();
        assert_eq!(stats.total, HEAP_SIZE);
        assert_eq!(stats.used, 0);
        assert_eq!(stats.free, HEAP_SIZE);
    }

    #[test]
    fn alloc_and_free_update_accounting() {
        let mut heap = FixedHeap::new();
        let a = heap.alloc(100).unwrap();
        let b = heap.alloc(50).unwrap();
        assert_eq!(heap.stats().used, 150);

        heap.block_mut(a).fill(0xAB);
        assert_eq!(heap.block_mut(a).len(), 100);

        heap.free(a);
        assert_eq!(heap.stats().used, 50);
        heap.free(b);
        assert_eq!(heap.stats().free, HEAP_SIZE);
    }

    #[test]
    fn exhaustion_and_oversize_requests_fail() {
        let mut heap = FixedHeap::new();
        assert!(heap.alloc(BLOCK_SIZE + 1).is_none());
        for _ in 0..BLOCK_COUNT {
            assert!(heap.alloc(8).is_some());
        }
        assert!(heap.alloc(8).is_none());
    }

    #[test]
    fn freed_blocks_are_reused_first_fit() {
        let mut heap = FixedHeap::new();
        let first = heap.alloc(8).unwrap();
        let _second = heap.alloc(8).unwrap();
        heap.free(first);
        assert_eq!(heap.alloc(8), Some(first));
    }
}
