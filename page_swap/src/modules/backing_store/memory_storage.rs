/*
 *  Copyright (C) 2025  Markus Elias Gerber
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  You should have received a copy of the GNU General Public License
 *  along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use super::{BackingStoreModule, BlockAllocationMap};

/// Backing store that keeps all blocks in RAM
pub struct MemoryBackingStoreModule {
    blocks: Box<[u8]>,
    block_size: usize,
    allocation_map: BlockAllocationMap,
    closed: bool,
}

impl MemoryBackingStoreModule {
    pub fn new(block_count: usize, block_size: usize) -> Self {
        Self {
            blocks: vec![0u8; block_count * block_size].into_boxed_slice(),
            block_size,
            allocation_map: BlockAllocationMap::new(block_count),
            closed: false,
        }
    }

    #[inline]
    fn block_range(&self, block_id: usize) -> core::ops::Range<usize> {
        let start = block_id * self.block_size;
        start..start + self.block_size
    }
}

impl BackingStoreModule for MemoryBackingStoreModule {
    fn allocate(&mut self, block_id: usize) -> Result<(), ()> {
        if self.closed {
            return Err(());
        }
        self.allocation_map.allocate(block_id)
    }

    fn read(&mut self, block_id: usize, dest: &mut [u8]) -> Result<(), ()> {
        if self.closed {
            return Err(());
        }
        self.allocation_map
            .check_access(block_id, dest.len(), self.block_size)?;

        dest.copy_from_slice(&self.blocks[self.block_range(block_id)]);
        Ok(())
    }

    fn write(&mut self, block_id: usize, src: &[u8]) -> Result<(), ()> {
        if self.closed {
            return Err(());
        }
        self.allocation_map
            .check_access(block_id, src.len(), self.block_size)?;

        let range = self.block_range(block_id);
        self.blocks[range].copy_from_slice(src);
        Ok(())
    }

    fn get_block_size(&self) -> usize {
        self.block_size
    }

    fn get_block_count(&self) -> usize {
        self.allocation_map.block_count()
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
