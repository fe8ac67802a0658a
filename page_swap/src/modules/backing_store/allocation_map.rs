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

use crate::util::bit_array::BitArray;

use super::RESERVED_BLOCK_COUNT;

/// Bookkeeping of which blocks of a backing store were handed out
pub(crate) struct BlockAllocationMap {
    allocated: BitArray,
}

impl BlockAllocationMap {
    pub(crate) fn new(block_count: usize) -> Self {
        Self {
            allocated: BitArray::new(block_count),
        }
    }

    #[inline]
    pub(crate) fn block_count(&self) -> usize {
        self.allocated.len()
    }

    pub(crate) fn allocate(&mut self, block_id: usize) -> Result<(), ()> {
        if block_id < RESERVED_BLOCK_COUNT || block_id >= self.block_count() {
            return Err(());
        }
        if self.allocated.is_set(block_id) {
            return Err(());
        }

        self.allocated.set(true, block_id);
        Ok(())
    }

    #[inline]
    pub(crate) fn is_allocated(&self, block_id: usize) -> bool {
        block_id < self.block_count() && self.allocated.is_set(block_id)
    }

    /// Checks if a buffer of `len` bytes may be transferred from/to `block_id`
    #[inline]
    pub(crate) fn check_access(&self, block_id: usize, len: usize, block_size: usize) -> Result<(), ()> {
        if len != block_size || !self.is_allocated(block_id) {
            return Err(());
        }

        Ok(())
    }
}
