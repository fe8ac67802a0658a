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

use static_assertions::const_assert;

use crate::{modules::backing_store::RESERVED_BLOCK_COUNT, InitializationError, PageNumber};

pub const DEFAULT_PAGE_COUNT: usize = 2048;
pub const DEFAULT_FRAME_COUNT: usize = 512;
pub const DEFAULT_BLOCK_SIZE: usize = 1024;
pub const DEFAULT_DECAY_INTERVAL: usize = 100;

const_assert!(DEFAULT_FRAME_COUNT > 0);
const_assert!(DEFAULT_FRAME_COUNT <= DEFAULT_PAGE_COUNT);
const_assert!(DEFAULT_DECAY_INTERVAL > 0);

/// Capacities and constants of a single simulator run.
///
/// All values are fixed for the lifetime of a [`crate::PageSwap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSwapConfig {
    /// Number of entries in the page table
    pub page_count: usize,

    /// Number of entries in the frame table
    pub frame_count: usize,

    /// Size of one frame in bytes, has to match the block size of the backing store
    pub block_size: usize,

    /// Page `n` is stored in backing store block `n + block_offset`
    pub block_offset: usize,

    /// Every `decay_interval` ticks of the logical clock, reference bytes are decayed
    pub decay_interval: usize,
}

impl Default for PageSwapConfig {
    fn default() -> Self {
        Self {
            page_count: DEFAULT_PAGE_COUNT,
            frame_count: DEFAULT_FRAME_COUNT,
            block_size: DEFAULT_BLOCK_SIZE,
            block_offset: RESERVED_BLOCK_COUNT,
            decay_interval: DEFAULT_DECAY_INTERVAL,
        }
    }
}

impl PageSwapConfig {
    pub fn validate(&self) -> Result<(), InitializationError> {
        if self.frame_count == 0 {
            return Err(InitializationError::InvalidConfig(
                "frame count has to be greater than zero",
            ));
        }
        if self.frame_count > self.page_count {
            return Err(InitializationError::InvalidConfig(
                "frame count must not exceed page count",
            ));
        }
        if self.block_size == 0 {
            return Err(InitializationError::InvalidConfig(
                "block size has to be greater than zero",
            ));
        }
        if self.decay_interval == 0 {
            return Err(InitializationError::InvalidConfig(
                "decay interval has to be greater than zero",
            ));
        }

        Ok(())
    }

    /// Backing store block that holds `page`
    #[inline]
    pub const fn block_id(&self, page: PageNumber) -> usize {
        page.index() + self.block_offset
    }

    /// How many blocks a backing store has to provide for this configuration
    #[inline]
    pub const fn required_block_count(&self) -> usize {
        self.page_count + self.block_offset
    }

    /// Is the logical clock at a decay tick?
    #[inline]
    pub(crate) const fn is_decay_tick(&self, clock: usize) -> bool {
        clock != 0 && clock % self.decay_interval == 0
    }
}
