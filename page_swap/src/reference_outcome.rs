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

use core::fmt::{self, Display};

use crate::{FrameIndex, PageNumber};

/// Record of a resolved page fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "benchmarks", derive(serde::Serialize))]
pub struct PageFault {
    /// Page that was referenced and is now resident
    pub requested_page: PageNumber,

    /// Frame that now holds `requested_page`
    pub victim_frame: FrameIndex,

    /// Page that occupied `victim_frame` before and was written back
    pub evicted_page: PageNumber,
}

/// Backing store step that failed during a page swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapError {
    /// Writing the victim frame back to the block of its owner failed
    EvictionWrite { block_id: usize },

    /// Reading the requested page from its block failed
    FaultInRead { block_id: usize },

    /// The victim selection module returned a frame that does not exist
    InvalidVictim { victim_frame: FrameIndex },
}

impl Display for SwapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapError::EvictionWrite { block_id } => {
                write!(f, "could not write back block {}", block_id)
            }
            SwapError::FaultInRead { block_id } => {
                write!(f, "could not read block {}", block_id)
            }
            SwapError::InvalidVictim { victim_frame } => {
                write!(f, "victim {} does not exist", victim_frame)
            }
        }
    }
}

/// Result of referencing a single page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceOutcome {
    /// Page was already resident
    Hit,

    /// Page was not resident and was swapped in
    Faulted(PageFault),

    /// Page number lies outside of the page table, nothing was changed
    Invalid,

    /// Page swap was aborted, page and frame table are unchanged
    StorageError(SwapError),
}

impl ReferenceOutcome {
    /// The fault record, if this reference caused a successful page swap
    #[inline]
    pub fn fault(&self) -> Option<PageFault> {
        match self {
            ReferenceOutcome::Faulted(fault) => Some(*fault),
            _ => None,
        }
    }

    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, ReferenceOutcome::Hit)
    }
}

/// Errors that prevent a [`crate::PageSwap`] from being created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializationError {
    InvalidConfig(&'static str),

    /// Block size or block count of the backing store does not fit the configuration
    StorageMismatch,

    Allocate { block_id: usize },
    Write { block_id: usize },
    Read { block_id: usize },
}

impl Display for InitializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitializationError::InvalidConfig(reason) => write!(f, "invalid config: {}", reason),
            InitializationError::StorageMismatch => {
                write!(f, "backing store does not match the config")
            }
            InitializationError::Allocate { block_id } => {
                write!(f, "failed to request block {}", block_id)
            }
            InitializationError::Write { block_id } => {
                write!(f, "failed to write block {}", block_id)
            }
            InitializationError::Read { block_id } => {
                write!(f, "failed to read block {}", block_id)
            }
        }
    }
}
