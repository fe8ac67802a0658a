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

mod frame_table;
mod page_swap;
mod page_swap_config;
mod page_table;
mod reference_outcome;
mod shared_page_swap;
mod statistics;
mod util;

#[cfg(test)]
mod test;

#[cfg(feature = "benchmarks")]
pub mod benchmarks;

pub mod modules;

pub use crate::page_swap::PageSwap;
pub use frame_table::{Frame, FrameIndex, FrameTable};
pub use page_swap_config::PageSwapConfig;
pub use page_table::{PageNumber, PageTable, PageTableEntry};
pub use reference_outcome::{InitializationError, PageFault, ReferenceOutcome, SwapError};
pub use shared_page_swap::SharedPageSwap;
pub use statistics::SwapStatistics;
