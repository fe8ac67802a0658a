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

use crate::{Frame, FrameIndex, FrameTable};

mod alru;
mod lfu;

pub use alru::ApproxLruVictimSelectionModule;
pub use lfu::LfuVictimSelectionModule;

/// Strategy that decides which frame is evicted on a page fault.
///
/// Implementations must not modify any state and have to return
/// an index inside of `frames`.
pub trait VictimSelectionModule {
    /// Chooses a victim among all frames of `frames`, which is never empty.
    fn select_victim(&self, frames: &FrameTable) -> FrameIndex;
}

/// Linear scan for the frame with the smallest score.
///
/// If several frames share the smallest score, the one with the lowest index wins.
#[inline]
pub(crate) fn select_min_score<F: Fn(&Frame) -> u8>(frames: &FrameTable, score: F) -> FrameIndex {
    frames
        .iter()
        .min_by_key(|(_, frame)| score(frame))
        .map(|(index, _)| index)
        .unwrap_or(FrameIndex(0))
}
