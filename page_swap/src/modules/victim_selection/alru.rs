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

use crate::{FrameIndex, FrameTable};

use super::{select_min_score, VictimSelectionModule};

/// Approximated least recently used: evicts the frame with the smallest reference byte
pub struct ApproxLruVictimSelectionModule;

impl VictimSelectionModule for ApproxLruVictimSelectionModule {
    #[inline]
    fn select_victim(&self, frames: &FrameTable) -> FrameIndex {
        select_min_score(frames, |frame| frame.reference_byte())
    }
}
