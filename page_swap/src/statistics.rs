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

use crate::ReferenceOutcome;

/// Counters over all references handled by a [`crate::PageSwap`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "benchmarks", derive(serde::Serialize))]
pub struct SwapStatistics {
    /// Every call, including invalid ones
    pub references: usize,
    pub hits: usize,
    pub faults: usize,
    pub invalid_references: usize,
    pub failed_swaps: usize,
    pub decay_ticks: usize,
}

impl SwapStatistics {
    pub(crate) fn record(&mut self, outcome: &ReferenceOutcome) {
        self.references += 1;
        match outcome {
            ReferenceOutcome::Hit => self.hits += 1,
            ReferenceOutcome::Faulted(_) => self.faults += 1,
            ReferenceOutcome::Invalid => self.invalid_references += 1,
            ReferenceOutcome::StorageError(_) => self.failed_swaps += 1,
        }
    }

    /// Share of valid references that required a page swap
    pub fn fault_rate(&self) -> f64 {
        let valid = self.hits + self.faults + self.failed_swaps;
        if valid == 0 {
            return 0.0;
        }

        (self.faults + self.failed_swaps) as f64 / valid as f64
    }
}
