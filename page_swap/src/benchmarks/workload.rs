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

use rand::{rngs::SmallRng, RngCore, SeedableRng};
use serde::Serialize;

/// Shape of a generated page reference string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Workload {
    /// Every page is equally likely
    Uniform,

    /// Pages `[0, hot_pages)` are referenced with `hot_probability_percent`,
    /// all other pages share the rest
    HotSet {
        hot_pages: usize,
        hot_probability_percent: u32,
    },

    /// Pages `0, 1, ..., length - 1, 0, 1, ...`
    Loop { length: usize },
}

impl Workload {
    pub fn get_name(&self) -> &'static str {
        match self {
            Workload::Uniform => "uniform",
            Workload::HotSet { .. } => "hot_set",
            Workload::Loop { .. } => "loop",
        }
    }

    /// Endless, deterministic stream of page numbers in `[0, page_count)`
    pub fn generate(&self, page_count: usize, seed: u64) -> WorkloadGenerator {
        assert!(page_count > 0, "page count has to be greater than zero");

        WorkloadGenerator {
            workload: *self,
            page_count,
            rand: SmallRng::seed_from_u64(seed),
            position: 0,
        }
    }
}

pub struct WorkloadGenerator {
    workload: Workload,
    page_count: usize,
    rand: SmallRng,
    position: usize,
}

impl WorkloadGenerator {
    #[inline]
    fn random_below(&mut self, bound: usize) -> usize {
        (self.rand.next_u64() % bound as u64) as usize
    }
}

impl Iterator for WorkloadGenerator {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let page = match self.workload {
            Workload::Uniform => self.random_below(self.page_count),
            Workload::HotSet {
                hot_pages,
                hot_probability_percent,
            } => {
                let hot_pages = hot_pages.clamp(1, self.page_count);
                let hot = (self.rand.next_u32() % 100) < hot_probability_percent;

                if hot || hot_pages == self.page_count {
                    self.random_below(hot_pages)
                } else {
                    hot_pages + self.random_below(self.page_count - hot_pages)
                }
            }
            Workload::Loop { length } => {
                let page = self.position % length.clamp(1, self.page_count);
                self.position += 1;
                page
            }
        };

        Some(page)
    }
}
