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

use crate::FrameIndex;

/// Index into the page table (virtual page number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "benchmarks", derive(serde::Serialize))]
pub struct PageNumber(pub usize);

impl PageNumber {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTableEntry {
    /// Frame that holds this page, only meaningful if `valid` is set
    pub(crate) frame: FrameIndex,

    /// Is this page resident?
    pub(crate) valid: bool,
}

impl PageTableEntry {
    #[inline]
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Frame of this page if it is resident
    #[inline]
    pub fn resident_frame(&self) -> Option<FrameIndex> {
        if self.valid {
            Some(self.frame)
        } else {
            None
        }
    }
}

/// Fixed capacity table with one entry per virtual page
pub struct PageTable {
    entries: Box<[PageTableEntry]>,
}

impl PageTable {
    /// Creates a page table in which every page is invalid
    pub(crate) fn new(page_count: usize) -> Self {
        let entries = vec![
            PageTableEntry {
                frame: FrameIndex(0),
                valid: false
            };
            page_count
        ];

        Self {
            entries: entries.into_boxed_slice(),
        }
    }

    /// Converts a raw page number into a [`PageNumber`] if it lies inside of this table
    #[inline]
    pub fn checked_page(&self, page_number: usize) -> Option<PageNumber> {
        if page_number < self.entries.len() {
            Some(PageNumber(page_number))
        } else {
            None
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn get(&self, page: PageNumber) -> Option<&PageTableEntry> {
        self.entries.get(page.index())
    }

    /// Binds `page` to `frame` and marks it resident
    pub(crate) fn map(&mut self, page: PageNumber, frame: FrameIndex) {
        let entry = &mut self.entries[page.index()];
        entry.frame = frame;
        entry.valid = true;
    }

    pub(crate) fn invalidate(&mut self, page: PageNumber) {
        self.entries[page.index()].valid = false;
    }

    /// Number of pages that are currently resident
    pub fn resident_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.valid).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PageNumber, &PageTableEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (PageNumber(i), entry))
    }
}
