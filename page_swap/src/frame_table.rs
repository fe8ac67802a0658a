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

use crate::PageNumber;

/// Index into the frame table (physical frame number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "benchmarks", derive(serde::Serialize))]
pub struct FrameIndex(pub usize);

impl FrameIndex {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame {}", self.0)
    }
}

/// Most significant bit of the reference byte
const REFERENCE_BYTE_MSB: u8 = 1 << 7;

/// A physical frame together with its reference tracking state
pub struct Frame {
    /// Page that currently occupies this frame
    pub(crate) owner_page: PageNumber,

    /// Payload of `owner_page`
    pub(crate) data: Box<[u8]>,

    /// Was this frame touched since the last decay tick?
    pub(crate) access_bit: bool,

    /// Decaying history of `access_bit`, newest tick in the most significant bit
    pub(crate) reference_byte: u8,
}

impl Frame {
    /// Creates a frame that is bound to `owner_page` and counts as recently and frequently used
    pub(crate) fn new(owner_page: PageNumber, block_size: usize) -> Self {
        Self {
            owner_page,
            data: vec![0u8; block_size].into_boxed_slice(),
            access_bit: true,
            reference_byte: u8::MAX,
        }
    }

    #[inline]
    pub fn owner_page(&self) -> PageNumber {
        self.owner_page
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn is_accessed(&self) -> bool {
        self.access_bit
    }

    #[inline]
    pub fn reference_byte(&self) -> u8 {
        self.reference_byte
    }

    #[inline]
    pub(crate) fn touch(&mut self) {
        self.access_bit = true;
    }

    /// Shifts the access bit into the reference byte and clears it
    #[inline]
    pub(crate) fn decay(&mut self) {
        self.reference_byte >>= 1;
        if self.access_bit {
            self.reference_byte |= REFERENCE_BYTE_MSB;
        }
        self.access_bit = false;
    }
}

/// Fixed capacity table with one entry per physical frame
pub struct FrameTable {
    frames: Box<[Frame]>,
}

impl FrameTable {
    /// Creates `frame_count` frames, frame `i` is bound to page `i`
    pub(crate) fn new(frame_count: usize, block_size: usize) -> Self {
        let frames: Vec<Frame> = (0..frame_count)
            .map(|i| Frame::new(PageNumber(i), block_size))
            .collect();

        Self {
            frames: frames.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn get(&self, frame: FrameIndex) -> Option<&Frame> {
        self.frames.get(frame.index())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, frame: FrameIndex) -> Option<&mut Frame> {
        self.frames.get_mut(frame.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FrameIndex, &Frame)> + '_ {
        self.frames
            .iter()
            .enumerate()
            .map(|(i, frame)| (FrameIndex(i), frame))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (FrameIndex, &mut Frame)> + '_ {
        self.frames
            .iter_mut()
            .enumerate()
            .map(|(i, frame)| (FrameIndex(i), frame))
    }

    pub(crate) fn decay_all(&mut self) {
        for frame in self.frames.iter_mut() {
            frame.decay();
        }
    }
}
