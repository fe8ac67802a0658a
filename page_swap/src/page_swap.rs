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

use core::mem::swap;

use log::{debug, error, info, trace, warn};

use crate::{
    modules::{
        backing_store::BackingStoreModule,
        victim_selection::{
            ApproxLruVictimSelectionModule, LfuVictimSelectionModule, VictimSelectionModule,
        },
    },
    FrameIndex, FrameTable, InitializationError, PageFault, PageNumber, PageSwapConfig, PageTable,
    ReferenceOutcome, SwapError, SwapStatistics,
};

/// Content every page block is seeded with during initialization
#[inline]
pub(crate) const fn placeholder_byte(position: usize) -> u8 {
    (position % 255) as u8
}

#[inline]
fn init_failed(err: InitializationError) -> InitializationError {
    error!("Initialization failed: {}", err);
    err
}

/// Demand paged memory: maps `page_count` virtual pages onto `frame_count` frames
/// and swaps pages from/to a backing store on page faults.
pub struct PageSwap<S: BackingStoreModule> {
    config: PageSwapConfig,

    page_table: PageTable,

    frame_table: FrameTable,

    /// Target of fault-in reads. Only swapped with the data of the victim frame
    /// once the whole page swap succeeded.
    swap_buffer: Box<[u8]>,

    storage: S,

    statistics: SwapStatistics,
}

impl<S: BackingStoreModule> PageSwap<S> {
    /// Allocates and seeds one block per page inside of `storage` and
    /// makes the first `frame_count` pages resident.
    ///
    /// **Note**: Will overwrite blocks `[block_offset, block_offset + page_count)` of `storage`.
    #[doc(alias = "initialize")]
    pub fn new(mut storage: S, config: PageSwapConfig) -> Result<Self, InitializationError> {
        config.validate().map_err(init_failed)?;

        if storage.get_block_size() != config.block_size
            || storage.get_block_count() < config.required_block_count()
        {
            return Err(init_failed(InitializationError::StorageMismatch));
        }

        // every page needs valid content before anything is read
        let mut buffer = vec![0u8; config.block_size].into_boxed_slice();
        for (position, byte) in buffer.iter_mut().enumerate() {
            *byte = placeholder_byte(position);
        }

        for page in 0..config.page_count {
            let block_id = config.block_id(PageNumber(page));

            storage
                .allocate(block_id)
                .map_err(|_| init_failed(InitializationError::Allocate { block_id }))?;
            storage
                .write(block_id, &buffer)
                .map_err(|_| init_failed(InitializationError::Write { block_id }))?;
        }

        let mut page_table = PageTable::new(config.page_count);
        let mut frame_table = FrameTable::new(config.frame_count, config.block_size);

        for (frame_index, frame) in frame_table.iter_mut() {
            let block_id = config.block_id(frame.owner_page);

            storage
                .read(block_id, &mut frame.data)
                .map_err(|_| init_failed(InitializationError::Read { block_id }))?;

            page_table.map(frame.owner_page, frame_index);
        }

        info!(
            "Initialized page swap with {} pages, {} frames and {} bytes per block",
            config.page_count, config.frame_count, config.block_size
        );

        Ok(Self {
            config,
            page_table,
            frame_table,
            swap_buffer: buffer,
            storage,
            statistics: SwapStatistics::default(),
        })
    }

    /// References `page_number` at logical time `clock` and uses `ALRU` on a page fault.
    #[inline]
    pub fn approx_least_recently_used(&mut self, page_number: usize, clock: usize) -> ReferenceOutcome {
        self.reference(page_number, clock, &ApproxLruVictimSelectionModule)
    }

    /// References `page_number` at logical time `clock` and uses `LFU` on a page fault.
    #[inline]
    pub fn least_frequently_used(&mut self, page_number: usize, clock: usize) -> ReferenceOutcome {
        self.reference(page_number, clock, &LfuVictimSelectionModule)
    }

    /// References `page_number` at logical time `clock`.
    ///
    /// If the page is not resident, `victim_selection` decides which frame is evicted.
    /// If the swap fails, page and frame table stay untouched.
    pub fn reference<M: VictimSelectionModule + ?Sized>(
        &mut self,
        page_number: usize,
        clock: usize,
        victim_selection: &M,
    ) -> ReferenceOutcome {
        let outcome = self.reference_inner(page_number, clock, victim_selection);
        self.statistics.record(&outcome);
        outcome
    }

    fn reference_inner<M: VictimSelectionModule + ?Sized>(
        &mut self,
        page_number: usize,
        clock: usize,
        victim_selection: &M,
    ) -> ReferenceOutcome {
        let page = match self.page_table.checked_page(page_number) {
            Some(page) => page,
            None => {
                warn!(
                    "Ignore reference to page {} (page table has {} entries)",
                    page_number,
                    self.page_table.len()
                );
                return ReferenceOutcome::Invalid;
            }
        };

        let resident_frame = self
            .page_table
            .get(page)
            .and_then(|entry| entry.resident_frame());

        let (frame, outcome) = match resident_frame {
            Some(frame) => {
                trace!("Hit: {} is resident in {}", page, frame);
                (frame, ReferenceOutcome::Hit)
            }
            None => match self.swap_in(page, victim_selection) {
                Ok(fault) => (fault.victim_frame, ReferenceOutcome::Faulted(fault)),
                Err(err) => {
                    warn!("Page swap for {} aborted: {}", page, err);
                    return ReferenceOutcome::StorageError(err);
                }
            },
        };

        if let Some(frame) = self.frame_table.get_mut(frame) {
            frame.touch();
        }

        if self.config.is_decay_tick(clock) {
            self.decay();
        }

        outcome
    }

    /// Evicts a victim frame and loads `page` into it
    fn swap_in<M: VictimSelectionModule + ?Sized>(
        &mut self,
        page: PageNumber,
        victim_selection: &M,
    ) -> Result<PageFault, SwapError> {
        let victim_frame = victim_selection.select_victim(&self.frame_table);
        let victim = self
            .frame_table
            .get_mut(victim_frame)
            .ok_or(SwapError::InvalidVictim { victim_frame })?;

        let evicted_page = victim.owner_page;

        let block_id = self.config.block_id(evicted_page);
        self.storage
            .write(block_id, &victim.data)
            .map_err(|_| SwapError::EvictionWrite { block_id })?;

        let block_id = self.config.block_id(page);
        self.storage
            .read(block_id, &mut self.swap_buffer)
            .map_err(|_| SwapError::FaultInRead { block_id })?;

        // from here on nothing can fail anymore
        swap(&mut victim.data, &mut self.swap_buffer);
        victim.owner_page = page;

        self.page_table.invalidate(evicted_page);
        self.page_table.map(page, victim_frame);

        debug!(
            "Page fault: {} replaces {} in {}",
            page, evicted_page, victim_frame
        );

        Ok(PageFault {
            requested_page: page,
            victim_frame,
            evicted_page,
        })
    }

    /// Shifts the access bit of every frame into its reference byte and clears it.
    ///
    /// Is called automatically by [`PageSwap::reference`] every `decay_interval` ticks.
    pub fn decay(&mut self) {
        self.frame_table.decay_all();
        self.statistics.decay_ticks += 1;

        debug!("Decayed reference bytes of {} frames", self.frame_table.len());
    }

    /// Closes the backing store and returns it
    pub fn shutdown(mut self) -> S {
        info!(
            "Shutting down page swap after {} references ({} faults)",
            self.statistics.references, self.statistics.faults
        );

        self.storage.close();
        self.storage
    }

    /// Data of `page_number` if it is currently resident
    pub fn resident_data(&self, page_number: usize) -> Option<&[u8]> {
        let frame = self.resident_frame(page_number)?;
        self.frame_table.get(frame).map(|frame| frame.data())
    }

    /// Mutable data of `page_number` if it is currently resident.
    ///
    /// This does not count as a reference: the access bit is left untouched.
    pub fn resident_data_mut(&mut self, page_number: usize) -> Option<&mut [u8]> {
        let frame = self.resident_frame(page_number)?;
        self.frame_table
            .get_mut(frame)
            .map(|frame| &mut frame.data[..])
    }

    #[inline]
    fn resident_frame(&self, page_number: usize) -> Option<FrameIndex> {
        let page = self.page_table.checked_page(page_number)?;
        self.page_table.get(page)?.resident_frame()
    }

    #[inline]
    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    #[inline]
    pub fn frame_table(&self) -> &FrameTable {
        &self.frame_table
    }

    #[inline]
    pub fn config(&self) -> &PageSwapConfig {
        &self.config
    }

    #[inline]
    pub fn statistics(&self) -> &SwapStatistics {
        &self.statistics
    }

    /// Direct access to the backing store.
    ///
    /// **Note**: Writing to page blocks through this reference bypasses the page table.
    #[inline]
    pub fn get_storage_module_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}
