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

use std::collections::HashSet;

use crate::{
    modules::{
        backing_store::{test::get_test_storage, FileBackingStoreModule, MemoryBackingStoreModule},
        victim_selection::VictimSelectionModule,
    },
    FrameIndex, FrameTable, PageSwap, PageSwapConfig,
};

mod invariants;

pub(crate) const SMALL_TEST_CONFIG: PageSwapConfig = PageSwapConfig {
    page_count: 32,
    frame_count: 8,
    block_size: 64,
    block_offset: 8,
    decay_interval: 100,
};

/// Shows library logs in the output of failing tests, filtered by `RUST_LOG`
pub(crate) fn init_test_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default())
        .format_module_path(false)
        .is_test(true)
        .try_init();
}

/// Page swap with the default configuration (2048 pages, 512 frames)
pub(crate) fn get_test_page_swap() -> PageSwap<MemoryBackingStoreModule> {
    let config = PageSwapConfig::default();
    let storage = MemoryBackingStoreModule::new(config.required_block_count(), config.block_size);
    PageSwap::new(storage, config).unwrap()
}

pub(crate) fn get_small_test_page_swap() -> PageSwap<MemoryBackingStoreModule> {
    let storage = MemoryBackingStoreModule::new(
        SMALL_TEST_CONFIG.required_block_count(),
        SMALL_TEST_CONFIG.block_size,
    );
    PageSwap::new(storage, SMALL_TEST_CONFIG).unwrap()
}

pub(crate) fn get_test_file_page_swap(
    test_name: &str,
    config: PageSwapConfig,
) -> PageSwap<FileBackingStoreModule> {
    let storage = get_test_storage(test_name, config.required_block_count(), config.block_size);
    PageSwap::new(storage, config).unwrap()
}

/// Always evicts the same frame
pub(crate) struct FixedVictimSelectionModule(pub(crate) FrameIndex);

impl VictimSelectionModule for FixedVictimSelectionModule {
    fn select_victim(&self, _frames: &FrameTable) -> FrameIndex {
        self.0
    }
}

/// Every valid page points to a frame that is owned by it, no frame is used twice
pub(crate) fn assert_bindings_consistent<S: crate::modules::backing_store::BackingStoreModule>(
    page_swap: &PageSwap<S>,
) {
    let mut used_frames = HashSet::new();

    for (page, entry) in page_swap.page_table().iter() {
        if let Some(frame_index) = entry.resident_frame() {
            let frame = page_swap
                .frame_table()
                .get(frame_index)
                .expect("resident page points to a frame that does not exist");

            assert_eq!(
                frame.owner_page(),
                page,
                "{} points to {} which is owned by {}",
                page,
                frame_index,
                frame.owner_page()
            );
            assert!(
                used_frames.insert(frame_index),
                "{} is used by more than one page",
                frame_index
            );
        }
    }

    assert!(page_swap.page_table().resident_count() <= page_swap.frame_table().len());
}

/// Copy of all table state that a reference may change
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TableSnapshot {
    pages: Vec<(bool, usize)>,
    frames: Vec<(usize, bool, u8, Vec<u8>)>,
}

impl TableSnapshot {
    pub(crate) fn take<S: crate::modules::backing_store::BackingStoreModule>(
        page_swap: &PageSwap<S>,
    ) -> Self {
        Self {
            pages: page_swap
                .page_table()
                .iter()
                .map(|(_, entry)| (entry.is_valid(), entry.frame().index()))
                .collect(),
            frames: page_swap
                .frame_table()
                .iter()
                .map(|(_, frame)| {
                    (
                        frame.owner_page().index(),
                        frame.is_accessed(),
                        frame.reference_byte(),
                        frame.data().to_vec(),
                    )
                })
                .collect(),
        }
    }
}
