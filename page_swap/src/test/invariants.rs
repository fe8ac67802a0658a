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

use crate::{
    modules::victim_selection::{
        ApproxLruVictimSelectionModule, LfuVictimSelectionModule, VictimSelectionModule,
    },
    FrameIndex, PageNumber, ReferenceOutcome,
};

use super::{assert_bindings_consistent, get_small_test_page_swap, SMALL_TEST_CONFIG};

const SEED: u64 = 5446535461589659585;

fn run_random_references<M: VictimSelectionModule>(victim_selection: &M, seed: u64) {
    let mut page_swap = get_small_test_page_swap();
    let mut rand = SmallRng::seed_from_u64(seed);

    assert_eq!(
        page_swap.page_table().resident_count(),
        SMALL_TEST_CONFIG.frame_count
    );

    for clock in 1..5_000usize {
        // a few references are out of range on purpose
        let page_number = rand.next_u32() as usize % (SMALL_TEST_CONFIG.page_count + 4);

        let outcome = page_swap.reference(page_number, clock, victim_selection);
        match outcome {
            ReferenceOutcome::Hit => {
                let entry = page_swap.page_table().get(PageNumber(page_number)).unwrap();
                assert!(entry.is_valid());
            }
            ReferenceOutcome::Faulted(fault) => {
                assert_eq!(fault.requested_page.index(), page_number);
                assert_ne!(fault.requested_page, fault.evicted_page);

                let requested = page_swap.page_table().get(fault.requested_page).unwrap();
                assert_eq!(requested.resident_frame(), Some(fault.victim_frame));

                let evicted = page_swap.page_table().get(fault.evicted_page).unwrap();
                assert!(!evicted.is_valid());
            }
            ReferenceOutcome::Invalid => {
                assert!(page_number >= SMALL_TEST_CONFIG.page_count);
            }
            ReferenceOutcome::StorageError(err) => panic!("unexpected storage error: {}", err),
        }

        assert_bindings_consistent(&page_swap);

        // always full after initialization
        assert_eq!(
            page_swap.page_table().resident_count(),
            SMALL_TEST_CONFIG.frame_count
        );
    }

    let stats = page_swap.statistics();
    assert_eq!(stats.references, 4_999);
    // decay ticks hitting an invalid reference are skipped
    assert!(stats.decay_ticks > 0 && stats.decay_ticks <= 49);
    assert!(stats.faults > 0);
    assert!(stats.hits > 0);
    assert!(stats.invalid_references > 0);
}

#[test]
fn test_random_references_alru() {
    run_random_references(&ApproxLruVictimSelectionModule, SEED);
}

#[test]
fn test_random_references_lfu() {
    run_random_references(&LfuVictimSelectionModule, SEED ^ 0xABCDEF);
}

#[test]
fn test_decay_monotonicity() {
    let mut page_swap = get_small_test_page_swap();
    let mut rand = SmallRng::seed_from_u64(SEED);

    for _ in 0..50 {
        page_swap.decay();

        let before: Vec<u8> = page_swap
            .frame_table()
            .iter()
            .map(|(_, frame)| frame.reference_byte())
            .collect();

        // touch a random subset of the resident pages
        let mut touched = vec![false; SMALL_TEST_CONFIG.frame_count];
        for _ in 0..3 {
            let frame = rand.next_u32() as usize % SMALL_TEST_CONFIG.frame_count;
            let page = page_swap
                .frame_table()
                .get(FrameIndex(frame))
                .unwrap()
                .owner_page();
            assert!(page_swap.approx_least_recently_used(page.index(), 1).is_hit());
            touched[frame] = true;
        }

        page_swap.decay();

        for (index, frame) in page_swap.frame_table().iter() {
            if touched[index.index()] {
                assert_eq!(frame.reference_byte(), (before[index.index()] >> 1) | 0x80);
            } else {
                assert_eq!(frame.reference_byte(), before[index.index()] >> 1);
            }
            assert!(!frame.is_accessed());
        }
    }
}

#[test]
fn test_untouched_frames_fade_out() {
    let mut page_swap = get_small_test_page_swap();

    // first decay moves the initial access bit in
    page_swap.decay();
    for _ in 0..8 {
        page_swap.decay();
    }

    for (_, frame) in page_swap.frame_table().iter() {
        assert_eq!(frame.reference_byte(), 0);
    }
}
