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

use std::io::stdout;

use log::warn;
use serde::Serialize;

mod workload;

pub use workload::*;

use crate::{
    modules::{
        backing_store::BackingStoreModule,
        victim_selection::{
            ApproxLruVictimSelectionModule, LfuVictimSelectionModule, VictimSelectionModule,
        },
    },
    PageSwap, PageSwapConfig, SwapStatistics,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Policy {
    ApproxLru,
    Lfu,
}

impl Policy {
    pub const ALL: [Policy; 2] = [Policy::ApproxLru, Policy::Lfu];

    pub fn get_victim_selection_module(&self) -> &'static dyn VictimSelectionModule {
        match self {
            Policy::ApproxLru => &ApproxLruVictimSelectionModule,
            Policy::Lfu => &LfuVictimSelectionModule,
        }
    }
}

pub struct RunAllWorkloadOptions {
    pub config: PageSwapConfig,
    pub reference_count: usize,
    pub seed: u64,
    pub workloads: Vec<Workload>,
}

impl Default for RunAllWorkloadOptions {
    fn default() -> Self {
        let config = PageSwapConfig::default();

        Self {
            config,
            reference_count: 100_000,
            seed: 5446535461589659585,
            workloads: vec![
                Workload::Uniform,
                Workload::HotSet {
                    hot_pages: config.frame_count / 2,
                    hot_probability_percent: 90,
                },
                Workload::HotSet {
                    hot_pages: config.frame_count * 2,
                    hot_probability_percent: 80,
                },
                Workload::Loop {
                    length: config.frame_count + config.frame_count / 4,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkloadRunResult {
    pub workload: Workload,
    pub policy: Policy,
    pub references: usize,
    pub statistics: SwapStatistics,
    pub fault_rate: f64,
}

/// Feeds `reference_count` references of `workload` into `page_swap`.
///
/// The logical clock starts at 1 and advances by one per reference.
pub fn run_workload<S: BackingStoreModule>(
    page_swap: &mut PageSwap<S>,
    workload: Workload,
    policy: Policy,
    reference_count: usize,
    seed: u64,
) -> WorkloadRunResult {
    let victim_selection = policy.get_victim_selection_module();
    let start = *page_swap.statistics();

    let pages = workload.generate(page_swap.config().page_count, seed);
    for (i, page) in pages.take(reference_count).enumerate() {
        page_swap.reference(page, i + 1, victim_selection);
    }

    let end = *page_swap.statistics();
    let statistics = SwapStatistics {
        references: end.references - start.references,
        hits: end.hits - start.hits,
        faults: end.faults - start.faults,
        invalid_references: end.invalid_references - start.invalid_references,
        failed_swaps: end.failed_swaps - start.failed_swaps,
        decay_ticks: end.decay_ticks - start.decay_ticks,
    };

    WorkloadRunResult {
        workload,
        policy,
        references: reference_count,
        statistics,
        fault_rate: statistics.fault_rate(),
    }
}

/// Runs every workload of `options` with every policy, each on a fresh page swap.
pub fn run_all_workloads<S: BackingStoreModule, F: Fn() -> S>(
    options: &RunAllWorkloadOptions,
    get_storage: F,
) -> Vec<WorkloadRunResult> {
    let iteration_count = options.workloads.len() * Policy::ALL.len();
    let mut results = Vec::with_capacity(iteration_count);

    for workload in options.workloads.iter() {
        for policy in Policy::ALL {
            let percentage = (100 * results.len()) / iteration_count;
            println!(
                "[{}%] Running workload \"{}\" with {:?}",
                percentage,
                workload.get_name(),
                policy
            );

            let mut page_swap = match PageSwap::new(get_storage(), options.config) {
                Ok(page_swap) => page_swap,
                Err(err) => {
                    warn!("Skip workload {}: {}", workload.get_name(), err);
                    continue;
                }
            };

            let res = run_workload(
                &mut page_swap,
                *workload,
                policy,
                options.reference_count,
                options.seed,
            );
            page_swap.shutdown();

            print!("[BENCH-INFO] ");
            if let Err(err) = serde_json::to_writer(stdout(), &res) {
                warn!("Could not serialize result: {}", err);
            }
            println!();

            println!(
                "-> Finished {}: faults={}, fault_rate={:.4}",
                workload.get_name(),
                res.statistics.faults,
                res.fault_rate
            );

            results.push(res);
        }
    }

    results
}
