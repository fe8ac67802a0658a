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

use std::env;

use env_logger::{Builder, Env};
use log::{error, info};
use page_swap::{
    benchmarks::{run_all_workloads, RunAllWorkloadOptions},
    modules::backing_store::FileBackingStoreModule,
    PageSwapConfig,
};

const STORAGE_PATH: &str = "/tmp/page_swap_sim.data";

fn main() {
    Builder::from_env(Env::default())
        .filter_level(log::LevelFilter::Warn)
        .format_module_path(false)
        .init();

    let mut options = RunAllWorkloadOptions::default();
    if let Some(arg) = env::args().nth(1) {
        match arg.parse::<usize>() {
            Ok(reference_count) => options.reference_count = reference_count,
            Err(_) => {
                error!("Invalid reference count \"{}\"", arg);
                return;
            }
        }
    }

    info!(
        "Simulating {} pages on {} frames",
        options.config.page_count, options.config.frame_count
    );

    let results = run_all_workloads(&options, || get_storage(&options.config));

    println!();
    println!("{:<10} {:<10} {:>10} {:>10} {:>8}", "workload", "policy", "hits", "faults", "rate");
    for res in results.iter() {
        println!(
            "{:<10} {:<10} {:>10} {:>10} {:>8.4}",
            res.workload.get_name(),
            format!("{:?}", res.policy),
            res.statistics.hits,
            res.statistics.faults,
            res.fault_rate
        );
    }
}

fn get_storage(config: &PageSwapConfig) -> FileBackingStoreModule {
    FileBackingStoreModule::new(
        STORAGE_PATH.into(),
        config.required_block_count(),
        config.block_size,
    )
    .expect("could not create backing store file")
}
