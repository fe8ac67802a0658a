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

use std::{
    fs::{remove_file, File},
    io::{Read, Seek, SeekFrom, Write},
    mem::ManuallyDrop,
    path::Path,
};

use log::warn;

use super::{BackingStoreModule, BlockAllocationMap};

pub struct FileBackingStoreModule {
    /// underlying file, block `n` starts at byte `n * block_size`
    file: ManuallyDrop<File>,

    /// path of file, save for deleting file later
    file_path: String,

    block_size: usize,

    allocation_map: BlockAllocationMap,

    closed: bool,
}

impl FileBackingStoreModule {
    /// Creates a new backing store inside of a (truncated) file at `filepath`.
    ///
    /// The file is removed again once this module is dropped.
    pub fn new(filepath: String, block_count: usize, block_size: usize) -> std::io::Result<Self> {
        let file = File::options()
            .read(true)
            .write(true)
            .truncate(true)
            .create(true)
            .open(filepath.clone())?;

        file.set_len((block_count * block_size) as u64)?;

        Ok(Self {
            file: ManuallyDrop::new(file),
            file_path: filepath,
            block_size,
            allocation_map: BlockAllocationMap::new(block_count),
            closed: false,
        })
    }

    #[inline]
    fn seek_block(&mut self, block_id: usize) -> Result<(), ()> {
        self.file
            .seek(SeekFrom::Start((block_id * self.block_size) as u64))
            .map_err(|_| ())?;

        Ok(())
    }
}

impl BackingStoreModule for FileBackingStoreModule {
    fn allocate(&mut self, block_id: usize) -> Result<(), ()> {
        if self.closed {
            return Err(());
        }
        self.allocation_map.allocate(block_id)
    }

    fn read(&mut self, block_id: usize, dest: &mut [u8]) -> Result<(), ()> {
        if self.closed {
            return Err(());
        }
        self.allocation_map
            .check_access(block_id, dest.len(), self.block_size)?;

        self.seek_block(block_id)?;
        self.file.read_exact(dest).map_err(|_| ())?;

        Ok(())
    }

    fn write(&mut self, block_id: usize, src: &[u8]) -> Result<(), ()> {
        if self.closed {
            return Err(());
        }
        self.allocation_map
            .check_access(block_id, src.len(), self.block_size)?;

        self.seek_block(block_id)?;
        self.file.write_all(src).map_err(|_| ())?;

        Ok(())
    }

    fn get_block_size(&self) -> usize {
        self.block_size
    }

    fn get_block_count(&self) -> usize {
        self.allocation_map.block_count()
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }

        if let Err(err) = self.file.sync_all() {
            warn!("Could not sync backing store file {}: {}", self.file_path, err);
        }
        self.closed = true;
    }
}

impl Drop for FileBackingStoreModule {
    fn drop(&mut self) {
        // drop and close file before removing
        // note that after this call, file should never be accessed again...
        unsafe {
            ManuallyDrop::drop(&mut self.file);
        }

        if Path::new(self.file_path.as_str()).exists() {
            let _ = remove_file(self.file_path.as_str());
        }
    }
}
