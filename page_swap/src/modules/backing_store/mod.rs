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

mod allocation_map;
mod memory_storage;
mod file_storage;

pub(crate) use allocation_map::BlockAllocationMap;
pub use memory_storage::MemoryBackingStoreModule;
pub use file_storage::FileBackingStoreModule;

/// Blocks `[0, RESERVED_BLOCK_COUNT)` are reserved by the backing store itself
/// and can never be allocated
pub const RESERVED_BLOCK_COUNT: usize = 8;

/// Block oriented storage that holds the data of every page, including pages that are not resident.
pub trait BackingStoreModule {
    /// Reserves block `block_id` so it can be read and written afterwards.
    ///
    /// Fails if the block is reserved, out of range or already allocated.
    fn allocate(&mut self, block_id: usize) -> Result<(), ()>;

    /// Reads block `block_id` into `dest` which has to be exactly one block big.
    ///
    /// If this call fails, it could be that already some data was written to `dest`.
    fn read(&mut self, block_id: usize, dest: &mut [u8]) -> Result<(), ()>;

    /// Writes `src` which has to be exactly one block big to block `block_id`
    fn write(&mut self, block_id: usize, src: &[u8]) -> Result<(), ()>;

    /// Size of a single block in bytes
    fn get_block_size(&self) -> usize;

    /// Total number of blocks, including reserved ones
    fn get_block_count(&self) -> usize;

    /// Releases the underlying medium. Every later `read` or `write` fails.
    ///
    /// Best effort: errors are not reported.
    fn close(&mut self) {}
}

#[cfg(test)]
pub(crate) mod test {
    use super::{BackingStoreModule, MemoryBackingStoreModule, RESERVED_BLOCK_COUNT};

    use super::FileBackingStoreModule;

    pub(crate) fn get_test_storage(
        test_name: &str,
        block_count: usize,
        block_size: usize,
    ) -> FileBackingStoreModule {
        FileBackingStoreModule::new(format!("/tmp/{}.tmp", test_name), block_count, block_size)
            .unwrap()
    }

    fn gen_number(i: usize) -> u8 {
        (i * 3 + (i % 3) * 7 + (i % 11) * 51) as u8
    }

    pub(super) const BACKING_STORE_TEST_BLOCK_COUNT: usize = 32;
    pub(super) const BACKING_STORE_TEST_BLOCK_SIZE: usize = 128;

    /// test if write saves all data and read restores all of it
    pub(super) fn test_backing_store_normal<T: BackingStoreModule>(mut module: T) {
        assert_eq!(module.get_block_count(), BACKING_STORE_TEST_BLOCK_COUNT);
        assert_eq!(module.get_block_size(), BACKING_STORE_TEST_BLOCK_SIZE);

        let mut block = [0u8; BACKING_STORE_TEST_BLOCK_SIZE];
        for block_id in RESERVED_BLOCK_COUNT..BACKING_STORE_TEST_BLOCK_COUNT {
            module.allocate(block_id).unwrap();

            for x in 0..BACKING_STORE_TEST_BLOCK_SIZE {
                block[x] = gen_number(block_id * BACKING_STORE_TEST_BLOCK_SIZE + x);
            }
            module.write(block_id, &block).unwrap();
        }

        for block_id in RESERVED_BLOCK_COUNT..BACKING_STORE_TEST_BLOCK_COUNT {
            module.read(block_id, &mut block).unwrap();

            for x in 0..BACKING_STORE_TEST_BLOCK_SIZE {
                assert_eq!(
                    block[x],
                    gen_number(block_id * BACKING_STORE_TEST_BLOCK_SIZE + x),
                    "invalid data in block {} at position {}",
                    block_id,
                    x
                );
            }
        }
    }

    /// test that illegal accesses are rejected
    pub(super) fn test_backing_store_rejects<T: BackingStoreModule>(mut module: T) {
        let mut block = [0u8; BACKING_STORE_TEST_BLOCK_SIZE];

        // reserved blocks
        for block_id in 0..RESERVED_BLOCK_COUNT {
            assert!(module.allocate(block_id).is_err());
            assert!(module.read(block_id, &mut block).is_err());
        }

        // out of range
        assert!(module.allocate(BACKING_STORE_TEST_BLOCK_COUNT).is_err());

        // not allocated yet
        let block_id = RESERVED_BLOCK_COUNT;
        assert!(module.read(block_id, &mut block).is_err());
        assert!(module.write(block_id, &block).is_err());

        // double allocation
        module.allocate(block_id).unwrap();
        assert!(module.allocate(block_id).is_err());

        // buffer has to be exactly one block big
        let mut small = [0u8; BACKING_STORE_TEST_BLOCK_SIZE - 1];
        assert!(module.read(block_id, &mut small).is_err());
        assert!(module.write(block_id, &small).is_err());
        let big = [0u8; BACKING_STORE_TEST_BLOCK_SIZE + 1];
        assert!(module.write(block_id, &big).is_err());

        module.write(block_id, &block).unwrap();
        module.read(block_id, &mut block).unwrap();

        // closed stores reject everything
        module.close();
        assert!(module.read(block_id, &mut block).is_err());
        assert!(module.write(block_id, &block).is_err());

        // closing twice is fine
        module.close();
    }

    /// Wraps another backing store and lets single blocks fail on purpose
    pub(crate) struct FailingBackingStoreModule<S: BackingStoreModule> {
        inner: S,
        pub(crate) fail_allocate: Option<usize>,
        pub(crate) fail_write: Option<usize>,
        pub(crate) fail_read: Option<usize>,
    }

    impl<S: BackingStoreModule> FailingBackingStoreModule<S> {
        pub(crate) fn new(inner: S) -> Self {
            Self {
                inner,
                fail_allocate: None,
                fail_write: None,
                fail_read: None,
            }
        }

        pub(crate) fn get_inner_mut(&mut self) -> &mut S {
            &mut self.inner
        }
    }

    impl<S: BackingStoreModule> BackingStoreModule for FailingBackingStoreModule<S> {
        fn allocate(&mut self, block_id: usize) -> Result<(), ()> {
            if self.fail_allocate == Some(block_id) {
                return Err(());
            }
            self.inner.allocate(block_id)
        }

        fn read(&mut self, block_id: usize, dest: &mut [u8]) -> Result<(), ()> {
            if self.fail_read == Some(block_id) {
                // simulate a read that broke off halfway
                let half = dest.len() / 2;
                dest[..half].fill(0xAA);
                return Err(());
            }
            self.inner.read(block_id, dest)
        }

        fn write(&mut self, block_id: usize, src: &[u8]) -> Result<(), ()> {
            if self.fail_write == Some(block_id) {
                return Err(());
            }
            self.inner.write(block_id, src)
        }

        fn get_block_size(&self) -> usize {
            self.inner.get_block_size()
        }

        fn get_block_count(&self) -> usize {
            self.inner.get_block_count()
        }

        fn close(&mut self) {
            self.inner.close()
        }
    }

    #[test]
    fn test_memory_storage_module_normal() {
        let storage = MemoryBackingStoreModule::new(
            BACKING_STORE_TEST_BLOCK_COUNT,
            BACKING_STORE_TEST_BLOCK_SIZE,
        );
        test_backing_store_normal(storage);
    }

    #[test]
    fn test_memory_storage_module_rejects() {
        let storage = MemoryBackingStoreModule::new(
            BACKING_STORE_TEST_BLOCK_COUNT,
            BACKING_STORE_TEST_BLOCK_SIZE,
        );
        test_backing_store_rejects(storage);
    }

    #[test]
    fn test_failing_storage_module() {
        let mut storage = FailingBackingStoreModule::new(MemoryBackingStoreModule::new(
            BACKING_STORE_TEST_BLOCK_COUNT,
            BACKING_STORE_TEST_BLOCK_SIZE,
        ));
        storage.fail_allocate = Some(9);
        storage.fail_read = Some(10);

        assert!(storage.allocate(9).is_err());
        storage.allocate(10).unwrap();
        storage.write(10, &[1u8; BACKING_STORE_TEST_BLOCK_SIZE]).unwrap();

        let mut block = [0u8; BACKING_STORE_TEST_BLOCK_SIZE];
        assert!(storage.read(10, &mut block).is_err());
        assert_eq!(block[0], 0xAA);

        storage.fail_read = None;
        storage.read(10, &mut block).unwrap();
        assert_eq!(block, [1u8; BACKING_STORE_TEST_BLOCK_SIZE]);

        storage.get_inner_mut().allocate(9).unwrap();
    }
}
