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

use static_assertions::assert_impl_all;
use try_lock::TryLock;

use crate::{
    modules::{backing_store::BackingStoreModule, victim_selection::VictimSelectionModule},
    PageSwap, ReferenceOutcome,
};

assert_impl_all!(PageSwap<crate::modules::backing_store::MemoryBackingStoreModule>: Send);
assert_impl_all!(SharedPageSwap<crate::modules::backing_store::FileBackingStoreModule>: Send, Sync);

/// A [`PageSwap`] that can be shared between threads.
///
/// A whole reference (including evicting and loading) runs as one critical section.
/// Instead of waiting for another caller, [`SharedPageSwap::try_reference`] fails.
pub struct SharedPageSwap<S: BackingStoreModule> {
    inner: TryLock<PageSwap<S>>,
}

impl<S: BackingStoreModule> SharedPageSwap<S> {
    pub fn new(page_swap: PageSwap<S>) -> Self {
        Self {
            inner: TryLock::new(page_swap),
        }
    }

    /// Runs [`PageSwap::reference`] if no other reference is in flight,
    /// returns `Err(())` otherwise.
    pub fn try_reference<M: VictimSelectionModule + ?Sized>(
        &self,
        page_number: usize,
        clock: usize,
        victim_selection: &M,
    ) -> Result<ReferenceOutcome, ()> {
        let mut guard = self.inner.try_lock().ok_or(())?;
        Ok(guard.reference(page_number, clock, victim_selection))
    }

    /// Runs `f` with exclusive access to the page swap if it is not in use
    pub fn try_with<R, F: FnOnce(&mut PageSwap<S>) -> R>(&self, f: F) -> Result<R, ()> {
        let mut guard = self.inner.try_lock().ok_or(())?;
        Ok(f(&mut guard))
    }

    pub fn into_inner(self) -> PageSwap<S> {
        self.inner.into_inner()
    }
}
