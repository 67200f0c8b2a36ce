use std::iter::FusedIterator;
use std::mem::{self, ManuallyDrop};
use std::ptr;

use super::EagerVec;
use super::raw::RawStorage;

impl<T> IntoIterator for EagerVec<T> {
    type Item = T;

    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let vec = ManuallyDrop::new(self);

        // SAFETY: vec is never dropped, so the iterator becomes the sole owner of the
        // storage and of all live elements within it.
        let raw = unsafe { ptr::read(&vec.raw) };

        IntoIter {
            raw,
            start: 0,
            end: vec.len,
        }
    }
}

/// An owning iterator over the elements of an [`EagerVec`]. See [`EagerVec::into_iter`].
/// Borrowed iteration goes through [`Iter`](std::slice::Iter) and
/// [`IterMut`](std::slice::IterMut) via the slice deref.
///
/// Elements in `[start, end)` have not been yielded yet; dropping the iterator drops them
/// and then frees the allocation.
pub struct IntoIter<T> {
    raw: RawStorage<T>,
    start: usize,
    end: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            None
        } else {
            // SAFETY: start < end, so the slot holds a live element. Incrementing start
            // afterwards marks the slot as raw memory, moving the value out exactly once.
            let value = unsafe { self.raw.ptr.add(self.start).read() };
            self.start += 1;
            Some(value)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start == self.end {
            None
        } else {
            self.end -= 1;
            // SAFETY: The newly decremented end is within [start, old end), so the slot
            // holds a live element which the shrunken range now excludes.
            let value = unsafe { self.raw.ptr.add(self.end).read() };
            Some(value)
        }
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        if mem::needs_drop::<T>() {
            for i in self.start..self.end {
                // SAFETY: Slots in [start, end) hold the elements that were never yielded;
                // each is dropped exactly once here.
                unsafe { ptr::drop_in_place(self.raw.ptr.add(i).as_ptr()) }
            }
        }

        // Dropping self.raw frees the allocation.
    }
}
