use std::alloc::Layout;
use std::borrow::{Borrow, BorrowMut};
use std::cmp;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use super::raw::RawStorage;
use crate::util::error::{CapacityOverflow, IndexOutOfBounds};
use crate::util::result::ResultExtension;

const DEFAULT_INITIAL_CAP: usize = 4;
const DEFAULT_GROWTH_FACTOR: usize = 2;

const MIN_GROWTH_FACTOR: usize = 2;
const MAX_BYTES: usize = isize::MAX as usize;

/// A variable size contiguous collection that allocates its backing storage eagerly.
///
/// Every EagerVec owns at least one slot of backing storage from construction onwards, so the
/// first pushes never hit the allocator, at the price of a constructor that does. When the
/// capacity runs out it is multiplied by a per-instance growth factor (at least 2, so pushes
/// stay amortized `O(1)`). [`clear`](EagerVec::clear) returns the capacity to its starting
/// value rather than keeping the high-water mark.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of items in the EagerVec.
/// - `r`: The number of items removed by a call.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `push` | `O(1)`*, `O(n)` |
/// | `push_unchecked` | `O(1)` |
/// | `pop` | `O(1)` |
/// | `erase_range` | `O(n+r)` |
/// | `replace` | `O(1)` |
/// | `reserve` | `O(n)`**, `O(1)` |
/// | `shrink_to_fit` | `O(n)` |
/// | `clear` | `O(n)` |
///
/// \* If the EagerVec doesn't have enough capacity for the new element, `push` takes `O(n)`.
///
/// \** If the EagerVec already has the requested capacity, `reserve` is `O(1)`.
pub struct EagerVec<T> {
    pub(crate) raw: RawStorage<T>,
    pub(crate) len: usize,
    pub(crate) growth_factor: usize,
    pub(crate) initial_cap: usize,
}

impl<T> EagerVec<T> {
    /// Creates a new EagerVec with the default policy: 4 slots allocated up front and a
    /// growth factor of 2.
    ///
    /// # Examples
    /// ```
    /// # use eager_vec::vector::EagerVec;
    /// let vec: EagerVec<u8> = EagerVec::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.cap(), 4);
    /// ```
    pub fn new() -> EagerVec<T> {
        Self::with_policy(DEFAULT_INITIAL_CAP, DEFAULT_GROWTH_FACTOR)
    }

    /// Creates a new EagerVec with the provided policy, allocating `initial_cap` slots
    /// immediately. An `initial_cap` of 0 is clamped to 1 (the container always owns storage)
    /// and a `growth_factor` below 2 is clamped to 2 (a smaller factor would degrade
    /// amortized appends).
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use eager_vec::vector::EagerVec;
    /// let vec: EagerVec<u8> = EagerVec::with_policy(16, 4);
    /// assert_eq!(vec.cap(), 16);
    /// assert_eq!(vec.growth_factor(), 4);
    ///
    /// let clamped: EagerVec<u8> = EagerVec::with_policy(0, 0);
    /// assert_eq!((clamped.cap(), clamped.growth_factor()), (1, 2));
    /// ```
    pub fn with_policy(initial_cap: usize, growth_factor: usize) -> EagerVec<T> {
        let initial_cap = cmp::max(initial_cap, 1);
        let growth_factor = cmp::max(growth_factor, MIN_GROWTH_FACTOR);

        EagerVec {
            raw: RawStorage::new(initial_cap),
            len: 0,
            growth_factor,
            initial_cap,
        }
    }

    /// Creates a new EagerVec with capacity exactly equal to the provided value (clamped to a
    /// minimum of 1) and the default growth factor.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use eager_vec::vector::EagerVec;
    /// let mut vec: EagerVec<u8> = EagerVec::with_cap(5);
    /// assert_eq!(vec.cap(), 5);
    /// vec.extend([1_u8, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 5);
    /// ```
    pub fn with_cap(cap: usize) -> EagerVec<T> {
        Self::with_policy(cap, DEFAULT_GROWTH_FACTOR)
    }

    /// Returns the number of live elements.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the EagerVec contains no elements. The backing storage is retained
    /// regardless.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current capacity in element slots. Unlike [`Vec`], the capacity is exactly
    /// the value produced by the last capacity-changing operation, never an overshoot.
    pub const fn cap(&self) -> usize {
        self.raw.cap
    }

    /// Returns the size of the backing storage in bytes (`cap * size_of::<T>()`).
    ///
    /// # Examples
    /// ```
    /// # use eager_vec::vector::EagerVec;
    /// let vec: EagerVec<u32> = EagerVec::with_cap(8);
    /// assert_eq!(vec.cap_bytes(), 32);
    /// ```
    pub const fn cap_bytes(&self) -> usize {
        self.raw.cap * size_of::<T>()
    }

    /// Returns the total size of the live elements in bytes (`len * size_of::<T>()`).
    pub const fn len_bytes(&self) -> usize {
        self.len * size_of::<T>()
    }

    /// Returns the multiplier applied to the capacity when a push overflows it.
    pub const fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// Returns the capacity restored by [`clear`](EagerVec::clear).
    pub const fn initial_cap(&self) -> usize {
        self.initial_cap
    }

    /// Changes the growth factor for future capacity overflows. Values below 2 are clamped
    /// to 2.
    pub fn set_growth_factor(&mut self, factor: usize) {
        self.growth_factor = cmp::max(factor, MIN_GROWTH_FACTOR);
    }

    /// Changes the capacity that [`clear`](EagerVec::clear) restores. A value of 0 is clamped
    /// to 1. The current capacity is unaffected.
    pub fn set_initial_cap(&mut self, cap: usize) {
        self.initial_cap = cmp::max(cap, 1);
    }

    /// Push the provided value onto the end of the EagerVec, multiplying the capacity by the
    /// growth factor first if it is full.
    ///
    /// # Panics
    /// Panics if the memory layout of the grown storage would exceed [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use eager_vec::vector::EagerVec;
    /// let mut vec = EagerVec::new();
    /// for i in 0..=5 {
    ///     vec.push(i);
    /// }
    /// assert_eq!(&*vec, &[0, 1, 2, 3, 4, 5]);
    /// assert_eq!(vec.cap(), 8);
    /// ```
    pub fn push(&mut self, value: T) {
        if self.len == self.cap() {
            self.grow();
        }
        // SAFETY: The capacity has just been adjusted to support the addition of the new item.
        unsafe { self.push_unchecked(value) }
    }

    /// Push the provided value onto the end of the EagerVec, assuming that there is enough
    /// capacity to do so.
    ///
    /// # Safety
    /// It is up to the caller to ensure that the EagerVec has spare capacity, using methods
    /// like [`reserve`](EagerVec::reserve) or [`with_cap`](EagerVec::with_cap) to arrange it.
    /// Calling this on a full EagerVec is undefined behavior.
    ///
    /// # Examples
    /// ```
    /// # use eager_vec::vector::EagerVec;
    /// let mut vec = EagerVec::with_cap(3);
    /// for i in 1_u8..=3 {
    ///     // SAFETY: vec was created with enough capacity for all three values.
    ///     unsafe { vec.push_unchecked(i); }
    /// }
    /// assert_eq!(&*vec, &[1, 2, 3]);
    /// ```
    pub unsafe fn push_unchecked(&mut self, value: T) {
        // SAFETY: The caller guarantees len < cap, so the write lands inside the allocation,
        // in a slot that holds no live element.
        unsafe {
            self.raw.ptr.add(self.len).write(value);
        }
        self.len += 1;
    }

    /// Pops the last value off the end of the EagerVec, returning it if there is one. The
    /// capacity is unchanged.
    ///
    /// # Examples
    /// ```
    /// # use eager_vec::vector::EagerVec;
    /// let mut vec: EagerVec<_> = (0..5).collect();
    /// for i in (0..5).rev() {
    ///     assert_eq!(vec.pop(), Some(i));
    /// }
    /// assert_eq!(vec.pop(), None);
    /// ```
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            // Decrement len before reading.
            self.len -= 1;

            // SAFETY: len has just been decremented, so the slot is in bounds and holds a
            // live element. Reading it bitwise and treating the slot as raw memory afterwards
            // moves the value off of the heap.
            let value = unsafe { self.raw.ptr.add(self.len).read() };
            Some(value)
        }
    }

    /// Removes the elements in the inclusive index range `[first, last]`, shifting everything
    /// after `last` down to close the gap. The capacity is unchanged.
    ///
    /// Out-of-range arguments are absorbed rather than signaled: `last` is clamped to the
    /// final live index, and the call is a no-op when the EagerVec is empty or when
    /// `first > last` after clamping.
    ///
    /// # Examples
    /// ```
    /// # use eager_vec::vector::EagerVec;
    /// let mut vec: EagerVec<_> = [10, 20, 30, 40, 50].into_iter().collect();
    /// vec.erase_range(1, 2);
    /// assert_eq!(&*vec, &[10, 40, 50]);
    ///
    /// vec.erase_range(2, 9000);
    /// assert_eq!(&*vec, &[10, 40]);
    /// ```
    pub fn erase_range(&mut self, first: usize, mut last: usize) {
        if self.len == 0 {
            return;
        }
        if last >= self.len {
            last = self.len - 1;
        }
        if first > last {
            return;
        }

        let removed = last - first + 1;
        let old_len = self.len;

        // Truncate to the untouched prefix before running any destructor. If one of them
        // panics, the unwind reaches drop_elements with the doomed slots and the tail
        // already excluded: they leak instead of being dropped a second time.
        self.len = first;

        if mem::needs_drop::<T>() {
            for i in first..=last {
                // SAFETY: i <= last < old_len, so the slot holds a live element, and len no
                // longer covers it, so nothing observes it as live again.
                unsafe {
                    ptr::drop_in_place(self.raw.ptr.add(i).as_ptr());
                }
            }
        }

        // SAFETY: Source and destination both lie within the old initialized prefix of the
        // allocation; copy handles the overlap. The vacated tail slots become raw memory,
        // which the len written below accounts for.
        unsafe {
            ptr::copy(
                self.raw.ptr.add(last + 1).as_ptr(),
                self.raw.ptr.add(first).as_ptr(),
                old_len - last - 1,
            );
        }

        self.len = old_len - removed;
    }

    /// Ensures that the capacity is at least `total` slots. Requests at or below the current
    /// capacity are no-ops; this method never shrinks. Otherwise the storage is reallocated
    /// to exactly `total` slots.
    ///
    /// # Panics
    /// Panics if the requested memory layout size would exceed [`isize::MAX`].
    ///
    /// # Examples
    /// ```
    /// # use eager_vec::vector::EagerVec;
    /// let mut vec: EagerVec<u8> = EagerVec::new();
    /// vec.reserve(100);
    /// assert_eq!(vec.cap(), 100);
    /// vec.reserve(10);
    /// assert_eq!(vec.cap(), 100);
    /// ```
    pub fn reserve(&mut self, total: usize) {
        self.try_reserve(total).throw()
    }

    /// The checked form of [`reserve`](EagerVec::reserve): an oversized request is reported
    /// as [`CapacityOverflow`] instead of panicking.
    ///
    /// # Errors
    /// Returns [`CapacityOverflow`] if the requested memory layout size would exceed
    /// [`isize::MAX`].
    pub fn try_reserve(&mut self, total: usize) -> Result<(), CapacityOverflow> {
        if total <= self.cap() {
            return Ok(());
        }
        if Layout::array::<T>(total).is_err() {
            return Err(CapacityOverflow);
        }

        self.raw.realloc(total);
        Ok(())
    }

    /// Shrinks the capacity to exactly `max(len, 1)`: an empty EagerVec deliberately keeps
    /// one slot of backing storage rather than none. Calling this twice in a row is
    /// idempotent.
    ///
    /// # Examples
    /// ```
    /// # use eager_vec::vector::EagerVec;
    /// let mut vec: EagerVec<_> = (0..5).collect();
    /// vec.reserve(64);
    /// vec.shrink_to_fit();
    /// assert_eq!(vec.cap(), 5);
    /// ```
    pub fn shrink_to_fit(&mut self) {
        self.raw.realloc(cmp::max(self.len, 1));
    }

    /// Drops every live element and returns the capacity to
    /// [`initial_cap`](EagerVec::initial_cap). Unlike [`Vec::clear`], which keeps the
    /// high-water capacity, this resets the storage to its starting footprint, matching the
    /// eager-allocation policy used everywhere else.
    ///
    /// # Panics
    /// Panics if the memory layout of the restored storage would exceed [`isize::MAX`]
    /// (possible only after an enormous [`set_initial_cap`](EagerVec::set_initial_cap)).
    ///
    /// # Examples
    /// ```
    /// # use eager_vec::vector::EagerVec;
    /// let mut vec = EagerVec::new();
    /// vec.extend(0..100);
    /// assert!(vec.cap() >= 100);
    /// vec.clear();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.cap(), 4);
    /// ```
    pub fn clear(&mut self) {
        self.drop_elements();
        self.raw.realloc(self.initial_cap);
    }

    /// Replaces the element at the provided index with `new_value`, returning the old value.
    ///
    /// # Panics
    /// Panics if the provided index is out of bounds.
    pub fn replace(&mut self, index: usize, new_value: T) -> T {
        self.try_replace(index, new_value).throw()
    }

    /// The checked form of [`replace`](EagerVec::replace).
    ///
    /// # Errors
    /// Returns [`IndexOutOfBounds`] if `index` doesn't refer to a live element; `new_value`
    /// is dropped in that case.
    pub fn try_replace(&mut self, index: usize, new_value: T) -> Result<T, IndexOutOfBounds> {
        if index >= self.len {
            return Err(IndexOutOfBounds {
                index,
                len: self.len,
            });
        }

        // SAFETY: index < len, so the slot is in bounds and holds a live element, which
        // mem::replace hands back to the caller.
        Ok(mem::replace(
            unsafe { self.raw.ptr.add(index).as_mut() },
            new_value,
        ))
    }
}

impl<T> EagerVec<T> {
    /// Multiplies the capacity by the growth factor, clamped so the backing allocation stays
    /// representable where that still leaves room to grow.
    ///
    /// # Panics
    /// Panics if the grown memory layout size would exceed [`isize::MAX`].
    pub(crate) fn grow(&mut self) {
        let mut new_cap = self.cap().saturating_mul(self.growth_factor);

        if size_of::<T>() > 0 {
            let max_elements = MAX_BYTES / size_of::<T>();

            // If the multiplied capacity would exceed the maximum allocation size, settle for
            // the maximum if it still represents growth.
            if new_cap > max_elements && self.cap() < max_elements {
                new_cap = max_elements;
            }
        }

        self.raw.realloc(new_cap);
    }

    /// Drops every live element in place and zeroes `len`. The length is taken out before
    /// the first destructor runs, so a panicking [`Drop`] leaks the remaining elements
    /// instead of exposing them to a second drop during unwinding. The whole loop compiles
    /// away for element types without drop glue.
    pub(crate) fn drop_elements(&mut self) {
        let len = mem::take(&mut self.len);

        if !mem::needs_drop::<T>() {
            return;
        }

        for i in 0..len {
            // SAFETY: All slots below the taken len hold live elements, and len is already
            // zero, so nothing observes them as live again.
            unsafe {
                ptr::drop_in_place(self.raw.ptr.add(i).as_ptr());
            }
        }
    }
}

impl<T> Extend<T> for EagerVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T> FromIterator<T> for EagerVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(value: I) -> Self {
        let iter = value.into_iter();
        let mut vec = EagerVec::with_cap(iter.size_hint().0);

        for item in iter {
            vec.push(item);
        }

        vec
    }
}

impl<T> Default for EagerVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for EagerVec<T> {
    fn drop(&mut self) {
        self.drop_elements();

        // Dropping self.raw frees the backing storage; it never touches the elements.
    }
}

impl<T> Deref for EagerVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: The pointer is nonnull, properly aligned and valid for len consecutive
        // initialized values of T, whose total size cannot exceed isize::MAX. Taking &self
        // means the borrow checker forbids mutation for the lifetime of the slice.
        unsafe { slice::from_raw_parts(self.raw.ptr.as_ptr(), self.len) }
    }
}

impl<T> DerefMut for EagerVec<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: The pointer is nonnull, properly aligned and valid for len consecutive
        // initialized values of T, whose total size cannot exceed isize::MAX. Taking &mut
        // self means the borrow checker forbids any other access for the lifetime of the
        // slice.
        unsafe { slice::from_raw_parts_mut(self.raw.ptr.as_ptr(), self.len) }
    }
}

impl<T> AsRef<[T]> for EagerVec<T> {
    fn as_ref(&self) -> &[T] {
        self.deref()
    }
}

impl<T> AsMut<[T]> for EagerVec<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.deref_mut()
    }
}

impl<T> Borrow<[T]> for EagerVec<T> {
    fn borrow(&self) -> &[T] {
        self.as_ref()
    }
}

impl<T> BorrowMut<[T]> for EagerVec<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut()
    }
}

// SAFETY: An EagerVec holds a unique pointer to its allocation, so sending the vector sends
// sole ownership of the elements along with it when T: Send.
unsafe impl<T: Send> Send for EagerVec<T> {}
// SAFETY: The safe API obeys the borrow checker and performs no interior mutability, so
// shared references are safe to share across threads when T: Sync.
unsafe impl<T: Sync> Sync for EagerVec<T> {}

impl<T: Clone> Clone for EagerVec<T> {
    /// Deep-copies the elements into storage sized to the source's live element count, not
    /// its capacity. The source's growth policy is carried over.
    fn clone(&self) -> Self {
        let mut vec = EagerVec {
            raw: RawStorage::new(cmp::max(self.len, 1)),
            len: 0,
            growth_factor: self.growth_factor,
            initial_cap: self.initial_cap,
        };

        for value in self.iter() {
            // SAFETY: vec was allocated with capacity for every element of self.
            unsafe { vec.push_unchecked(value.clone()) }
        }

        vec
    }

    /// Deep-copies the source's elements into this vector, reusing the existing buffer when
    /// it is large enough and reallocating to the source's live element count otherwise. In
    /// both cases this vector keeps its own growth policy; only the contents are copied.
    fn clone_from(&mut self, source: &Self) {
        self.drop_elements();

        if self.cap() < source.len {
            self.raw.realloc(source.len);
        }

        for value in source.iter() {
            // SAFETY: The capacity check above guarantees room for every element.
            unsafe { self.push_unchecked(value.clone()) }
        }
    }
}

impl<T: PartialEq> PartialEq for EagerVec<T> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Eq> Eq for EagerVec<T> {}

impl<T: Hash> Hash for EagerVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.deref().hash(state)
    }
}

impl<T: Debug> Debug for EagerVec<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("EagerVec")
            .field("contents", &&**self)
            .field("len", &self.len)
            .field("cap", &self.cap())
            .finish()
    }
}

impl<T: Debug> Display for EagerVec<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
