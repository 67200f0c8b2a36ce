use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::util::error::CapacityOverflow;
use crate::util::result::ResultExtension;

/// The allocation backing an [`EagerVec`](super::EagerVec): a pointer paired with a capacity
/// measured in element slots.
///
/// Slots are raw memory. Which of them hold live values is tracked entirely by the owner, so
/// dropping a RawStorage frees the allocation without running any element destructors. For
/// zero-sized element types no allocation is ever performed; the pointer stays dangling and
/// only the capacity bookkeeping changes.
pub(crate) struct RawStorage<T> {
    pub(crate) ptr: NonNull<T>,
    pub(crate) cap: usize,
    _phantom: PhantomData<T>,
}

impl<T> RawStorage<T> {
    /// Allocates storage for exactly `cap` elements.
    ///
    /// # Panics
    /// Panics if the memory layout size would exceed [`isize::MAX`].
    pub(crate) fn new(cap: usize) -> RawStorage<T> {
        let layout = Self::make_layout(cap);

        RawStorage {
            ptr: Self::make_ptr(layout),
            cap,
            _phantom: PhantomData,
        }
    }

    /// Builds the [`Layout`] covering `cap` elements of `T`.
    ///
    /// # Panics
    /// Panics if the layout size would exceed [`isize::MAX`].
    pub(crate) fn make_layout(cap: usize) -> Layout {
        Layout::array::<T>(cap).map_err(|_| CapacityOverflow).throw()
    }

    /// Allocates for the provided [`Layout`], returning a dangling pointer for a zero-sized
    /// layout. Allocation failure calls [`alloc::handle_alloc_error`] rather than panicking,
    /// as recommended, to avoid allocating during the failure path.
    fn make_ptr(layout: Layout) -> NonNull<T> {
        if layout.size() == 0 {
            NonNull::dangling()
        } else {
            NonNull::new(
                // SAFETY: Zero-sized layouts have been guarded against.
                unsafe { alloc::alloc(layout).cast() },
            )
            .unwrap_or_else(|| alloc::handle_alloc_error(layout))
        }
    }

    /// Changes the capacity to exactly `new_cap` slots, relocating the contents bytewise.
    /// Bitwise moves are valid for every Rust type, so this is correct whether or not the
    /// owner has initialized any slots, as long as initialized slots all sit below `new_cap`.
    ///
    /// # Panics
    /// Panics if the new memory layout size would exceed [`isize::MAX`].
    pub(crate) fn realloc(&mut self, new_cap: usize) {
        let new_ptr = match (self.cap, new_cap) {
            (_, _) if size_of::<T>() == 0 => {
                // Nothing is ever allocated for zero-sized elements; keep the dangling
                // pointer and let the capacity update below do the rest.
                self.ptr
            }
            (old, new) if old == new => return,
            (0, _) => {
                // No existing allocation to resize; allocate from scratch.
                Self::make_ptr(Self::make_layout(new_cap))
            }
            (_, 0) => {
                // SAFETY: cap != 0 and T isn't zero-sized, so ptr is a live allocation made
                // with this exact layout in the global allocator.
                unsafe {
                    alloc::dealloc(self.ptr.as_ptr().cast(), Self::make_layout(self.cap));
                }
                NonNull::dangling()
            }
            (_, _) => {
                let old_layout = Self::make_layout(self.cap);
                let new_layout = Self::make_layout(new_cap);

                // SAFETY: ptr was allocated in the global allocator with old_layout, and
                // new_layout's size is non-zero and <= isize::MAX by construction.
                let raw_ptr: *mut T = unsafe {
                    alloc::realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size())
                        .cast()
                };

                NonNull::new(raw_ptr).unwrap_or_else(|| alloc::handle_alloc_error(new_layout))
            }
        };

        self.ptr = new_ptr;
        self.cap = new_cap;
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        let layout = Self::make_layout(self.cap);

        if layout.size() != 0 {
            // SAFETY: ptr was allocated in the global allocator with this layout; zero-sized
            // layouts were never allocated and are guarded against deallocation.
            unsafe {
                alloc::dealloc(self.ptr.as_ptr().cast(), layout);
            }
        }
    }
}
