//! An owning, contiguous, growable sequence container tuned for append-heavy workloads.
//!
//! # Purpose
//! [`EagerVec<T>`](vector::EagerVec) trades a slightly more expensive constructor for cheaper
//! appends: unlike [`Vec`], which starts with capacity 0 and allocates lazily, every EagerVec
//! owns backing storage from the moment it is constructed, and the multiplier applied to the
//! capacity on overflow is configurable per instance. The container originated as the storage
//! primitive of a small menu-UI toolkit, where short-lived lists of widgets, input events and
//! slider states are filled element by element every frame and the first few pushes dominate.
//!
//! # Method
//! The implementation manages element lifecycles manually over a raw allocation: a pointer and
//! a capacity, with a separate count of live elements. Slots below the count are initialized,
//! slots above it are raw memory. Relocation during capacity changes goes through the
//! allocator's byte-level `realloc`, which is valid for every Rust type, and element-drop
//! loops are skipped entirely for types that don't need dropping.
//!
//! # Error Handling
//! Recoverable conditions (popping from an empty vector, erase ranges that miss) are absorbed
//! as no-ops or clamped rather than signaled. Fallible operations come in pairs: a `try_`
//! method returning a strongly typed error and a panicking convenience wrapper. Allocation
//! failure itself is not translated; it routes to [`std::alloc::handle_alloc_error`].
//!
//! # Concurrency
//! None. An EagerVec is a plain single-threaded value; it is [`Send`]/[`Sync`] exactly when
//! `T` is, and concurrent mutation requires external synchronization.

#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod vector;

pub(crate) mod util;
