//! A module containing [`EagerVec`] and associated types.
//!
//! The only other included types are [`IntoIter`] for owned iteration and the error types
//! produced by the checked (`try_`) operations. [`Iter`](std::slice::Iter) and
//! [`IterMut`](std::slice::IterMut) from [`std::slice`] are used for borrowed iteration,
//! since EagerVec implements [`Deref<Target = [T]>`](std::ops::Deref).

mod iter;
mod raw;
mod vector;

pub use iter::*;
pub use vector::*;

pub use crate::util::error::{CapacityOverflow, IndexOutOfBounds, VectorError};
