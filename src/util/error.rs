use derive_more::{Display, Error, From, IsVariant, TryInto};

/// The error produced by checked element access when the provided index doesn't refer to a
/// live element.
#[derive(Debug, Display, Error)]
#[display("index {index} out of bounds for vector with {len} elements")]
pub struct IndexOutOfBounds {
    /// The offending index.
    pub index: usize,
    /// The number of live elements at the time of the access.
    pub len: usize,
}

/// The error produced when a requested capacity would exceed the maximum size of a single
/// allocation ([`isize::MAX`] bytes).
#[derive(Debug, Display, Error)]
#[display("capacity overflow")]
pub struct CapacityOverflow;

/// A union of the two errors above, for callers composing checked access with checked
/// capacity adjustment.
#[derive(Debug, Display, Error, From, TryInto, IsVariant)]
pub enum VectorError {
    /// See [`IndexOutOfBounds`].
    IndexOutOfBounds(IndexOutOfBounds),
    /// See [`CapacityOverflow`].
    CapacityOverflow(CapacityOverflow),
}
