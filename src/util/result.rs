use std::error::Error;

/// Bridges the checked API onto the panicking one: every panicking vector entry point wraps
/// its `try_` counterpart through [`throw`](ResultExtension::throw).
pub(crate) trait ResultExtension<T, E: Error> {
    /// Like [`Result::unwrap`], but panics with the error's display output, so the message
    /// reads as a sentence rather than a debug dump.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    fn throw(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => panic!("{}", error),
        }
    }
}
