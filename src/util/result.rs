use std::error::Error;

pub(crate) trait ResultExtension<T, E: Error> {
    /// Backs the panicking half of each `try_` pair: similar to [`Result::unwrap`], but the panic
    /// message is the error's own [`Display`](std::fmt::Display) output, and the reported location
    /// is that of the public method that called this.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    #[track_caller]
    fn throw(self) -> T {
        match self {
            Ok(val) => val,
            Err(error) => panic!("{error}"),
        }
    }
}
