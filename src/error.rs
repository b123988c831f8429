use derive_more::derive::{Display, Error};

/// Result type alias for this crate, using our [`Error`] type as the default error.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors that can occur while driving the matrix or handling control writes.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A pixel index or coordinate fell outside the matrix.
    #[display("index out of range")]
    InvalidIndex,

    /// A character outside `'0'`..=`'9'` was written to the segmented display.
    #[display("character has no glyph")]
    InvalidCharacter,

    /// A control write carried the wrong number of bytes.
    #[display("invalid write length")]
    InvalidLength,

    /// A control write carried a well-formed but out-of-range value.
    #[display("value out of range")]
    InvalidValue,

    /// A read was attempted while the cursor selects no pixel.
    #[display("read undefined at current cursor")]
    UndefinedRead,

    /// The strip driver reported a failure; the code is driver-specific.
    #[display("strip hardware error ({_0})")]
    Hardware(#[error(not(source))] i32),
}
