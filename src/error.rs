//! Command-line Error Types

use derive_more::{Display, Error};

/// A command-line error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for command-line operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Configuration could not be loaded, or does not describe a usable setup.
    #[display("configuration error")]
    Config,
    /// The requested command failed.
    #[display("{_0} failed")]
    Command(#[error(not(source))] &'static str),
    /// Writing the result to standard output failed.
    #[display("could not write output")]
    Output,
}
