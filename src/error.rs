//! Error types shared across the server.
//!
//! [`Failed`] signals that something went wrong and that the details have
//! already been logged. [`ExitError`] is returned when the process should
//! terminate and determines the exit code.

use std::fmt;


//------------ Failed --------------------------------------------------------

/// An operation has failed and diagnostics have been logged.
#[derive(Clone, Copy, Debug)]
pub struct Failed;

impl fmt::Display for Failed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("operation failed")
    }
}


//------------ ExitError -----------------------------------------------------

/// An error happened that should lead to terminating the program.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExitError {
    /// The command line was not understood.
    ///
    /// This should be exit status 1.
    Usage,

    /// The port argument was not a number between 1 and 65535.
    ///
    /// This should be exit status 2.
    InvalidPort,

    /// The root path does not exist or is not a directory.
    ///
    /// This should be exit status 3.
    InvalidRoot,

    /// The listener could not be started.
    ///
    /// This should be exit status 4.
    Listener,
}

impl ExitError {
    pub fn exit_code(self) -> i32 {
        match self {
            ExitError::Usage => 1,
            ExitError::InvalidPort => 2,
            ExitError::InvalidRoot => 3,
            ExitError::Listener => 4,
        }
    }
}

impl From<Failed> for ExitError {
    fn from(_: Failed) -> ExitError {
        ExitError::Listener
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ExitError::Usage => f.write_str("usage error"),
            ExitError::InvalidPort => f.write_str("invalid port"),
            ExitError::InvalidRoot => f.write_str("invalid root path"),
            ExitError::Listener => f.write_str("listener failed to start"),
        }
    }
}
