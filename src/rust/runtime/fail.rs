// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//==============================================================================
// Imports
//==============================================================================

use ::libc::{
    c_int,
    EINVAL,
    EIO,
    ENOMEM,
};
use ::std::{
    collections::TryReserveError,
    error,
    fmt,
    io,
};
use ::yaml_rust::ScanError;

//==============================================================================
// Structures
//==============================================================================

/// Failure of a frame, endpoint, or configuration operation.
///
/// The errno tells the caller what to do with the frame or access point at hand: `EBADMSG` and `ENOTSUP` mean "pass
/// the frame through unmodified", while `EINVAL` and `ENOMEM` from endpoint setup mean "run without tunneling".
#[derive(Clone, PartialEq, Eq)]
pub struct Fail {
    /// Error code.
    pub errno: c_int,
    /// Cause.
    pub cause: String,
}

//==============================================================================
// Associate Functions
//==============================================================================

impl Fail {
    pub fn new(errno: c_int, cause: &str) -> Self {
        Self {
            errno,
            cause: cause.to_string(),
        }
    }
}

//==============================================================================
// Trait Implementations
//==============================================================================

impl fmt::Display for Fail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (errno={})", self.cause, self.errno)
    }
}

impl fmt::Debug for Fail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {:?}: {:?}", self.errno, self.cause)
    }
}

impl error::Error for Fail {}

/// Configuration files that cannot be read.
impl From<io::Error> for Fail {
    fn from(e: io::Error) -> Self {
        Self {
            errno: e.raw_os_error().unwrap_or(EIO),
            cause: format!("I/O error: {}", e),
        }
    }
}

/// Configuration text that is not valid YAML.
impl From<ScanError> for Fail {
    fn from(e: ScanError) -> Self {
        Self {
            errno: EINVAL,
            cause: format!("failed to parse configuration: {}", e),
        }
    }
}

/// Endpoint storage that cannot be allocated.
impl From<TryReserveError> for Fail {
    fn from(e: TryReserveError) -> Self {
        Self {
            errno: ENOMEM,
            cause: format!("out of memory: {}", e),
        }
    }
}

//==============================================================================
// Unit Tests
//==============================================================================
