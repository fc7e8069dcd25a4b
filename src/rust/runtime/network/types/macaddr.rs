// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//======================================================================================================================
// Imports
//======================================================================================================================

use crate::runtime::fail::Fail;
use ::libc::EBADMSG;
use ::std::fmt;

//======================================================================================================================
// Constants
//======================================================================================================================

/// Size of a link-layer address (in bytes).
pub const MAC_ADDRESS_SIZE: usize = 6;

//======================================================================================================================
// Structures
//======================================================================================================================

/// MAC Address
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct MacAddress(eui48::MacAddress);

//======================================================================================================================
// Associate Functions
//======================================================================================================================

impl MacAddress {
    pub const fn new(bytes: [u8; MAC_ADDRESS_SIZE]) -> Self {
        MacAddress(eui48::MacAddress::new(bytes))
    }

    /// Reads a MAC address from the first six bytes of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Fail> {
        if bytes.len() < MAC_ADDRESS_SIZE {
            return Err(Fail::new(EBADMSG, "buffer too small for a MAC address"));
        }
        match eui48::MacAddress::from_bytes(&bytes[..MAC_ADDRESS_SIZE]) {
            Ok(addr) => Ok(Self(addr)),
            Err(_) => Err(Fail::new(EBADMSG, "malformed MAC address")),
        }
    }

    /// Returns the array of bytes composing the target [MacAddress].
    pub fn octets(&self) -> [u8; MAC_ADDRESS_SIZE] {
        self.0.to_array()
    }

    pub fn to_canonical(self) -> String {
        self.0.to_canonical()
    }
}

//======================================================================================================================
// Trait Implementations
//======================================================================================================================

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_canonical())
    }
}

impl fmt::Debug for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MacAddress({})", &self.to_canonical())
    }
}

//======================================================================================================================
// Unit Tests
//======================================================================================================================
