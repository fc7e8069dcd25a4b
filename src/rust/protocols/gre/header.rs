// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//======================================================================================================================
// Imports
//======================================================================================================================

use crate::{
    protocols::layer2::EtherType2,
    runtime::fail::Fail,
};
use ::libc::{
    EBADMSG,
    ENOTSUP,
};
use ::std::convert::TryFrom;

//======================================================================================================================
// Constants
//======================================================================================================================

/// Size of the GRE base header (in bytes). Optional fields are not included.
pub const GRE_HEADER_SIZE: usize = 4;

/// Checksum Present (C bit).
pub const GRE_FLAG_CHECKSUM: u16 = 0x8000;

/// Routing Present (R bit).
pub const GRE_FLAG_ROUTING: u16 = 0x4000;

/// Key Present (K bit).
pub const GRE_FLAG_KEY: u16 = 0x2000;

/// Sequence Number Present (S bit).
pub const GRE_FLAG_SEQUENCE: u16 = 0x1000;

/// Strict Source Route (s bit).
pub const GRE_FLAG_STRICT_SOURCE_ROUTE: u16 = 0x0800;

/// Version bits of the flags and version word.
pub const GRE_VERSION_MASK: u16 = 0x0007;

/// The only GRE version we speak.
const GRE_VERSION: u16 = 0;

//======================================================================================================================
// Structures
//======================================================================================================================

/// GRE base header (RFC 2784).
///
/// ```text
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |C|R|K|S|s|Recur|  Flags  | Ver |         Protocol Type         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GreHeader {
    // Bytes 0..2
    flags_and_version: u16,
    // Bytes 2..4
    protocol_type: u16,
}

//======================================================================================================================
// Associated Functions
//======================================================================================================================

impl GreHeader {
    pub fn new(flags_and_version: u16, protocol_type: u16) -> Self {
        Self {
            flags_and_version,
            protocol_type,
        }
    }

    /// Creates the header that SoftGRE puts in front of a bridged ethernet frame.
    pub fn transparent_ethernet_bridging() -> Self {
        Self::new(0, EtherType2::TransparentEthernetBridging as u16)
    }

    /// Parses the base header at the front of [buf].
    pub fn parse(buf: &[u8]) -> Result<Self, Fail> {
        if buf.len() < GRE_HEADER_SIZE {
            return Err(Fail::new(EBADMSG, "gre header too small"));
        }
        let flags_and_version: u16 = u16::from_be_bytes([buf[0], buf[1]]);
        let protocol_type: u16 = u16::from_be_bytes([buf[2], buf[3]]);

        if flags_and_version & GRE_VERSION_MASK != GRE_VERSION {
            let cause: String = format!("unsupported gre version (version={})", flags_and_version & GRE_VERSION_MASK);
            warn!("parse(): {}", cause);
            return Err(Fail::new(ENOTSUP, &cause));
        }

        Ok(Self {
            flags_and_version,
            protocol_type,
        })
    }

    /// Writes the base header onto the front of [buf].
    pub fn serialize(&self, buf: &mut [u8]) -> Result<(), Fail> {
        if buf.len() < GRE_HEADER_SIZE {
            return Err(Fail::new(EBADMSG, "buffer too small for a gre header"));
        }
        buf[0..2].copy_from_slice(&self.flags_and_version.to_be_bytes());
        buf[2..4].copy_from_slice(&self.protocol_type.to_be_bytes());
        Ok(())
    }

    pub fn flags_and_version(&self) -> u16 {
        self.flags_and_version
    }

    pub fn version(&self) -> u8 {
        (self.flags_and_version & GRE_VERSION_MASK) as u8
    }

    pub fn protocol_type(&self) -> u16 {
        self.protocol_type
    }

    /// Interprets the protocol type as an EtherType.
    pub fn ether_type(&self) -> Result<EtherType2, Fail> {
        EtherType2::try_from(self.protocol_type)
    }

    pub fn has_checksum(&self) -> bool {
        self.flags_and_version & GRE_FLAG_CHECKSUM != 0
    }

    pub fn has_routing(&self) -> bool {
        self.flags_and_version & GRE_FLAG_ROUTING != 0
    }

    pub fn has_key(&self) -> bool {
        self.flags_and_version & GRE_FLAG_KEY != 0
    }

    pub fn has_sequence(&self) -> bool {
        self.flags_and_version & GRE_FLAG_SEQUENCE != 0
    }

    pub fn has_strict_source_route(&self) -> bool {
        self.flags_and_version & GRE_FLAG_STRICT_SOURCE_ROUTE != 0
    }
}

//======================================================================================================================
// Unit Tests
//======================================================================================================================

#[cfg(test)]
mod test {
    use super::{
        GreHeader,
        GRE_FLAG_CHECKSUM,
        GRE_FLAG_KEY,
        GRE_FLAG_SEQUENCE,
        GRE_HEADER_SIZE,
    };
    use crate::protocols::layer2::EtherType2;
    use ::anyhow::Result;
    use ::libc::{
        EBADMSG,
        ENOTSUP,
    };

    /// Writes the bridged ethernet header and reads it back.
    #[test]
    fn test_transparent_ethernet_bridging() -> Result<()> {
        let mut buf: [u8; GRE_HEADER_SIZE] = [0xff; GRE_HEADER_SIZE];
        GreHeader::transparent_ethernet_bridging().serialize(&mut buf)?;
        ensure_eq!(buf, [0x00u8, 0x00u8, 0x65u8, 0x58u8]);

        let header: GreHeader = GreHeader::parse(&buf)?;
        ensure_eq!(header.version(), 0);
        ensure_eq!(header.protocol_type(), 0x6558);
        ensure_eq!(header.ether_type()?, EtherType2::TransparentEthernetBridging);
        ensure_eq!(header.has_checksum(), false);
        ensure_eq!(header.has_routing(), false);
        ensure_eq!(header.has_key(), false);
        ensure_eq!(header.has_sequence(), false);
        ensure_eq!(header.has_strict_source_route(), false);
        Ok(())
    }

    /// Decodes the optional field flags.
    #[test]
    fn test_parse_flags() -> Result<()> {
        let buf: [u8; 8] = [0xb0, 0x00, 0x08, 0x00, 0xde, 0xad, 0xbe, 0xef];
        let header: GreHeader = GreHeader::parse(&buf)?;
        ensure_eq!(header.flags_and_version(), GRE_FLAG_CHECKSUM | GRE_FLAG_KEY | GRE_FLAG_SEQUENCE);
        ensure_eq!(header.has_checksum(), true);
        ensure_eq!(header.has_routing(), false);
        ensure_eq!(header.has_key(), true);
        ensure_eq!(header.has_sequence(), true);
        ensure_eq!(header.ether_type()?, EtherType2::Ipv4);
        Ok(())
    }

    /// Rejects a buffer shorter than the base header.
    #[test]
    fn test_parse_too_small() -> Result<()> {
        match GreHeader::parse(&[0x00, 0x00, 0x65]) {
            Ok(header) => anyhow::bail!("parsing a truncated gre header should fail (header={:?})", header),
            Err(e) => ensure_eq!(e.errno, EBADMSG),
        }
        Ok(())
    }

    /// Rejects every non-zero version.
    #[test]
    fn test_parse_unsupported_version() -> Result<()> {
        for version in 1..8u8 {
            let buf: [u8; GRE_HEADER_SIZE] = [0x00, version, 0x65, 0x58];
            match GreHeader::parse(&buf) {
                Ok(header) => anyhow::bail!("parsing gre version {} should fail (header={:?})", version, header),
                Err(e) => ensure_eq!(e.errno, ENOTSUP),
            }
        }
        Ok(())
    }
}
