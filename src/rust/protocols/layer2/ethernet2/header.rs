// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//======================================================================================================================
// Imports
//======================================================================================================================

use crate::{
    protocols::layer2::EtherType2,
    runtime::{
        fail::Fail,
        network::types::MacAddress,
    },
};
use ::crc::{
    Crc,
    CRC_32_ISO_HDLC,
};
use ::libc::EBADMSG;
use ::std::convert::TryFrom;

//======================================================================================================================
// Constants
//======================================================================================================================

pub const ETHERNET2_HEADER_SIZE: usize = 14;

/// Size of the trailing Frame Check Sequence (in bytes).
pub const ETHERNET2_FCS_SIZE: usize = 4;

/// Offset of the EtherType field in an untagged frame.
const ETHER_TYPE_OFFSET: usize = 12;

/// IEEE 802.3 CRC-32 (reflected 0xEDB88320, initial and final value 0xFFFFFFFF).
const FCS_ALGORITHM: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

//======================================================================================================================
// Structures
//======================================================================================================================

#[derive(Clone, Debug)]
pub struct Ethernet2Header {
    // Bytes 0..6
    dst_addr: MacAddress,
    // Bytes 6..12
    src_addr: MacAddress,
    // Bytes 12..14
    ether_type: EtherType2,
}

//======================================================================================================================
// Associated Functions
//======================================================================================================================

impl Ethernet2Header {
    /// Creates a header for an Ethernet frame.
    pub fn new(dst_addr: MacAddress, src_addr: MacAddress, ether_type: EtherType2) -> Self {
        Self {
            dst_addr,
            src_addr,
            ether_type,
        }
    }

    /// Parses the ethernet header at the front of [buf] without consuming it.
    pub fn parse(buf: &[u8]) -> Result<Self, Fail> {
        if buf.len() < ETHERNET2_HEADER_SIZE {
            return Err(Fail::new(EBADMSG, "frame too small"));
        }
        let hdr_buf: &[u8] = &buf[..ETHERNET2_HEADER_SIZE];
        let dst_addr: MacAddress = MacAddress::from_bytes(&hdr_buf[0..6])?;
        let src_addr: MacAddress = MacAddress::from_bytes(&hdr_buf[6..12])?;
        let ether_type: EtherType2 = EtherType2::try_from(Self::read_ether_type(hdr_buf)?)?;

        Ok(Self {
            dst_addr,
            src_addr,
            ether_type,
        })
    }

    /// Writes the target header onto the front of [buf].
    pub fn serialize(&self, buf: &mut [u8]) -> Result<(), Fail> {
        if buf.len() < ETHERNET2_HEADER_SIZE {
            return Err(Fail::new(EBADMSG, "buffer too small for an ethernet header"));
        }
        buf[0..6].copy_from_slice(&self.dst_addr.octets());
        buf[6..12].copy_from_slice(&self.src_addr.octets());
        buf[12..14].copy_from_slice(&(self.ether_type as u16).to_be_bytes());
        Ok(())
    }

    pub fn dst_addr(&self) -> MacAddress {
        self.dst_addr
    }

    pub fn src_addr(&self) -> MacAddress {
        self.src_addr
    }

    pub fn ether_type(&self) -> EtherType2 {
        self.ether_type
    }

    /// Reads the raw EtherType field of an untagged frame.
    pub fn read_ether_type(buf: &[u8]) -> Result<u16, Fail> {
        if buf.len() < ETHERNET2_HEADER_SIZE {
            return Err(Fail::new(EBADMSG, "frame too small"));
        }
        Ok(u16::from_be_bytes([buf[ETHER_TYPE_OFFSET], buf[ETHER_TYPE_OFFSET + 1]]))
    }

    /// Computes the Frame Check Sequence of [frame], which must not include the FCS itself.
    pub fn compute_fcs(frame: &[u8]) -> u32 {
        FCS_ALGORITHM.checksum(frame)
    }

    /// Reads the trailing FCS of [buf] (network byte order).
    pub fn read_fcs(buf: &[u8]) -> Result<u32, Fail> {
        let fcs_offset: usize = Self::fcs_offset(buf.len())?;
        let fcs: &[u8] = &buf[fcs_offset..];
        Ok(u32::from_be_bytes([fcs[0], fcs[1], fcs[2], fcs[3]]))
    }

    /// Recomputes the FCS over everything but the last four bytes of [buf] and stores it there.
    pub fn update_fcs(buf: &mut [u8]) -> Result<(), Fail> {
        let fcs_offset: usize = Self::fcs_offset(buf.len())?;
        let fcs: u32 = Self::compute_fcs(&buf[..fcs_offset]);
        buf[fcs_offset..].copy_from_slice(&fcs.to_be_bytes());
        Ok(())
    }

    /// Checks whether the trailing FCS of [buf] matches its contents.
    pub fn verify_fcs(buf: &[u8]) -> bool {
        match Self::read_fcs(buf) {
            Ok(fcs) => fcs == Self::compute_fcs(&buf[..buf.len() - ETHERNET2_FCS_SIZE]),
            Err(_) => false,
        }
    }

    fn fcs_offset(len: usize) -> Result<usize, Fail> {
        match len.checked_sub(ETHERNET2_FCS_SIZE) {
            Some(offset) if offset >= ETHERNET2_HEADER_SIZE => Ok(offset),
            _ => Err(Fail::new(EBADMSG, "frame too small to carry an FCS")),
        }
    }
}
