// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//==============================================================================
// Imports
//==============================================================================

use crate::runtime::fail::Fail;
use ::libc::EBADMSG;

//==============================================================================
// Constants
//==============================================================================

/// Minimum size of IPv4 header (in bytes).
pub const IPV4_HEADER_MIN_SIZE: usize = 20;

/// IPv4 Control Flag: Don't Fragment (as found in the flags and fragment offset field).
pub const IPV4_FLAG_DF: u16 = 0x4000;

/// IPv4 Control Flag: More Fragments (as found in the flags and fragment offset field).
pub const IPV4_FLAG_MF: u16 = 0x2000;

/// Fragment offset bits of the flags and fragment offset field.
pub const IPV4_FRAGMENT_OFFSET_MASK: u16 = 0x1fff;

/// Offset of the flags and fragment offset field.
const FLAGS_OFFSET: usize = 6;

/// Offset of the header checksum field.
const CHECKSUM_OFFSET: usize = 10;

//==============================================================================
// Structures
//==============================================================================

/// In-place view of an IPv4 datagram header.
///
/// Fields are read and written at their wire offsets in network byte order, so the view works on any byte buffer
/// regardless of alignment. The underlying buffer is trimmed to exactly the header length given by the IHL field.
#[derive(Debug)]
pub struct Ipv4Header<T: AsRef<[u8]>> {
    buffer: T,
}

//==============================================================================
// Associated Functions
//==============================================================================

/// Read accessors for IPv4 headers.
impl<T: AsRef<[u8]>> Ipv4Header<T> {
    /// Wraps [buffer], checking that it holds a complete header.
    pub fn new_checked(buffer: T) -> Result<Self, Fail> {
        let buf: &[u8] = buffer.as_ref();

        // The datagram should be as big as the header.
        if buf.len() < IPV4_HEADER_MIN_SIZE {
            return Err(Fail::new(EBADMSG, "ipv4 datagram too small"));
        }

        // Internet header length.
        let hdr_size: usize = ((buf[0] & 0xf) as usize) << 2;
        if hdr_size < IPV4_HEADER_MIN_SIZE {
            return Err(Fail::new(EBADMSG, "ipv4 IHL is too small"));
        }
        if buf.len() < hdr_size {
            return Err(Fail::new(EBADMSG, "ipv4 datagram too small to fit in header"));
        }

        Ok(Self { buffer })
    }

    /// Returns the Internet Header Length field (in 32-bit words).
    pub fn ihl(&self) -> u8 {
        self.buffer.as_ref()[0] & 0xf
    }

    /// Computes the size of the target IPv4 header.
    pub fn header_size(&self) -> usize {
        (self.ihl() as usize) << 2
    }

    /// Returns the raw flags and fragment offset field.
    pub fn flags_and_fragment_offset(&self) -> u16 {
        let buf: &[u8] = self.buffer.as_ref();
        u16::from_be_bytes([buf[FLAGS_OFFSET], buf[FLAGS_OFFSET + 1]])
    }

    pub fn dont_fragment(&self) -> bool {
        self.flags_and_fragment_offset() & IPV4_FLAG_DF != 0
    }

    pub fn more_fragments(&self) -> bool {
        self.flags_and_fragment_offset() & IPV4_FLAG_MF != 0
    }

    pub fn fragment_offset(&self) -> u16 {
        self.flags_and_fragment_offset() & IPV4_FRAGMENT_OFFSET_MASK
    }

    /// Returns the header checksum field stored in the target IPv4 header.
    pub fn header_checksum(&self) -> u16 {
        let buf: &[u8] = self.buffer.as_ref();
        u16::from_be_bytes([buf[CHECKSUM_OFFSET], buf[CHECKSUM_OFFSET + 1]])
    }

    /// Checks the header checksum. A valid header, checksum included, sums to 0xffff.
    pub fn verify_checksum(&self) -> bool {
        compute_checksum(self.header()) == 0
    }

    /// Returns the header bytes, options included.
    pub fn header(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.header_size()]
    }

    /// Releases the underlying buffer.
    pub fn into_inner(self) -> T {
        self.buffer
    }
}

/// Write accessors for IPv4 headers.
impl<T: AsRef<[u8]> + AsMut<[u8]>> Ipv4Header<T> {
    /// Overwrites the flags and fragment offset field.
    pub fn set_flags_and_fragment_offset(&mut self, value: u16) {
        self.buffer.as_mut()[FLAGS_OFFSET..FLAGS_OFFSET + 2].copy_from_slice(&value.to_be_bytes());
    }

    /// Overwrites the header checksum field.
    pub fn set_header_checksum(&mut self, checksum: u16) {
        self.buffer.as_mut()[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2].copy_from_slice(&checksum.to_be_bytes());
    }

    /// Recomputes the header checksum over IHL * 4 bytes and stores it.
    pub fn fill_checksum(&mut self) {
        self.set_header_checksum(0);
        let checksum: u16 = compute_checksum(self.header());
        self.set_header_checksum(checksum);
    }
}

//==============================================================================
// Standalone Functions
//==============================================================================

/// Computes the Internet checksum (RFC 1071) of [buf].
///
/// Words are summed in network byte order into a 64-bit accumulator. A trailing odd byte is summed as the high byte
/// of a zero-padded word. Carries are folded back until the sum fits in 16 bits.
pub fn compute_checksum(buf: &[u8]) -> u16 {
    let mut state: u64 = 0;
    let mut words = buf.chunks_exact(2);
    for word in &mut words {
        state += u16::from_be_bytes([word[0], word[1]]) as u64;
    }
    if let [last] = words.remainder() {
        state += (*last as u64) << 8;
    }

    while state > 0xffff {
        state = (state >> 16) + (state & 0xffff);
    }
    !(state as u16)
}
