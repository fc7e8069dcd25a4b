// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//======================================================================================================================
// Imports
//======================================================================================================================

use crate::{
    protocols::{
        layer2::{
            EtherType2,
            Ethernet2Header,
            ETHERNET2_FCS_SIZE,
            ETHERNET2_HEADER_SIZE,
        },
        layer3::ipv4::{
            Ipv4Header,
            IPV4_FLAG_DF,
            IPV4_HEADER_MIN_SIZE,
        },
    },
    runtime::fail::Fail,
};
use ::libc::{
    EBADMSG,
    ENOTSUP,
};

//======================================================================================================================
// Constants
//======================================================================================================================

/// Smallest frame that may carry an IPv4 datagram: ethernet header, minimal IPv4 header and FCS.
pub const SOFTGRE_MIN_FRAME_SIZE: usize = ETHERNET2_HEADER_SIZE + IPV4_HEADER_MIN_SIZE + ETHERNET2_FCS_SIZE;

//======================================================================================================================
// Standalone Functions
//======================================================================================================================

/// Sets (`set_df == true`) or clears the Don't Fragment bit of the IPv4 datagram carried in the ethernet frame [buf].
///
/// [buf] must include the trailing FCS. If the bit changes, the IPv4 header checksum and the FCS are recomputed. If
/// the bit is already in the requested state, the frame is left byte-for-byte untouched. Frames that are too small
/// (`EBADMSG`) or do not carry IPv4 (`ENOTSUP`) are rejected before any byte is written, so the caller can pass them
/// through unmodified.
pub fn modify_df_bit(buf: &mut [u8], set_df: bool) -> Result<(), Fail> {
    let (eth_hdr, fcs_offset): (Ethernet2Header, usize) = check_frame(buf)?;
    let mut header: Ipv4Header<&mut [u8]> = Ipv4Header::new_checked(&mut buf[ETHERNET2_HEADER_SIZE..fcs_offset])?;

    let old_flags: u16 = header.flags_and_fragment_offset();
    let new_flags: u16 = if set_df {
        old_flags | IPV4_FLAG_DF
    } else {
        old_flags & !IPV4_FLAG_DF
    };
    if new_flags == old_flags {
        return Ok(());
    }

    header.set_flags_and_fragment_offset(new_flags);
    header.fill_checksum();
    trace!(
        "modify_df_bit(): {} -> {}: flags {:#06x} -> {:#06x}, checksum={:#06x}",
        eth_hdr.src_addr(),
        eth_hdr.dst_addr(),
        old_flags,
        new_flags,
        header.header_checksum()
    );

    Ethernet2Header::update_fcs(buf)
}

/// Returns whether the IPv4 datagram carried in the ethernet frame [buf] has the Don't Fragment bit set.
pub fn is_df_set(buf: &[u8]) -> Result<bool, Fail> {
    let (_, fcs_offset): (Ethernet2Header, usize) = check_frame(buf)?;
    let header: Ipv4Header<&[u8]> = Ipv4Header::new_checked(&buf[ETHERNET2_HEADER_SIZE..fcs_offset])?;
    Ok(header.dont_fragment())
}

/// Checks that [buf] is an untagged IPv4 frame large enough for a minimal header. Returns its ethernet header and
/// the FCS offset.
fn check_frame(buf: &[u8]) -> Result<(Ethernet2Header, usize), Fail> {
    if buf.len() < SOFTGRE_MIN_FRAME_SIZE {
        return Err(Fail::new(EBADMSG, "frame too small"));
    }
    // Tagged frames carry 0x8100 here and are rejected.
    let eth_hdr: Ethernet2Header = Ethernet2Header::parse(buf)?;
    if eth_hdr.ether_type() != EtherType2::Ipv4 {
        return Err(Fail::new(ENOTSUP, "not an ipv4 frame"));
    }
    Ok((eth_hdr, buf.len() - ETHERNET2_FCS_SIZE))
}

//======================================================================================================================
// Unit Tests
//======================================================================================================================
