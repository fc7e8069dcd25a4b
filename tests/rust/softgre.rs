// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//==============================================================================
// Imports
//==============================================================================

use ::anyhow::Result;
use ::libc::{
    EBADMSG,
    ENOTSUP,
};
use ::softgre::{
    ensure_eq,
    ensure_neq,
    is_df_set,
    modify_df_bit,
    protocols::{
        gre::{
            GreHeader,
            GRE_HEADER_SIZE,
        },
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
    AccessPoint,
    Config,
    MacAddress,
};
use ::std::{
    net::Ipv4Addr,
    str::FromStr,
};

//==============================================================================
// Constants
//==============================================================================

const ALICE_MAC: MacAddress = MacAddress::new([0x12, 0x23, 0x45, 0x67, 0x89, 0xab]);
const BOB_MAC: MacAddress = MacAddress::new([0xab, 0x89, 0x67, 0x45, 0x23, 0x12]);

//==============================================================================
// Helpers
//==============================================================================

/// Builds a well-formed frame carrying a minimal IPv4 header with [flags] and [payload_len] bytes of payload.
fn build_frame(ether_type: EtherType2, flags: u16, payload_len: usize) -> Result<Vec<u8>> {
    let ipv4_len: usize = IPV4_HEADER_MIN_SIZE + payload_len;
    let mut frame: Vec<u8> = vec![0u8; ETHERNET2_HEADER_SIZE + ipv4_len + ETHERNET2_FCS_SIZE];
    Ethernet2Header::new(BOB_MAC, ALICE_MAC, ether_type).serialize(&mut frame)?;

    let ip: &mut [u8] = &mut frame[ETHERNET2_HEADER_SIZE..ETHERNET2_HEADER_SIZE + ipv4_len];
    ip[0] = 0x45;
    ip[2..4].copy_from_slice(&(ipv4_len as u16).to_be_bytes());
    ip[4..6].copy_from_slice(&0x1c46u16.to_be_bytes());
    ip[6..8].copy_from_slice(&flags.to_be_bytes());
    ip[8] = 64;
    ip[9] = 47;
    ip[12..16].copy_from_slice(&Ipv4Addr::new(192, 168, 1, 2).octets());
    ip[16..20].copy_from_slice(&Ipv4Addr::new(10, 0, 0, 1).octets());
    for (i, b) in ip[IPV4_HEADER_MIN_SIZE..].iter_mut().enumerate() {
        *b = i as u8;
    }
    Ipv4Header::new_checked(&mut ip[..])?.fill_checksum();

    Ethernet2Header::update_fcs(&mut frame)?;
    Ok(frame)
}

/// Checks that the IPv4 checksum and the FCS of [frame] are both valid.
fn check_integrity(frame: &[u8]) -> Result<()> {
    let ip: &[u8] = &frame[ETHERNET2_HEADER_SIZE..frame.len() - ETHERNET2_FCS_SIZE];
    ensure_eq!(Ipv4Header::new_checked(ip)?.verify_checksum(), true);
    ensure_eq!(Ethernet2Header::verify_fcs(frame), true);
    Ok(())
}

//==============================================================================
// Tests
//==============================================================================

/// Clears DF on a frame headed into the tunnel, then encapsulates and decapsulates it.
#[test]
fn test_clear_df_and_encapsulate() -> Result<()> {
    let config: Config = Config::from_str("softgre:\n  ip: \"10.0.0.1\"\n")?;
    let mut ap: AccessPoint = AccessPoint::new("wlan0", &config);
    match ap.softgre_endpoint() {
        Some(endpoint) => ensure_eq!(endpoint.addr(), Ipv4Addr::new(10, 0, 0, 1)),
        None => anyhow::bail!("tunneling should be enabled"),
    }

    let mut frame: Vec<u8> = build_frame(EtherType2::Ipv4, IPV4_FLAG_DF, 64)?;
    let original: Vec<u8> = frame.clone();
    ensure_eq!(is_df_set(&frame)?, true);

    modify_df_bit(&mut frame, false)?;
    ensure_eq!(is_df_set(&frame)?, false);
    ensure_neq!(frame, original);
    check_integrity(&frame)?;

    // Only the flags, the IPv4 checksum and the FCS may change.
    let fcs_offset: usize = frame.len() - ETHERNET2_FCS_SIZE;
    for (i, (new, old)) in frame.iter().zip(original.iter()).enumerate() {
        let ip_offset: usize = i.wrapping_sub(ETHERNET2_HEADER_SIZE);
        let mutable: bool = matches!(ip_offset, 6 | 10 | 11) || i >= fcs_offset;
        if !mutable {
            ensure_eq!((i, *new), (i, *old));
        }
    }

    let mut packet: Vec<u8> = vec![0u8; GRE_HEADER_SIZE];
    GreHeader::transparent_ethernet_bridging().serialize(&mut packet)?;
    packet.extend_from_slice(&frame);

    let gre: GreHeader = GreHeader::parse(&packet)?;
    ensure_eq!(gre.ether_type()?, EtherType2::TransparentEthernetBridging);
    ensure_eq!(gre.version(), 0);
    ensure_eq!(&packet[GRE_HEADER_SIZE..], &frame[..]);

    ap.shutdown();
    ensure_eq!(ap.softgre_endpoint().is_none(), true);
    Ok(())
}

/// Setting and then clearing DF restores the original frame.
#[test]
fn test_set_then_clear_restores_frame() -> Result<()> {
    let original: Vec<u8> = build_frame(EtherType2::Ipv4, 0, 3)?;
    let mut frame: Vec<u8> = original.clone();

    modify_df_bit(&mut frame, true)?;
    ensure_eq!(is_df_set(&frame)?, true);
    check_integrity(&frame)?;

    modify_df_bit(&mut frame, false)?;
    ensure_eq!(frame, original);
    Ok(())
}

/// Frames that cannot be handled are passed through untouched.
#[test]
fn test_passthrough() -> Result<()> {
    let mut arp: Vec<u8> = build_frame(EtherType2::Arp, IPV4_FLAG_DF, 8)?;
    let original: Vec<u8> = arp.clone();
    match modify_df_bit(&mut arp, false) {
        Ok(()) => anyhow::bail!("modifying a non-IPv4 frame should fail"),
        Err(e) => ensure_eq!(e.errno, ENOTSUP),
    }
    ensure_eq!(arp, original);

    let mut runt: Vec<u8> = build_frame(EtherType2::Ipv4, IPV4_FLAG_DF, 0)?;
    runt.truncate(runt.len() - 1);
    let original: Vec<u8> = runt.clone();
    match modify_df_bit(&mut runt, false) {
        Ok(()) => anyhow::bail!("modifying a runt frame should fail"),
        Err(e) => ensure_eq!(e.errno, EBADMSG),
    }
    ensure_eq!(runt, original);
    Ok(())
}

/// An access point without a configured endpoint runs without tunneling.
#[test]
fn test_access_point_without_endpoint() -> Result<()> {
    let config: Config = Config::from_str("ssid: guest\n")?;
    let mut ap: AccessPoint = AccessPoint::new("wlan1", &config);
    ensure_eq!(ap.name(), "wlan1");
    ensure_eq!(ap.softgre_endpoint().is_none(), true);
    ap.shutdown();
    ap.shutdown();
    Ok(())
}
