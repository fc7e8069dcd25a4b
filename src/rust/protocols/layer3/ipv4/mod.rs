// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

mod header;


//======================================================================================================================
// Exports
//======================================================================================================================

pub use self::header::{
    compute_checksum,
    Ipv4Header,
    IPV4_FLAG_DF,
    IPV4_FLAG_MF,
    IPV4_FRAGMENT_OFFSET_MASK,
    IPV4_HEADER_MIN_SIZE,
};
