// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//======================================================================================================================
// Exports
//======================================================================================================================

pub mod ethernet2;
pub use self::ethernet2::{
    header::{
        Ethernet2Header,
        ETHERNET2_FCS_SIZE,
        ETHERNET2_HEADER_SIZE,
    },
    protocol::EtherType2,
};
