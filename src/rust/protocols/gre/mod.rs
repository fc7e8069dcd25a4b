// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

mod header;

//======================================================================================================================
// Exports
//======================================================================================================================

pub use self::header::{
    GreHeader,
    GRE_FLAG_CHECKSUM,
    GRE_FLAG_KEY,
    GRE_FLAG_ROUTING,
    GRE_FLAG_SEQUENCE,
    GRE_FLAG_STRICT_SOURCE_ROUTE,
    GRE_HEADER_SIZE,
    GRE_VERSION_MASK,
};
