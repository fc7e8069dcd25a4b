// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

mod dfbit;
mod endpoint;

//======================================================================================================================
// Exports
//======================================================================================================================

pub use self::{
    dfbit::{
        is_df_set,
        modify_df_bit,
        SOFTGRE_MIN_FRAME_SIZE,
    },
    endpoint::{
        deinit,
        init,
        SoftGreEndpoint,
    },
};
