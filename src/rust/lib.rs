// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

#![cfg_attr(feature = "strict", deny(warnings))]
#![deny(clippy::all)]

#[macro_use]
extern crate log;

//======================================================================================================================
// Macros
//======================================================================================================================

/// Bails out of an [anyhow::Result] returning function if the two expressions are not equal.
#[macro_export]
macro_rules! ensure_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if *left_val != *right_val {
                    anyhow::bail!(
                        "ensure failed: `(left == right)` left: `{:?}`, right: `{:?}`",
                        left_val,
                        right_val
                    )
                }
            },
        }
    }};
}

/// Bails out of an [anyhow::Result] returning function if the two expressions are equal.
#[macro_export]
macro_rules! ensure_neq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if *left_val == *right_val {
                    anyhow::bail!(
                        "ensure failed: `(left != right)` left: `{:?}`, right: `{:?}`",
                        left_val,
                        right_val
                    )
                }
            },
        }
    }};
}

//======================================================================================================================
// Exports
//======================================================================================================================

pub mod ap;
pub mod config;
pub mod protocols;
pub mod runtime;
pub mod softgre;

pub use crate::{
    ap::AccessPoint,
    config::Config,
    runtime::{
        fail::Fail,
        network::types::MacAddress,
    },
    softgre::{
        is_df_set,
        modify_df_bit,
        SoftGreEndpoint,
    },
};
