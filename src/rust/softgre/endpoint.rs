// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//======================================================================================================================
// Imports
//======================================================================================================================

use crate::{
    config::Config,
    runtime::fail::Fail,
};
use ::libc::EINVAL;
use ::std::{
    net::Ipv4Addr,
    str::FromStr,
};

//======================================================================================================================
// Structures
//======================================================================================================================

/// GRE peer of one access point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoftGreEndpoint {
    /// Endpoint address as configured.
    ip: String,
    /// Parsed endpoint address.
    addr: Ipv4Addr,
}

//======================================================================================================================
// Associated Functions
//======================================================================================================================

impl SoftGreEndpoint {
    /// Creates an endpoint from its dotted-quad address.
    pub fn new(ip: &str) -> Result<Self, Fail> {
        let mut owned_ip: String = String::new();
        if let Err(e) = owned_ip.try_reserve_exact(ip.len()) {
            let fail: Fail = e.into();
            error!("new(): failed to allocate endpoint address: {}", fail);
            return Err(fail);
        }
        owned_ip.push_str(ip);

        let addr: Ipv4Addr = match Ipv4Addr::from_str(&owned_ip) {
            Ok(addr) => addr,
            Err(_) => {
                let cause: String = format!("invalid endpoint IP address (ip={:?})", owned_ip);
                error!("new(): {}", cause);
                return Err(Fail::new(EINVAL, &cause));
            },
        };

        Ok(Self { ip: owned_ip, addr })
    }

    /// Returns the endpoint address as it was configured.
    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }
}

//======================================================================================================================
// Standalone Functions
//======================================================================================================================

/// Creates the SoftGRE endpoint described by [config]. Returns `None` if no endpoint is configured, in which case
/// tunneling is disabled.
pub fn init(config: &Config) -> Result<Option<SoftGreEndpoint>, Fail> {
    let ip: String = match config.softgre_ip()? {
        Some(ip) if !ip.is_empty() => ip,
        _ => {
            debug!("init(): no endpoint configured");
            return Ok(None);
        },
    };

    info!("init(): initializing with endpoint {}", ip);
    let endpoint: SoftGreEndpoint = SoftGreEndpoint::new(&ip)?;
    info!("init(): initialized successfully for endpoint {}", endpoint.addr());

    Ok(Some(endpoint))
}

/// Releases the SoftGRE endpoint held in [endpoint], if any. Calling this again is a no-op.
pub fn deinit(endpoint: &mut Option<SoftGreEndpoint>) {
    if let Some(endpoint) = endpoint.take() {
        debug!("deinit(): releasing endpoint {}", endpoint.ip());
    }
}

//======================================================================================================================
// Unit Tests
//======================================================================================================================
