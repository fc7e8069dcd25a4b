// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//======================================================================================================================
// Imports
//======================================================================================================================

use crate::{
    config::Config,
    softgre::{
        self,
        SoftGreEndpoint,
    },
};

//======================================================================================================================
// Structures
//======================================================================================================================

/// Per access point state.
pub struct AccessPoint {
    /// Name of the access point (usually its interface name).
    name: String,
    /// SoftGRE peer. `None` if tunneling is disabled.
    softgre: Option<SoftGreEndpoint>,
}

//======================================================================================================================
// Associated Functions
//======================================================================================================================

impl AccessPoint {
    /// Brings up an access point. A SoftGRE failure only disables tunneling.
    pub fn new(name: &str, config: &Config) -> Self {
        let softgre: Option<SoftGreEndpoint> = match softgre::init(config) {
            Ok(endpoint) => endpoint,
            Err(e) => {
                warn!("new(): running {} without SoftGRE (error={:?})", name, e);
                None
            },
        };

        Self {
            name: name.to_string(),
            softgre,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the SoftGRE peer of the target access point, if tunneling is enabled.
    pub fn softgre_endpoint(&self) -> Option<&SoftGreEndpoint> {
        self.softgre.as_ref()
    }

    /// Tears down the target access point.
    pub fn shutdown(&mut self) {
        debug!("shutdown(): {}", self.name);
        softgre::deinit(&mut self.softgre);
    }
}

//======================================================================================================================
// Unit Tests
//======================================================================================================================

#[cfg(test)]
mod test {
    use super::AccessPoint;
    use crate::config::Config;
    use ::anyhow::Result;
    use ::std::{
        net::Ipv4Addr,
        str::FromStr,
    };

    /// Brings up an access point with tunneling and tears it down twice.
    #[test]
    fn test_lifecycle() -> Result<()> {
        let config: Config = Config::from_str("softgre:\n  ip: 10.0.0.1\n")?;
        let mut ap: AccessPoint = AccessPoint::new("wlan0", &config);
        ensure_eq!(ap.name(), "wlan0");
        match ap.softgre_endpoint() {
            Some(endpoint) => ensure_eq!(endpoint.addr(), Ipv4Addr::new(10, 0, 0, 1)),
            None => anyhow::bail!("tunneling should be enabled"),
        }

        ap.shutdown();
        ensure_eq!(ap.softgre_endpoint().is_none(), true);
        ap.shutdown();
        ensure_eq!(ap.softgre_endpoint().is_none(), true);
        Ok(())
    }

    /// A bad endpoint address disables tunneling, not the access point.
    #[test]
    fn test_invalid_endpoint_degrades() -> Result<()> {
        let config: Config = Config::from_str("softgre:\n  ip: 10.0.0.300\n")?;
        let mut ap: AccessPoint = AccessPoint::new("wlan1", &config);
        ensure_eq!(ap.softgre_endpoint().is_none(), true);
        ap.shutdown();
        Ok(())
    }
}
