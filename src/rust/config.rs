// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//======================================================================================================================
// Imports
//======================================================================================================================

use crate::runtime::fail::Fail;
use ::std::{
    fs::File,
    io::Read,
    ops::Index,
    str::FromStr,
};
use ::yaml_rust::{
    Yaml,
    YamlLoader,
};

//======================================================================================================================
// Constants
//======================================================================================================================

// SoftGRE options of one access point.
mod softgre_config {
    pub const SECTION_NAME: &str = "softgre";
    // GRE tunnel endpoint address.
    pub const IP: &str = "ip";
}

//======================================================================================================================
// Structures
//======================================================================================================================

/// Access point configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Yaml);

//======================================================================================================================
// Associated Functions
//======================================================================================================================

/// Common associated functions for the configuration object.
impl Config {
    /// Reads a configuration file into a [Config] object.
    pub fn new(config_path: &str) -> Result<Self, Fail> {
        let mut config_s: String = String::new();
        File::open(config_path)?.read_to_string(&mut config_s)?;
        Self::from_str(&config_s)
    }

    /// SoftGRE config: Reads the tunnel endpoint address of this access point. Returns `None` if no endpoint is
    /// configured.
    pub fn softgre_ip(&self) -> Result<Option<String>, Fail> {
        let section: &Yaml = match Self::get_subsection(&self.0, softgre_config::SECTION_NAME)? {
            Some(section) => section,
            None => return Ok(None),
        };
        match Self::get_option(section, softgre_config::IP) {
            None | Some(Yaml::Null) => Ok(None),
            Some(_) => {
                Self::get_typed_str_option(section, softgre_config::IP, |val: &str| Some(val.to_string())).map(Some)
            },
        }
    }

    //======================================================================================================================
    // Static Functions
    //======================================================================================================================

    /// Index `yaml` to find the subsection at `index`. A missing subsection is not an error; one that is not a hash
    /// is.
    fn get_subsection<'a>(yaml: &'a Yaml, index: &str) -> Result<Option<&'a Yaml>, Fail> {
        let section: &'a Yaml = match Self::get_option(yaml, index) {
            Some(section) => section,
            None => return Ok(None),
        };
        match section {
            Yaml::Hash(_) => Ok(Some(section)),
            // An empty section reads as null.
            Yaml::Null => Ok(None),
            _ => {
                let message: String = format!("parameter \"{}\" has unexpected type", index);
                error!("get_subsection(): {}", message);
                Err(Fail::new(libc::EINVAL, message.as_str()))
            },
        }
    }

    /// Index `yaml` to find the value at `index`.
    fn get_option<'a>(yaml: &'a Yaml, index: &str) -> Option<&'a Yaml> {
        match yaml.index(index) {
            Yaml::BadValue => None,
            value => Some(value),
        }
    }

    /// Index `yaml` to find value at `index`, validating it as a string.
    fn get_typed_str_option<T, Fn>(yaml: &Yaml, index: &str, parser: Fn) -> Result<T, Fail>
    where
        Fn: FnOnce(&str) -> Option<T>,
    {
        if let Some(value) = Self::get_option(yaml, index).and_then(Yaml::as_str) {
            if let Some(value) = parser(value) {
                return Ok(value);
            }
        }
        let message: String = format!("parameter {} has unexpected type", index);
        error!("get_typed_str_option(): {}", message);
        Err(Fail::new(libc::EINVAL, message.as_str()))
    }
}

//======================================================================================================================
// Trait Implementations
//======================================================================================================================

impl FromStr for Config {
    type Err = Fail;

    /// Parses a configuration held in a string. The string must hold exactly one YAML document.
    fn from_str(config_s: &str) -> Result<Self, Fail> {
        let config: Vec<Yaml> = match YamlLoader::load_from_str(config_s) {
            Ok(config) => config,
            Err(e) => {
                let fail: Fail = e.into();
                error!("from_str(): {}", fail);
                return Err(fail);
            },
        };
        match &config[..] {
            [c] => Ok(Self(c.clone())),
            _ => Err(Fail::new(libc::EINVAL, "Wrong number of config objects")),
        }
    }
}

//======================================================================================================================
// Unit Tests
//======================================================================================================================
