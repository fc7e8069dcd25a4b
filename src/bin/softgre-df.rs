// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

#![cfg_attr(feature = "strict", deny(warnings))]
#![deny(clippy::all)]

#[macro_use]
extern crate log;

//==============================================================================
// Imports
//==============================================================================

use ::anyhow::Result;
use ::clap::{
    Arg,
    ArgAction,
    ArgMatches,
    Command,
};
use ::softgre::{
    is_df_set,
    modify_df_bit,
    runtime::logging,
};

//==============================================================================
// Program Arguments
//==============================================================================

/// Program Arguments
#[derive(Debug)]
struct ProgramArguments {
    /// Ethernet frame, FCS included.
    frame: Vec<u8>,
    /// Requested DF state. `None` when only querying.
    set_df: Option<bool>,
}

/// Associate functions for Program Arguments
impl ProgramArguments {
    /// Parses the program arguments from the command line interface.
    pub fn new(app_name: &'static str, app_author: &'static str, app_about: &'static str) -> Result<Self> {
        let matches: ArgMatches = Command::new(app_name)
            .author(app_author)
            .about(app_about)
            .arg(
                Arg::new("frame")
                    .long("frame")
                    .value_parser(clap::value_parser!(String))
                    .required(true)
                    .value_name("HEX")
                    .help("Sets the ethernet frame, FCS included, as a hex string"),
            )
            .arg(
                Arg::new("df")
                    .long("df")
                    .value_parser(["set", "clear"])
                    .required_unless_present("query")
                    .value_name("set|clear")
                    .help("Sets the requested state of the DF bit"),
            )
            .arg(
                Arg::new("query")
                    .long("query")
                    .action(ArgAction::SetTrue)
                    .conflicts_with("df")
                    .help("Prints whether the DF bit is set without modifying the frame"),
            )
            .get_matches();

        // Frame.
        let frame: Vec<u8> = match matches.get_one::<String>("frame") {
            Some(frame) => Self::parse_frame(frame)?,
            None => anyhow::bail!("missing frame"),
        };

        // DF state.
        let set_df: Option<bool> = if matches.get_flag("query") {
            None
        } else {
            match matches.get_one::<String>("df").map(String::as_str) {
                Some("set") => Some(true),
                Some("clear") => Some(false),
                other => anyhow::bail!("invalid DF state: {:?}", other),
            }
        };

        Ok(Self { frame, set_df })
    }

    /// Decodes a hex string, ignoring whitespace.
    fn parse_frame(frame: &str) -> Result<Vec<u8>> {
        let digits: String = frame.chars().filter(|c| !c.is_whitespace()).collect();
        Ok(hex::decode(digits)?)
    }
}

//==============================================================================
// Main
//==============================================================================

fn main() -> Result<()> {
    logging::initialize();

    let args: ProgramArguments = ProgramArguments::new(
        "softgre-df",
        "Microsoft Corporation",
        "Sets or clears the IPv4 Don't Fragment bit of an ethernet frame.",
    )?;
    let mut frame: Vec<u8> = args.frame;
    debug!("main(): frame_len={}, set_df={:?}", frame.len(), args.set_df);

    match args.set_df {
        None => match is_df_set(&frame) {
            Ok(df) => println!("{}", df),
            Err(e) => anyhow::bail!("cannot query frame: {:?}", e),
        },
        Some(set_df) => {
            if let Err(e) = modify_df_bit(&mut frame, set_df) {
                anyhow::bail!("frame left unmodified: {:?}", e);
            }
            println!("{}", hex::encode(&frame));
        },
    }

    Ok(())
}
