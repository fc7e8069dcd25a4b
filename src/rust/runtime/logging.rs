// Copyright (c) Microsoft Corporation.
// Licensed under the MIT license.

//==============================================================================
// Imports
//==============================================================================

use ::flexi_logger::{
    Logger,
    LoggerHandle,
};
use ::std::sync::{
    Mutex,
    Once,
};

//==============================================================================
// Constants
//==============================================================================

/// Log specification used when `RUST_LOG` is not set.
const DEFAULT_LOG_SPEC: &str = "info";

//==============================================================================
// Static Variables
//==============================================================================

/// Guardian to the logging initialize function.
static INIT_LOG: Once = Once::new();

/// Handle to the running logger. Dropping it shuts the logger down.
static LOGGER: Mutex<Option<LoggerHandle>> = Mutex::new(None);

//==============================================================================
// Standalone Functions
//==============================================================================

/// Initializes logging features.
pub fn initialize() {
    INIT_LOG.call_once(|| {
        // install global logger configured based on RUST_LOG env var.
        match Logger::try_with_env_or_str(DEFAULT_LOG_SPEC).and_then(|logger| logger.start()) {
            Ok(handle) => match LOGGER.lock() {
                Ok(mut guard) => *guard = Some(handle),
                Err(poisoned) => *poisoned.into_inner() = Some(handle),
            },
            Err(e) => eprintln!("failed to initialize logger (error={:?})", e),
        }
    });
}
