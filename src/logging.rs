/*---------------------------------------------------------------------------------------------
 *  Copyright (c) lumaprint contributors. All rights reserved.
 *  Licensed under the Apache License, Version 2.0. See LICENSE.txt in the project root for license information.
 *--------------------------------------------------------------------------------------------*/

//! Process-wide logger setup for the CLI binary. The library crate itself
//! only ever calls `log`'s macros — it never configures a logger, since a
//! library must not decide how its host process logs.

use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Initializes the global logger once. `verbosity` counts repeated `-v`
/// flags: 0 = warn, 1 = info, 2+ = debug.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    if SimpleLogger::new().with_level(level).init().is_err() {
        // a logger is already installed (e.g. in tests); nothing to do.
    }
}
