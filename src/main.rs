// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod api;
mod cell;
mod cli;
mod config;
mod error;
mod parts;
mod report;
mod resolver;
mod runner;
mod status;
mod types;
mod ui;
mod warranty;

use api::HttpTransport;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate before prompting
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    let serial = match config::resolve_serial(&args) {
        Ok(serial) => serial,
        Err(e) => {
            ui::print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let config = match config::build_config(&args, &serial) {
        Ok(c) => c,
        Err(e) => {
            ui::print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let transport = HttpTransport::new();
    match runner::run(&config, &transport, config.clock.today()) {
        Ok(path) => ui::status(&format!("Data saved to {}", path.display())),
        Err(e) => {
            ui::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
