// SPDX-License-Identifier: MPL-2.0
use hvac_notify::app::{self, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        lang: read_option(&mut args, "--lang"),
        config_path: read_option(&mut args, "--config"),
    };

    let unused = args.finish();
    if !unused.is_empty() {
        eprintln!("Ignoring unexpected arguments: {unused:?}");
    }

    app::run(flags)
}

fn read_option(args: &mut pico_args::Arguments, key: &'static str) -> Option<String> {
    args.opt_value_from_str(key).unwrap_or_else(|err| {
        eprintln!("Invalid value for {key}: {err}");
        None
    })
}
