use iced_knob::app::{self, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        heading: args.opt_value_from_str("--heading").unwrap_or(None),
        config_path: args.opt_value_from_str("--config").unwrap_or(None),
    };

    app::run(flags)
}
