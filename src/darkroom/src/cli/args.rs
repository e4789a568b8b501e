use clap::{ArgAction, Args};

/// Configures the verbosity of the builtin logger.
#[derive(Clone, Copy, Debug, Args)]
pub struct Verbosity {
    /// Configures the log verbosity of darkroom.
    ///
    /// `-v` is Debug, `-vv` is Trace.
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Silences all log output but errors.
    #[clap(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Verbosity {
    /// Configures the global logger based on the settings.
    pub fn setup(self) {
        let level = self.log_level();
        simple_logger::init_with_level(level).unwrap();
    }

    fn log_level(self) -> log::Level {
        if self.quiet {
            return log::Level::Error;
        }

        match self.verbose {
            0 => log::Level::Info,
            1 => log::Level::Debug,
            _ => log::Level::Trace,
        }
    }
}
