use ansi_term::Colour;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Colored stderr logger enabled by `-v` flags.
struct Logger;

static LOGGER: Logger = Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let colour = match record.level() {
            Level::Error => Colour::Red,
            Level::Warn => Colour::Yellow,
            Level::Info => Colour::Green,
            Level::Debug => Colour::Cyan,
            Level::Trace => Colour::Purple,
        };
        eprintln!(
            "{} {}",
            colour.paint(format!("[{:5}]", record.level())),
            record.args()
        );
    }

    fn flush(&self) {}
}

pub fn init(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Off,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
