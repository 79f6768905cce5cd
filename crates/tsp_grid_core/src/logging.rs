use std::io::{self, Write};

use env_logger::{fmt::Formatter, Builder, Target};
use log::{Level, Record};

use crate::io::options::{LogFormat, SolverOptions};

/// Installs the process-wide logger. Log lines go to stderr so the tour
/// itself can stream cleanly on stdout.
pub fn init_logger(options: &SolverOptions) -> io::Result<()> {
    let format = options.log_format;
    let timestamp = options.log_timestamp;

    Builder::new()
        .filter_level(options.log_level.to_filter())
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(move |buf, record| write_record(buf, record, format, timestamp))
        .try_init()
        .map_err(io::Error::other)
}

fn write_record(
    buf: &mut Formatter,
    record: &Record,
    format: LogFormat,
    timestamp: bool,
) -> io::Result<()> {
    if timestamp {
        write!(buf, "{} ", buf.timestamp_millis())?;
    }

    match format {
        LogFormat::Compact => {
            writeln!(buf, "{} {}", level_tag(record.level()), record.args())
        }
        LogFormat::Pretty => {
            writeln!(
                buf,
                "{} [{}] {}",
                level_tag(record.level()),
                record.target(),
                record.args()
            )
        }
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

#[cfg(test)]
mod tests {
    use super::level_tag;
    use log::Level;

    #[test]
    fn level_tags_are_uppercase_names() {
        assert_eq!(level_tag(Level::Error), "ERROR");
        assert_eq!(level_tag(Level::Warn), "WARN");
        assert_eq!(level_tag(Level::Trace), "TRACE");
    }
}
