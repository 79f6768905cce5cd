use std::{env, fmt};

use log::LevelFilter;

use crate::error::{Error, Result};

/// Runtime options for tour construction and the CLI surfaces around it.
#[derive(Clone, Debug)]
pub struct SolverOptions {
    /// Lattice boundaries per axis; `n` boundaries make `(n-1)^2` cells.
    pub resolution: usize,
    /// Start (and implied return) x coordinate.
    pub start_x: f64,
    /// Start (and implied return) y coordinate.
    pub start_y: f64,
    /// Score candidates by raw distance only, ignoring importance weights.
    pub greedy: bool,
    /// Generate this many random points instead of reading input. 0 reads input.
    pub random_points: usize,
    /// RNG seed for random point generation.
    pub seed: u64,
    /// Exclusive upper bound for random coordinates.
    pub coord_max: f64,
    /// Optional input file path for points. Empty means stdin.
    pub input: String,
    /// Optional output file path for the ordered tour. Empty means stdout.
    pub output: String,
    /// Structured logging level.
    pub log_level: LogLevel,
    /// Logging output format.
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::Off => "off",
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            "off" => Ok(Self::Off),
            _ => Err(Error::invalid_input(format!("Invalid log level: {value}"))),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            _ => Err(Error::invalid_input(format!("Invalid log format: {value}"))),
        }
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            resolution: 5,
            start_x: 0.0,
            start_y: 0.0,
            greedy: false,
            random_points: 0,
            seed: 999,
            coord_max: 19_900.0,
            input: String::new(),
            output: String::new(),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };
            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = split_arg(raw_name, &mut args);

            match name.as_str() {
                "resolution" => {
                    options.resolution = parse_value::<usize>(&name, value)?;
                }
                "start" => {
                    let raw = require_value(&name, value)?;
                    (options.start_x, options.start_y) = parse_coordinate(&name, &raw)?;
                }
                "greedy" => {
                    options.greedy = match value {
                        Some(v) => parse_bool(&name, &v)?,
                        None => true,
                    };
                }
                "no-greedy" => {
                    reject_value(&name, value)?;
                    options.greedy = false;
                }
                "random" => {
                    options.random_points = parse_value::<usize>(&name, value)?;
                }
                "seed" => {
                    options.seed = parse_value::<u64>(&name, value)?;
                }
                "coord-max" => {
                    options.coord_max = parse_value::<f64>(&name, value)?;
                }
                "input" => {
                    options.input = require_value(&name, value)?;
                }
                "output" => {
                    options.output = require_value(&name, value)?;
                }
                "log-level" => {
                    options.log_level = LogLevel::parse(&require_value(&name, value)?)?;
                }
                "log-format" => {
                    options.log_format = LogFormat::parse(&require_value(&name, value)?)?;
                }
                "log-timestamp" => {
                    options.log_timestamp = match value {
                        Some(v) => parse_bool(&name, &v)?,
                        None => true,
                    };
                }
                "no-log-timestamp" => {
                    reject_value(&name, value)?;
                    options.log_timestamp = false;
                }
                _ => {
                    return Err(Error::invalid_input(format!(
                        "Unknown option: --{name}\n\n{}",
                        Self::usage()
                    )));
                }
            }
        }

        if options.resolution < 2 {
            return Err(Error::invalid_input("--resolution must be at least 2"));
        }
        if options.coord_max <= 0.0 {
            return Err(Error::invalid_input("--coord-max must be positive"));
        }

        Ok(options)
    }

    pub fn usage() -> &'static str {
        concat!(
            "Usage:\n",
            "  tsp-grid [options] < points.txt\n\n",
            "Options:\n",
            "  --resolution <usize>     Lattice boundaries per axis (default 5, min 2)\n",
            "  --start <x,y>            Start coordinate (default 0,0)\n",
            "  --greedy[=<bool>]        Raw-distance scoring\n",
            "  --no-greedy              Importance-weighted scoring (default)\n",
            "  --random <usize>         Generate n random points instead of reading input\n",
            "  --seed <u64>             RNG seed for --random (default 999)\n",
            "  --coord-max <f64>        Upper bound for random coordinates (default 19900)\n",
            "  --input <path>           Read points from a file instead of stdin\n",
            "  --output <path>          Write the tour to a file instead of stdout\n",
            "  --log-level <level>      error|warn|info|debug|trace|off (default warn)\n",
            "  --log-format <fmt>       compact|pretty (default compact)\n",
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  tsp-grid --resolution 8 --start 0,0 < points.txt\n",
            "  tsp-grid --random 100 --seed 42 --greedy\n",
        )
    }
}

impl fmt::Display for SolverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "resolution={} start={},{} greedy={} random={} seed={} coord_max={} \
             input={} output={} log_level={} log_format={} log_timestamp={}",
            self.resolution,
            self.start_x,
            self.start_y,
            self.greedy,
            self.random_points,
            self.seed,
            self.coord_max,
            display_or_dash(&self.input),
            display_or_dash(&self.output),
            self.log_level.as_str(),
            self.log_format.as_str(),
            self.log_timestamp,
        )
    }
}

fn display_or_dash(path: &str) -> &str {
    if path.is_empty() { "-" } else { path }
}

fn parse_value<T>(name: &str, value: Option<String>) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let raw = require_value(name, value)?;
    raw.parse::<T>()
        .map_err(|e| Error::invalid_input(format!("Invalid value for --{name}: {raw} ({e})")))
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}

fn parse_coordinate(name: &str, raw: &str) -> Result<(f64, f64)> {
    let Some((x_raw, y_raw)) = raw.split_once(',') else {
        return Err(Error::invalid_input(format!(
            "Invalid value for --{name}: {raw} (expected x,y)"
        )));
    };
    let parse = |field: &str| {
        field.trim().parse::<f64>().map_err(|_| {
            Error::invalid_input(format!("Invalid value for --{name}: {raw} (expected x,y)"))
        })
    };
    Ok((parse(x_raw)?, parse(y_raw)?))
}

fn require_value(name: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| Error::invalid_input(format!("Missing value for --{name}")))
}

fn reject_value(name: &str, value: Option<String>) -> Result<()> {
    if value.is_some() {
        return Err(Error::invalid_input(format!(
            "Flag --{name} does not take a value"
        )));
    }
    Ok(())
}

fn split_arg(
    raw_name: &str,
    args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
) -> (String, Option<String>) {
    if let Some((k, v)) = raw_name.split_once('=') {
        return (k.to_string(), Some(v.to_string()));
    }

    let value = match args.peek() {
        Some(next) if !next.starts_with("--") => args.next(),
        _ => None,
    };

    (raw_name.to_string(), value)
}
