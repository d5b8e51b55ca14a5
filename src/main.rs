//! Terminal front-end for the simulation engine.  Loads every configuration file given on the command line and
//! steps all of them together, printing each grid after every tick.

use std::env;
use std::process;

use log::error;

use cellsim::prelude::*;

const DEFAULT_TPS: f32 = 4.0;
const USAGE: &str = "usage: cellsim [--ticks N] [--skip N] [--tps F] [--quiet] <config.json>...";

#[derive(Debug, PartialEq)]
struct Args {
    /// Number of ticks to run; runs forever if unset.
    ticks: Option<usize>,
    skip: usize,
    tps: f32,
    quiet: bool,
    paths: Vec<String>,
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    value.parse().map_err(|_| format!("invalid value for {}: {}", flag, value))
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Args, String> {
    let mut parsed = Args {
        ticks: None,
        skip: 0,
        tps: DEFAULT_TPS,
        quiet: false,
        paths: Vec::new(),
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ticks" => parsed.ticks = Some(parse_value(&arg, args.next())?),
            "--skip" => parsed.skip = parse_value(&arg, args.next())?,
            "--tps" => parsed.tps = parse_value(&arg, args.next())?,
            "--quiet" | "-q" => parsed.quiet = true,
            flag if flag.starts_with('-') => return Err(format!("unknown flag {}", flag)),
            _ => parsed.paths.push(arg),
        }
    }

    if parsed.paths.is_empty() {
        return Err("no configuration files given".into());
    }
    if !(parsed.tps > 0.0) {
        return Err(format!("--tps must be positive, got {}", parsed.tps));
    }

    Ok(parsed)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}\n{}", msg, USAGE);
            process::exit(2);
        }
    };

    let mut driver = Driver::new().with_middleware(Box::new(StatsLogger));
    if !args.quiet {
        driver.add_middleware(Box::new(UniverseDisplayer));
    }
    driver.add_middleware(Box::new(MinDelay::from_tps(args.tps)));

    // Failures are logged by the driver; the remaining files still load.
    for path in &args.paths {
        let _ = driver.load_file(path);
    }

    if driver.is_empty() {
        error!("No simulations could be loaded");
        process::exit(1);
    }

    if args.skip > 0 {
        driver.skip_ahead(args.skip);
    }
    driver.run(args.ticks);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_flags_and_paths() {
        let parsed = args(&["--ticks", "10", "a.json", "--skip", "3", "-q", "b.json", "--tps", "30"]).unwrap();
        assert_eq!(
            parsed,
            Args {
                ticks: Some(10),
                skip: 3,
                tps: 30.0,
                quiet: true,
                paths: vec!["a.json".into(), "b.json".into()],
            }
        );
    }

    #[test]
    fn rejects_bad_input() {
        assert!(args(&[]).is_err());
        assert!(args(&["--ticks"]).is_err());
        assert!(args(&["--ticks", "many", "a.json"]).is_err());
        assert!(args(&["--tps", "0", "a.json"]).is_err());
        assert!(args(&["--verbose", "a.json"]).is_err());
    }
}
