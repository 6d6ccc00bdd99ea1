use std::env;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct CliArgs {
    pub data_dir: Option<PathBuf>,
    pub interval_secs: Option<u64>,
    pub target_pct: Option<i64>,
    pub reset_code: Option<String>,
    pub once: bool,
    pub json: bool,
    pub verbose: bool,
}

pub fn parse_args() -> Result<CliArgs, String> {
    parse_from(env::args().skip(1))
}

pub fn parse_from<I>(args: I) -> Result<CliArgs, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut parsed = CliArgs::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data-dir" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --data-dir".to_string())?;
                parsed.data_dir = Some(PathBuf::from(value));
            }
            "--interval" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --interval".to_string())?;
                let secs = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid interval value: {value}"))?;
                parsed.interval_secs = Some(secs);
            }
            "--target" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --target".to_string())?;
                let pct = value
                    .parse::<i64>()
                    .map_err(|_| format!("invalid target value: {value}"))?;
                parsed.target_pct = Some(pct);
            }
            "--reset" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --reset".to_string())?;
                parsed.reset_code = Some(value);
            }
            "--once" => {
                parsed.once = true;
            }
            "--json" => {
                parsed.json = true;
            }
            "--verbose" | "-v" => {
                parsed.verbose = true;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument: {arg}"));
            }
        }
    }

    Ok(parsed)
}

pub fn print_help() {
    println!(
        "CO2 Internet Tracker\n\n\
Usage:\n  \
co2-tracker [--data-dir <dir>] [--interval <secs>] [--json] [--verbose]\n  \
co2-tracker --target <pct>\n  \
co2-tracker --reset <code>\n  \
co2-tracker --once [--json]\n\n\
Options:\n  \
--data-dir <dir>  Store the usage database and error log in <dir>\n  \
--interval <secs> Override the sampling interval for this run only\n  \
--target <pct>    Set the personal reduction target (0-100) and exit\n  \
--reset <code>    Erase all tracked usage after confirming with <code>\n  \
--once            Print the current snapshot and exit\n  \
--json            Print snapshots as JSON\n  \
-v, --verbose     Log debug output\n  \
-h, --help        Show this help message\n"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_all_options() {
        let parsed = parse_from(args(&[
            "--data-dir",
            "/tmp/co2",
            "--interval",
            "30",
            "--target",
            "25",
            "--json",
            "-v",
            "--once",
        ]))
        .expect("parse");
        assert_eq!(parsed.data_dir, Some(PathBuf::from("/tmp/co2")));
        assert_eq!(parsed.interval_secs, Some(30));
        assert_eq!(parsed.target_pct, Some(25));
        assert!(parsed.json && parsed.verbose && parsed.once);
        assert_eq!(parsed.reset_code, None);
    }

    #[test]
    fn target_is_parsed_but_not_range_checked() {
        let parsed = parse_from(args(&["--target", "150"])).expect("parse");
        assert_eq!(parsed.target_pct, Some(150));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_from(args(&["--interval"])).is_err());
        assert!(parse_from(args(&["--interval", "soon"])).is_err());
        assert!(parse_from(args(&["--bogus"])).is_err());
    }
}
