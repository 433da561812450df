use std::{
    env,
    fs::{create_dir_all, read_to_string, write},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use tracing::{error, info};
use typeguard::{
    config::TransformConfig,
    format_error,
    logging::{init_logging, LogLevel},
    transform_source,
};

const USAGE: &str = "usage: typeguard [--out-dir DIR] [--alias NAME] [--log LEVEL] FILE...";

#[derive(Debug, PartialEq)]
struct Options {
    out_dir: Option<PathBuf>,
    alias: Option<String>,
    log_level: LogLevel,
    files: Vec<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        out_dir: None,
        alias: None,
        log_level: LogLevel::Warn,
        files: vec![],
    };

    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out-dir" => {
                let dir = args.next().ok_or("--out-dir expects a directory")?;
                options.out_dir = Some(PathBuf::from(dir));
            }
            "--alias" => {
                let alias = args.next().ok_or("--alias expects a name")?;
                options.alias = Some(alias.clone());
            }
            "--log" => {
                let level = args.next().ok_or("--log expects a level")?;
                options.log_level =
                    LogLevel::parse(level).ok_or_else(|| format!("unknown log level `{}`", level))?;
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag `{}`", flag)),
            file => options.files.push(PathBuf::from(file)),
        }
    }

    if options.files.is_empty() {
        return Err(String::from("no input files"));
    }

    Ok(options)
}

/// Transforms one file, printing a diagnostic on failure.
fn run_file(path: &Path, options: &Options, config: &TransformConfig) -> bool {
    let label = path.to_string_lossy().to_string();

    let source = match read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            error!(file = %label, "failed to read file: {}", err);
            return false;
        }
    };

    let start = Instant::now();
    let output = match transform_source(&source, &label, config) {
        Ok(output) => output,
        Err(err) => {
            eprint!("{}", format_error(&err, &source, &label));
            eprintln!("{}", err);
            return false;
        }
    };
    info!(file = %label, elapsed = ?start.elapsed(), "transformed");

    let Some(out_dir) = &options.out_dir else {
        print!("{}", output);
        return true;
    };

    let Some(file_name) = path.file_name() else {
        error!(file = %label, "input has no file name");
        return false;
    };
    let target = out_dir.join(file_name);

    if let Err(err) = create_dir_all(out_dir).and_then(|_| write(&target, output)) {
        error!(file = %target.to_string_lossy(), "failed to write output: {}", err);
        return false;
    }

    true
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}\n{}", message, USAGE);
            return ExitCode::from(2);
        }
    };

    init_logging(options.log_level);

    let mut config = TransformConfig::default();
    if let Some(alias) = &options.alias {
        config = config.with_default_alias(alias.as_str());
    }

    // Every file is attempted even after a failure
    let failures = options
        .files
        .iter()
        .filter(|path| !run_file(path, &options, &config))
        .count();

    if failures > 0 {
        error!("{} of {} files failed", failures, options.files.len());
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&["--alias", "tc", "--log", "debug", "a.js", "b.js"])).unwrap();

        assert_eq!(options.alias.as_deref(), Some("tc"));
        assert_eq!(options.log_level, LogLevel::Debug);
        assert_eq!(options.files, vec![PathBuf::from("a.js"), PathBuf::from("b.js")]);
        assert!(options.out_dir.is_none());
    }

    #[test]
    fn test_run_file_writes_to_out_dir() {
        let dir = env::temp_dir().join(format!("typeguard-run-{}", std::process::id()));
        let input = dir.join("input.js");
        create_dir_all(&dir).unwrap();
        write(&input, "function f(a: A) {}\n").unwrap();

        let out_dir = dir.join("out");
        let options = parse_args(&args(&["--out-dir", out_dir.to_str().unwrap(), input.to_str().unwrap()])).unwrap();

        assert!(run_file(&input, &options, &TransformConfig::default()));
        assert_eq!(
            read_to_string(out_dir.join("input.js")).unwrap(),
            "function f(a: A) {\n  t.assert(A.is(a));\n}\n"
        );

        assert!(!run_file(&dir.join("missing.js"), &options, &TransformConfig::default()));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_parse_args_errors() {
        assert_eq!(parse_args(&args(&[])).unwrap_err(), "no input files");
        assert_eq!(parse_args(&args(&["--out-dir"])).unwrap_err(), "--out-dir expects a directory");
        assert_eq!(parse_args(&args(&["--log", "loud", "a.js"])).unwrap_err(), "unknown log level `loud`");
        assert_eq!(parse_args(&args(&["--fast", "a.js"])).unwrap_err(), "unknown flag `--fast`");
    }
}
