mod commands;

use std::env;
use std::path::Path;
use std::process::ExitCode;

use cindent::{ConfigError, IndentConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Read from the working directory when `--config` is not given.
const LOCAL_CONFIG: &str = ".cindent.toml";
const LOG_ENV: &str = "CINDENT_LOG";

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
    #[error("{0} line(s) need reindenting")]
    Mismatches(usize),
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        // `check` already printed its report.
        Err(CliError::Mismatches(_)) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (verbose, args) = consume_flag("-v", &args);
    init_tracing(verbose);

    let (config_path, args) = consume_value_flag("--config", &args)?;
    let (indent_size, args) = consume_value_flag("--indent-size", &args)?;
    let (tab_size, args) = consume_value_flag("--tab-size", &args)?;

    let Some((command, rest)) = args.split_first() else {
        print_help();
        return Ok(());
    };

    match command.as_str() {
        "-h" | "--help" | "help" => {
            print_help();
            return Ok(());
        }
        "-V" | "--version" | "version" => {
            println!("cindent {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    let config = resolve_config(config_path.as_deref(), indent_size, tab_size)?;
    match command.as_str() {
        "reindent" => commands::cmd_reindent(&config, rest),
        "column" => commands::cmd_column(&config, rest),
        "check" => commands::cmd_check(&config, rest),
        "config" => commands::cmd_config(&config),
        other => Err(CliError::InvalidCommand(other.to_string())),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file (explicit, else `.cindent.toml` if present, else defaults), then flag overrides.
fn resolve_config(
    path: Option<&str>,
    indent_size: Option<String>,
    tab_size: Option<String>,
) -> Result<IndentConfig, CliError> {
    let mut config = match path {
        Some(path) => IndentConfig::load(Path::new(path))?,
        None if Path::new(LOCAL_CONFIG).is_file() => IndentConfig::load(Path::new(LOCAL_CONFIG))?,
        None => IndentConfig::default(),
    };
    if let Some(value) = indent_size {
        config.indent_size = parse_size("--indent-size", &value)?;
    }
    if let Some(value) = tab_size {
        config.tab_size = parse_size("--tab-size", &value)?;
    }
    config.validate()?;
    debug!(?config, "effective configuration");
    Ok(config)
}

fn parse_size(flag: &str, value: &str) -> Result<usize, CliError> {
    let error = CliError::InvalidArgument(format!("{flag} expects a number, got `{value}`"));
    value.parse().map_err(|_| error)
}

fn print_help() {
    println!(
        "cindent {}\n\nUSAGE:\n  cindent [OPTIONS] <COMMAND>\n\nCOMMANDS:\n  reindent <file|-> [--write]\n  column <file> <line> [--typed <ch>]\n  check <file>... [--json]\n  config\n\nOPTIONS:\n  --config <path>\n  --indent-size <n>\n  --tab-size <n>\n  -v\n  -h, --help\n  -V, --version",
        env!("CARGO_PKG_VERSION")
    );
}

/// Removes every occurrence of `flag` from `args`, reporting whether it was there.
pub(crate) fn consume_flag(flag: &str, args: &[String]) -> (bool, Vec<String>) {
    let mut enabled = false;
    let mut out = Vec::new();
    for arg in args {
        if arg == flag {
            enabled = true;
        } else {
            out.push(arg.clone());
        }
    }
    (enabled, out)
}

/// Removes `flag` and the value after it from `args`; the last occurrence wins.
pub(crate) fn consume_value_flag(
    flag: &str,
    args: &[String],
) -> Result<(Option<String>, Vec<String>), CliError> {
    let mut value = None;
    let mut out = Vec::new();
    let mut i = 0usize;
    while i < args.len() {
        let arg = &args[i];
        if arg == flag {
            let Some(next) = args.get(i + 1) else {
                return Err(CliError::InvalidCommand(format!("{flag} expects a value")));
            };
            if next.starts_with("--") {
                return Err(CliError::InvalidCommand(format!("{flag} expects a value")));
            }
            value = Some(next.clone());
            i += 2;
            continue;
        }
        out.push(arg.clone());
        i += 1;
    }
    Ok((value, out))
}
