use std::fs;
use std::io::{self, Read};
use std::path::Path;

use cindent::column::indent_of_line;
use cindent::{IndentConfig, Indenter};
use serde::Serialize;
use tracing::info;

use crate::{CliError, consume_flag, consume_value_flag};

#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    mismatches: Vec<Mismatch>,
}

#[derive(Debug, Serialize)]
struct Mismatch {
    /// 1-based.
    line: usize,
    expected: usize,
    actual: usize,
}

pub(crate) fn cmd_reindent(config: &IndentConfig, args: &[String]) -> Result<(), CliError> {
    let (write, args) = consume_flag("--write", args);
    let Some(target) = args.first() else {
        return Err(CliError::InvalidCommand(
            "reindent expects a file or `-`".to_string(),
        ));
    };
    let indenter = Indenter::new(*config)?;

    if target == "-" {
        if write {
            return Err(CliError::InvalidArgument(
                "--write cannot be used with stdin".to_string(),
            ));
        }
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        print!("{}", reindent_text(&indenter, &text));
        return Ok(());
    }

    let path = Path::new(target);
    let text = fs::read_to_string(path)?;
    let reindented = reindent_text(&indenter, &text);
    if !write {
        print!("{reindented}");
    } else if reindented != text {
        fs::write(path, reindented)?;
        info!(path = %path.display(), "reindented");
    }
    Ok(())
}

pub(crate) fn cmd_column(config: &IndentConfig, args: &[String]) -> Result<(), CliError> {
    let (typed, args) = consume_value_flag("--typed", args)?;
    let [file, line] = args.as_slice() else {
        return Err(CliError::InvalidCommand(
            "column expects <file> <line>".to_string(),
        ));
    };
    let typed = typed.as_deref().map(parse_typed).transpose()?;
    let number = line
        .parse::<usize>()
        .ok()
        .filter(|number| *number >= 1)
        .ok_or_else(|| {
            CliError::InvalidArgument(format!("line must be a number from 1, got `{line}`"))
        })?;

    let text = fs::read_to_string(file)?;
    let lines: Vec<&str> = text.lines().collect();
    if number > lines.len() {
        return Err(CliError::InvalidArgument(format!(
            "{file} has {} line(s)",
            lines.len()
        )));
    }

    let indenter = Indenter::new(*config)?;
    println!("{}", indenter.indent_for_line(&lines, number - 1, typed));
    Ok(())
}

pub(crate) fn cmd_check(config: &IndentConfig, args: &[String]) -> Result<(), CliError> {
    let (json, files) = consume_flag("--json", args);
    if files.is_empty() {
        return Err(CliError::InvalidCommand(
            "check expects at least one file".to_string(),
        ));
    }
    let indenter = Indenter::new(*config)?;

    let mut reports = Vec::new();
    for file in &files {
        let text = fs::read_to_string(file)?;
        reports.push(check_text(&indenter, file, &text));
    }
    let total: usize = reports.iter().map(|report| report.mismatches.len()).sum();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            for mismatch in &report.mismatches {
                println!(
                    "{}:{}: expected column {}, found {}",
                    report.path, mismatch.line, mismatch.expected, mismatch.actual
                );
            }
        }
    }

    if total > 0 {
        return Err(CliError::Mismatches(total));
    }
    Ok(())
}

pub(crate) fn cmd_config(config: &IndentConfig) -> Result<(), CliError> {
    print!("{}", toml::to_string(config)?);
    Ok(())
}

/// Keeps a trailing newline if the input had one.
fn reindent_text(indenter: &Indenter, text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let mut out = indenter.reindent(&lines).join("\n");
    if text.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn check_text(indenter: &Indenter, path: &str, text: &str) -> FileReport {
    let tab_size = indenter.config().tab_size;
    let lines: Vec<&str> = text.lines().collect();
    let expected = indenter.reindent(&lines);
    let mismatches = lines
        .iter()
        .zip(&expected)
        .enumerate()
        .filter(|(_, (raw, _))| !raw.trim().is_empty())
        .filter_map(|(index, (raw, want))| {
            let actual = indent_of_line(raw, tab_size);
            let expected = indent_of_line(want, tab_size);
            (actual != expected).then_some(Mismatch {
                line: index + 1,
                expected,
                actual,
            })
        })
        .collect();
    FileReport {
        path: path.to_string(),
        mismatches,
    }
}

fn parse_typed(value: &str) -> Result<char, CliError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(CliError::InvalidArgument(format!(
            "--typed expects a single character, got `{value}`"
        ))),
    }
}
