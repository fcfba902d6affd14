#![warn(missing_docs)]

//! Command line front end of the pyjava transliterator.
//!
//! Reads Python source from a file or standard input and writes either the generated Java class or
//! the diagnostics report. With `--json` the input is instead a conversion request document and the
//! result is written back as a JSON response.
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::debug;
use serde::{Deserialize, Serialize};

use pyjava::ConverterRegistry;


#[derive(Parser, Debug)]
#[command(name = "pyjava")]
#[command(version)]
#[command(about = "Transliterates a subset of Python into a Java class")]
struct Cli {
    /// Source file to convert, standard input if omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write the result to this file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Language of the input
    #[arg(long, default_value = "python")]
    from: String,

    /// Language to convert to
    #[arg(long, default_value = "java")]
    to: String,

    /// Treat the input as a JSON conversion request and answer with a JSON response
    #[arg(long)]
    json: bool,

    /// Print the supported language pairs and exit
    #[arg(long)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}


/// A conversion request, as sent to the conversion endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConvertRequest {
    code: String,
    source_language: String,
    target_language: String
}


#[derive(Debug, Serialize)]
struct ConvertResponse {
    output: String
}


/// Exits with a failure status when the input could not be converted, so that a diagnostics report
/// can be told apart from generated code. JSON responses always succeed.
fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let registry = ConverterRegistry::default();
    if cli.list {
        write_output(cli.output.as_ref(), &list_pairs(&registry))?;
        return Ok(ExitCode::SUCCESS);
    }

    let input = read_input(cli.input.as_ref())?;
    if cli.json {
        write_output(cli.output.as_ref(), &answer_request(&registry, &input)?)?;
        return Ok(ExitCode::SUCCESS);
    }

    debug!("Converting from '{}' to '{}'", cli.from, cli.to);
    let conversion = registry.convert(&cli.from, &cli.to, &input);
    write_output(cli.output.as_ref(), &conversion.to_string())?;

    Ok(if conversion.is_code() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}


fn list_pairs(registry: &ConverterRegistry) -> String {
    registry.pairs()
        .map(|(source, target)| format!("{} -> {}\n", source, target))
        .collect()
}


fn answer_request(registry: &ConverterRegistry, body: &str) -> Result<String> {
    let request: ConvertRequest = serde_json::from_str(body)
        .context("Failed to parse the conversion request")?;
    debug!("Converting request from '{}' to '{}'", request.source_language, request.target_language);

    let output = registry
        .convert(&request.source_language, &request.target_language, &request.code)
        .to_string();
    let response = serde_json::to_string_pretty(&ConvertResponse { output })?;

    Ok(response + "\n")
}


fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input).context("Failed to read standard input")?;
            Ok(input)
        }
    }
}


fn write_output(path: Option<&PathBuf>, output: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, output)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => io::stdout().write_all(output.as_bytes()).context("Failed to write standard output")
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn test_answer_request() {
        let registry = ConverterRegistry::default();
        let body = r#"{"code": "print(1)", "sourceLanguage": "Python", "targetLanguage": "Java"}"#;
        let response: serde_json::Value = serde_json::from_str(&answer_request(&registry, body).unwrap()).unwrap();

        let output = response["output"].as_str().unwrap();
        assert!(output.starts_with("public class Main {"));
        assert!(output.contains("System.out.println(1);"));
    }


    #[test]
    fn test_answer_unsupported_request() {
        let registry = ConverterRegistry::default();
        let body = r#"{"code": "", "sourceLanguage": "ruby", "targetLanguage": "go"}"#;
        let response: serde_json::Value = serde_json::from_str(&answer_request(&registry, body).unwrap()).unwrap();
        assert_eq!(response["output"], "// Unsupported conversion");
    }


    #[test]
    fn test_malformed_request() {
        let registry = ConverterRegistry::default();
        assert!(answer_request(&registry, r#"{"code": "print(1)"}"#).is_err());
        assert!(answer_request(&registry, "not json").is_err());
    }


    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["pyjava", "program.py"]);
        assert_eq!(cli.input, Some(PathBuf::from("program.py")));
        assert_eq!(cli.from, "python");
        assert_eq!(cli.to, "java");
        assert!(!cli.json && !cli.list && !cli.verbose && cli.output.is_none());
    }


    #[test]
    fn test_list_pairs() {
        assert_eq!(list_pairs(&ConverterRegistry::default()), "python -> java\n");

        let mut registry = ConverterRegistry::empty();
        assert_eq!(list_pairs(&registry), "");
        registry.register("Python", "Java", pyjava::python_to_java);
        registry.register("echo", "echo", |code| pyjava::Conversion::Code(code.to_owned()));
        assert_eq!(list_pairs(&registry), "python -> java\necho -> echo\n");
    }
}
