//! Command-line interface for tokenised string templates
//!
//! Usage:
//!   tokenise render `<template>` [--values `<file>`] [--set key=value]... [--encoding `<enc>`]
//!   tokenise check `<template>` [--values `<file>`] [--set key=value]...
//!       exit 0 when every tag resolves, 1 otherwise
//!   tokenise parse `<template>`
//!       print the syntax tree as JSON
//!
//! Every subcommand accepts `--file` to read the template from a path and
//! `--config` to layer a TOML file over the built-in defaults. Set
//! `TOKENISE_LOG` (e.g. `debug`) to see library logs on stderr.

use clap::{Arg, ArgAction, ArgMatches, Command};
use std::fs;
use std::process;
use tokenised_strings::config::{Loader, TokenisedConfig};
use tokenised_strings::{Encoding, TokenizedStringBuilder, Value, Values};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn template_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("template")
                .help("Template text, or a path when --file is given")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("file")
                .long("file")
                .short('f')
                .help("Read the template from the given path")
                .action(ArgAction::SetTrue),
        )
}

fn value_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("values")
                .long("values")
                .help("JSON file with an object of top-level values"),
        )
        .arg(
            Arg::new("set")
                .long("set")
                .short('s')
                .help("Value as key=value; the value is parsed as JSON when possible")
                .action(ArgAction::Append),
        )
}

fn cli() -> Command {
    Command::new("tokenise")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render and inspect tokenised string templates")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("TOML file layered over the default configuration"),
        )
        .subcommand(value_args(template_args(
            Command::new("render").about("Render a template"),
        ))
        .arg(
            Arg::new("encoding")
                .long("encoding")
                .short('e')
                .help("Encoding applied to inserted values (defaults to the configured one)")
                .value_parser(Encoding::NAMES),
        ))
        .subcommand(value_args(template_args(
            Command::new("check").about("Check that every tag of a template resolves"),
        )))
        .subcommand(template_args(
            Command::new("parse").about("Print the syntax tree of a template as JSON"),
        ))
}

fn main() {
    init_logging();

    let matches = cli().get_matches();
    let result = match matches.subcommand() {
        Some(("render", sub)) => handle_render_command(&matches, sub),
        Some(("check", sub)) => handle_check_command(&matches, sub),
        Some(("parse", sub)) => handle_parse_command(&matches, sub),
        _ => unreachable!(),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("TOKENISE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(matches: &ArgMatches) -> CliResult<TokenisedConfig> {
    let mut loader = Loader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    Ok(loader.build()?)
}

fn read_template(matches: &ArgMatches) -> CliResult<String> {
    let template = matches
        .get_one::<String>("template")
        .ok_or("missing template")?;
    if matches.get_flag("file") {
        fs::read_to_string(template)
            .map_err(|error| format!("cannot read template '{}': {}", template, error).into())
    } else {
        Ok(template.clone())
    }
}

fn read_values(matches: &ArgMatches) -> CliResult<Values> {
    let mut values = Values::new();

    if let Some(path) = matches.get_one::<String>("values") {
        let text = fs::read_to_string(path)
            .map_err(|error| format!("cannot read values '{}': {}", path, error))?;
        let json: serde_json::Value = serde_json::from_str(&text)?;
        match Value::from(json) {
            Value::Map(map) => values.extend(map),
            other => {
                return Err(format!(
                    "values file must hold a JSON object, found {}",
                    other.type_name()
                )
                .into())
            }
        }
    }

    for assignment in matches.get_many::<String>("set").into_iter().flatten() {
        let (key, raw) = assignment
            .split_once('=')
            .ok_or_else(|| format!("expected key=value, found '{}'", assignment))?;
        let value = serde_json::from_str::<serde_json::Value>(raw)
            .map(Value::from)
            .unwrap_or_else(|_| Value::from(raw));
        values.insert(key.to_string(), value);
    }

    Ok(values)
}

fn handle_render_command(global: &ArgMatches, matches: &ArgMatches) -> CliResult<bool> {
    let config = load_config(global)?;
    let encoding = match matches.get_one::<String>("encoding") {
        Some(name) => name.parse::<Encoding>()?,
        None => config.render.encoding,
    };

    let builder = TokenizedStringBuilder::from_config(&config)?;
    let template = read_template(matches)?;
    let rendered = builder.build_encoded(&template, read_values(matches)?, encoding)?;
    println!("{}", rendered);
    Ok(true)
}

fn handle_check_command(global: &ArgMatches, matches: &ArgMatches) -> CliResult<bool> {
    let config = load_config(global)?;
    let builder = TokenizedStringBuilder::from_config(&config)?;
    let buildable = builder.can_build(&read_template(matches)?, read_values(matches)?)?;
    println!("{}", if buildable { "ok" } else { "missing values" });
    Ok(buildable)
}

fn handle_parse_command(global: &ArgMatches, matches: &ArgMatches) -> CliResult<bool> {
    let config = load_config(global)?;
    let ast = config.parser()?.parse(&read_template(matches)?)?;
    println!("{}", serde_json::to_string_pretty(&ast)?);
    Ok(true)
}
